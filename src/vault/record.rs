//! The credential record stored inside a vault.
//!
//! Serializes with field names `website`, `username`, `mail`, `password`;
//! absent optionals are omitted from the JSON entirely.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A single credential: one website and the secret used to log into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct CredentialRecord {
    /// Natural key of the record (e.g. "github.com").
    pub website: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail: Option<String>,

    /// Never absent: a record without a password is not a credential.
    pub password: String,
}

impl CredentialRecord {
    pub fn new(
        website: impl Into<String>,
        username: Option<String>,
        mail: Option<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            website: website.into(),
            username,
            mail,
            password: password.into(),
        }
    }

    /// The four cells of this record in column order, with absent
    /// optionals rendered as empty strings.
    pub fn cells(&self) -> [&str; 4] {
        [
            &self.website,
            self.username.as_deref().unwrap_or(""),
            self.mail.as_deref().unwrap_or(""),
            &self.password,
        ]
    }
}
