//! In-memory vault and its mutation API.
//!
//! `Vault` is an ordered list of `CredentialRecord`s.  Insertion order is
//! kept for display only; lookups go by `website`.  Uniqueness of
//! `website` is maintained by `replace_or_add` rather than enforced, so a
//! vault parsed from a plaintext table may still hold duplicates.

use regex::RegexBuilder;
use tracing::debug;
use zeroize::Zeroize;

use super::record::CredentialRecord;
use crate::errors::{CredVaultError, Result};

/// Outcome of `Vault::replace_or_add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Added,
    Replaced,
}

/// The decrypted credential store held by one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vault {
    records: Vec<CredentialRecord>,
}

impl Vault {
    /// An empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vault from records, keeping their order.
    pub fn from_records(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Append a record without checking for an existing website.
    pub fn add(&mut self, record: CredentialRecord) {
        self.records.push(record);
    }

    /// Upsert by exact, case-sensitive website match.
    ///
    /// On a match the password is always overwritten; `username` and
    /// `mail` are overwritten only when a value is supplied.  Only the
    /// first matching record is touched.
    pub fn replace_or_add(
        &mut self,
        website: &str,
        password: &str,
        username: Option<&str>,
        mail: Option<&str>,
    ) -> ChangeStatus {
        match self.records.iter_mut().find(|r| r.website == website) {
            Some(existing) => {
                overwrite(&mut existing.password, password);
                if let Some(username) = username {
                    overwrite_optional(&mut existing.username, username);
                }
                if let Some(mail) = mail {
                    overwrite_optional(&mut existing.mail, mail);
                }
                ChangeStatus::Replaced
            }
            None => {
                self.add(CredentialRecord::new(
                    website,
                    username.map(str::to_string),
                    mail.map(str::to_string),
                    password,
                ));
                ChangeStatus::Added
            }
        }
    }

    /// Remove every record whose website equals `website`.
    ///
    /// Returns how many were removed; zero is not an error.
    pub fn remove(&mut self, website: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.website != website);
        before - self.records.len()
    }

    /// Drop every record.  Returns how many there were.
    pub fn remove_all(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    // ------------------------------------------------------------------
    // Filtering
    // ------------------------------------------------------------------

    /// Keep only records whose website equals `website` exactly.
    ///
    /// Zero or many survivors are both fine.
    pub fn filter_exact(&mut self, website: &str) {
        self.records.retain(|r| r.website == website);
    }

    /// Narrow the vault to the single record whose website matches
    /// `pattern` (case-insensitive regex search).
    ///
    /// Zero matches is `NoMatch` and more than one is `AmbiguousMatch`
    /// listing every matching website.  The vault is untouched on error.
    pub fn filter_by_pattern(&mut self, pattern: &str) -> Result<()> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CredVaultError::InvalidPattern(e.to_string()))?;

        let matching: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| regex.is_match(&r.website))
            .map(|(i, _)| i)
            .collect();

        debug!(pattern, matches = matching.len(), "filtered vault by pattern");

        match matching.as_slice() {
            [] => Err(CredVaultError::NoMatch(pattern.to_string())),
            [index] => {
                let keep = *index;
                let mut position = 0;
                self.records.retain(|_| {
                    let retained = position == keep;
                    position += 1;
                    retained
                });
                Ok(())
            }
            many => Err(CredVaultError::AmbiguousMatch(
                many.iter()
                    .map(|&i| self.records[i].website.clone())
                    .collect(),
            )),
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CredentialRecord> {
        self.records.iter()
    }

    pub fn first(&self) -> Option<&CredentialRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if any record has exactly this website.
    pub fn contains(&self, website: &str) -> bool {
        self.records.iter().any(|r| r.website == website)
    }
}

/// Wipe `slot` in place, then store `value` in it.  The old contents never
/// reach the allocator unwiped.
fn overwrite(slot: &mut String, value: &str) {
    slot.zeroize();
    slot.push_str(value);
}

fn overwrite_optional(slot: &mut Option<String>, value: &str) {
    match slot {
        Some(old) => overwrite(old, value),
        None => *slot = Some(value.to_string()),
    }
}

impl<'a> IntoIterator for &'a Vault {
    type Item = &'a CredentialRecord;
    type IntoIter = std::slice::Iter<'a, CredentialRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
