//! Vault module — the credential data model and its encrypted storage.
//!
//! This module provides:
//! - The `CredentialRecord` type (`record`)
//! - The in-memory `Vault` and its mutation API (`store`)
//! - Sealing/opening the vault file with the master passphrase (`codec`)
//! - The plaintext import/export table (`table`)

pub mod codec;
pub mod record;
pub mod store;
pub mod table;

// Re-export the most commonly used items.
pub use codec::{decrypt, encrypt};
pub use record::CredentialRecord;
pub use store::{ChangeStatus, Vault};
pub use table::{parse_table, render_table, ColumnWidths};
