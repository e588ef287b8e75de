//! Cryptographic primitives for credvault.
//!
//! This module provides:
//! - SHA-256 + HKDF derivation of the vault key from the master passphrase (`keys`)
//! - AES-256-GCM encryption and decryption of the vault blob (`encryption`)

pub mod encryption;
pub mod keys;

pub use encryption::{decrypt, encrypt, NONCE_LEN, TAG_LEN};
pub use keys::{derive_vault_key, VaultKey};
