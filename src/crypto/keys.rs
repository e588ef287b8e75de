//! Master-passphrase key derivation.
//!
//! The passphrase is hashed with SHA-256 and the digest is used as input
//! keying material for HKDF-SHA256, which expands it into the 256-bit
//! AES key.  The digest itself never reaches the cipher.

use hkdf::Hkdf;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{CredVaultError, Result};

/// Length of the derived vault key (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A 32-byte vault key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

/// Derive the vault key from a UTF-8 master passphrase.
///
/// Deterministic: the same passphrase always yields the same key, which is
/// what lets `decrypt` re-open a blob written by `encrypt`.
pub fn derive_vault_key(passphrase: &str) -> Result<VaultKey> {
    let mut digest = Zeroizing::new([0u8; KEY_LEN]);
    digest.copy_from_slice(&Sha256::digest(passphrase.as_bytes()));
    hkdf_derive(digest.as_slice())
}

/// Run HKDF-SHA256 (extract + expand) over `ikm`.
///
/// No salt and an empty `info` string: the key must be reproducible from
/// the passphrase alone since nothing but the sealed blob is stored.
fn hkdf_derive(ikm: &[u8]) -> Result<VaultKey> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(&[], &mut okm)
        .map_err(|e| CredVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    let key = VaultKey::new(okm);
    okm.zeroize();
    Ok(key)
}
