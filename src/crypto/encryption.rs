//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext | 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use tracing::debug;
use zeroize::Zeroizing;

use super::keys::VaultKey;
use crate::errors::{CredVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`.
///
/// Returns `nonce || ciphertext || tag` as a single blob.
pub fn encrypt(key: &VaultKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CredVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Never reuse a nonce: one fresh draw per seal.
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // aes-gcm appends the tag to the ciphertext.
    let sealed = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CredVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + sealed.len());
    output.extend_from_slice(&nonce);
    output.extend_from_slice(&sealed);
    debug!(bytes = output.len(), "sealed vault blob");
    Ok(output)
}

/// Decrypt a blob produced by `encrypt`.
///
/// Every failure (short blob, bad tag, wrong key) collapses into
/// `DecryptionFailed` so callers cannot tell a wrong passphrase from a
/// corrupted file.
pub fn decrypt(key: &VaultKey, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(CredVaultError::DecryptionFailed);
    }

    let (nonce_bytes, sealed) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| CredVaultError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, sealed)
        .map_err(|_| CredVaultError::DecryptionFailed)?;

    Ok(Zeroizing::new(plaintext))
}
