//! Sealing a `Vault` into its on-disk blob and opening it again.
//!
//! A vault file is a single AEAD box:
//!
//! ```text
//! [nonce: 12 bytes][ciphertext: N bytes][GCM tag: 16 bytes]
//! ```
//!
//! The ciphertext is the JSON document
//! `{"passwords":[{"website":..,"username":..,"mail":..,"password":..}, ...]}`,
//! which only ever exists in memory and inside the sealed box.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::record::CredentialRecord;
use super::store::Vault;
use crate::crypto::{self, derive_vault_key};
use crate::errors::{CredVaultError, Result};

/// Serialized shape of the vault plaintext.
#[derive(Serialize)]
struct VaultDocumentRef<'a> {
    passwords: &'a [CredentialRecord],
}

#[derive(Deserialize)]
struct VaultDocument {
    passwords: Vec<CredentialRecord>,
}

/// Encrypt `vault` under `passphrase` and return the sealed blob.
pub fn seal(vault: &Vault, passphrase: &str) -> Result<Vec<u8>> {
    let key = derive_vault_key(passphrase)?;

    let plaintext = Zeroizing::new(
        serde_json::to_vec(&VaultDocumentRef {
            passwords: vault.records(),
        })
        .map_err(|e| CredVaultError::SerializationError(format!("vault: {e}")))?,
    );

    crypto::encrypt(&key, &plaintext)
}

/// Open a sealed blob with `passphrase`.
///
/// A wrong passphrase and a corrupted blob both surface as
/// `DecryptionFailed`.  A blob that authenticates but is not a vault
/// document is `InvalidVaultFormat`.
pub fn open(passphrase: &str, blob: &[u8]) -> Result<Vault> {
    let key = derive_vault_key(passphrase)?;
    let plaintext = crypto::decrypt(&key, blob)?;

    let document: VaultDocument = serde_json::from_slice(&plaintext)
        .map_err(|e| CredVaultError::InvalidVaultFormat(format!("vault JSON: {e}")))?;

    Ok(Vault::from_records(document.passwords))
}

/// Encrypt `vault` and write it to `path` **atomically**.
///
/// 1. Seal the vault into one blob.
/// 2. Write it to a temp file in the same directory and fsync it.
/// 3. Rename the temp file over the target path.
///
/// The rename ensures readers never see a half-written file.
pub fn encrypt(vault: &Vault, passphrase: &str, path: &Path) -> Result<()> {
    let blob = seal(vault, passphrase)?;
    write_atomic(path, &blob)?;
    info!(records = vault.len(), path = %path.display(), "vault written");
    Ok(())
}

/// Read the vault file at `path` and open it with `passphrase`.
pub fn decrypt(passphrase: &str, path: &Path) -> Result<Vault> {
    if !path.exists() {
        return Err(CredVaultError::VaultNotFound(path.to_path_buf()));
    }

    let blob = fs::read(path)?;
    debug!(bytes = blob.len(), path = %path.display(), "read vault file");
    open(passphrase, &blob)
}

/// Replace `path` with `bytes` via temp-file + rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    // Same directory so the rename stays on one filesystem.
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = write_synced(&tmp_path, bytes)
        .and_then(|()| fs::rename(&tmp_path, path).map_err(CredVaultError::from));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Create (or truncate) `path` owner-only and flush `bytes` to disk.
fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    #[cfg(unix)]
    let mut file = {
        use std::os::unix::fs::OpenOptionsExt;
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
    };

    #[cfg(not(unix))]
    let mut file = fs::File::create(path)?;

    file.write_all(bytes)?;
    file.sync_all()?;
    Ok(())
}
