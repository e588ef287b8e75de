//! `credvault change-master-password` — re-encrypt under a new password.
//!
//! Opens the vault with the current password, then writes it back
//! atomically under the new one.  The record list itself is unchanged.

use crate::cli::output;
use crate::cli::{prompt_new_password, prompt_password, vault_path, Cli, NEW_PASSWORD_ENV};
use crate::config::Settings;
use crate::errors::Result;
use crate::vault;

/// Execute the `change-master-password` command.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let path = vault_path(cli, settings);

    // 1. Open the vault with the current password.
    output::info("Enter your current master password.");
    let old_password = prompt_password()?;
    let vault = vault::decrypt(&old_password, &path)?;

    // 2. Prompt for the new password.
    output::info("Choose your new master password.");
    let new_password = prompt_new_password(NEW_PASSWORD_ENV, settings.min_password_length)?;

    // 3. Re-seal and save atomically.
    vault::encrypt(&vault, &new_password, &path)?;

    output::success(&format!(
        "Master password changed ({} re-encrypted)",
        output::records(vault.len())
    ));

    Ok(())
}
