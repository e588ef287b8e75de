//! `credvault init` — create a new vault, optionally seeded from a table.

use std::fs;
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt_new_password, vault_path, Cli, PASSWORD_ENV};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::vault::{self, parse_table, Vault};

/// Execute the `init` command.
pub fn execute(cli: &Cli, settings: &Settings, force: bool, import: Option<&Path>) -> Result<()> {
    let path = vault_path(cli, settings);

    // 1. Refuse to clobber an existing vault unless asked to.
    if path.exists() {
        if !force {
            output::tip("Use `credvault add` to store credentials in the existing vault.");
            return Err(CredVaultError::VaultAlreadyExists(path));
        }
        output::warning(&format!("Overwriting existing vault at {}", path.display()));
    }

    // 2. Read the seed table before asking for a password.
    let seed = match import {
        Some(file) => {
            let text = Zeroizing::new(fs::read_to_string(file)?);
            parse_table(&text)
        }
        None => Vault::new(),
    };

    // 3. Create the vault directory if it doesn't exist.
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            output::info(&format!("Created vault directory: {}", dir.display()));
        }
    }

    // 4. Choose the master password and write the vault.
    let password = prompt_new_password(PASSWORD_ENV, settings.min_password_length)?;
    vault::encrypt(&seed, &password, &path)?;

    match import {
        Some(file) => output::success(&format!(
            "Vault created at {} with {} imported from {}",
            path.display(),
            output::records(seed.len()),
            file.display()
        )),
        None => output::success(&format!("Vault created at {}", path.display())),
    }

    output::tip("Run `credvault add -w <SITE> -u <USER>` to store a credential.");
    output::tip("Run `credvault show` to browse your credentials.");

    Ok(())
}
