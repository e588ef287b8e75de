//! `credvault delete` — remove one website's credentials, or all of them.

use crate::cli::output;
use crate::cli::prompt::Confirmation;
use crate::cli::{prompt_password, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::vault;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, settings: &Settings, website: Option<&str>, all: bool) -> Result<()> {
    let path = vault_path(cli, settings);

    // Wiping the whole vault always asks first.
    if all {
        let confirmed = Confirmation::new(format!(
            "Delete every credential in {}?",
            path.display()
        ))
        .interact()?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let master = prompt_password()?;
    let mut vault = vault::decrypt(&master, &path)?;

    let removed = match website {
        Some(site) if !all => {
            let removed = vault.remove(site);
            if removed == 0 {
                return Err(CredVaultError::NoMatch(site.to_string()));
            }
            removed
        }
        _ => vault.remove_all(),
    };

    vault::encrypt(&vault, &master, &path)?;

    output::success(&format!("Deleted {}", output::records(removed)));

    Ok(())
}
