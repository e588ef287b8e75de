//! `credvault add` — store a credential, or replace one with `--replace`.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::generator::{self, PasswordPolicy};
use crate::cli::output;
use crate::cli::prompt::Confirmation;
use crate::cli::{prompt_password, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::vault::{self, ChangeStatus};

/// How many generated passwords the user may turn down.
const MAX_GENERATION_ROUNDS: usize = 5;

/// Arguments of the `add` command.
#[derive(Debug, Clone, Copy)]
pub struct AddArgs<'a> {
    pub website: &'a str,
    pub username: Option<&'a str>,
    pub mail: Option<&'a str>,
    pub replace: bool,
    pub auto_gen: Option<usize>,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, settings: &Settings, args: &AddArgs<'_>) -> Result<()> {
    if !args.replace && args.username.is_none() && args.mail.is_none() {
        return Err(CredVaultError::CommandFailed(
            "a --username or a --mail is required (use --replace to only change the password)"
                .into(),
        ));
    }

    // Open the vault first so a wrong master password fails fast.
    let path = vault_path(cli, settings);
    let master = prompt_password()?;
    let mut vault = vault::decrypt(&master, &path)?;

    if !args.replace && vault.contains(args.website) {
        return Err(CredVaultError::WebsiteExists(args.website.to_string()));
    }

    let password = match args.auto_gen {
        Some(length) => choose_generated(length)?,
        None => read_entry_password(args.website)?,
    };

    let status = vault.replace_or_add(args.website, &password, args.username, args.mail);
    vault::encrypt(&vault, &master, &path)?;

    match status {
        ChangeStatus::Added => output::success(&format!(
            "Added '{}' ({} total)",
            args.website,
            output::records(vault.len())
        )),
        ChangeStatus::Replaced => output::success(&format!("Replaced '{}'", args.website)),
    }

    Ok(())
}

/// Offer generated passwords until one is accepted.
fn choose_generated(length: usize) -> Result<Zeroizing<String>> {
    let policy = PasswordPolicy {
        length,
        digits: true,
        specials: true,
    };

    for _ in 0..MAX_GENERATION_ROUNDS {
        let candidate = generator::generate(&policy);
        output::info(&format!("Generated password: {}", candidate.as_str()));
        if Confirmation::new("Is this password satisfying?").interact()? {
            return Ok(candidate);
        }
    }

    Err(CredVaultError::UserCancelled)
}

/// Read the password to store, in order:
/// 1. Piped input (stdin is not a terminal), first line
/// 2. Interactive prompt, typed twice
fn read_entry_password(website: &str) -> Result<Zeroizing<String>> {
    let password = if io::stdin().is_terminal() {
        prompt_twice(website)?
    } else {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.lines().next().unwrap_or_default().to_string())
    };

    if password.is_empty() {
        return Err(CredVaultError::CommandFailed("password cannot be empty".into()));
    }
    Ok(password)
}

fn prompt_twice(website: &str) -> Result<Zeroizing<String>> {
    let ask = |prompt: String| {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| CredVaultError::CommandFailed(format!("input prompt: {e}")))
    };

    let first = ask(format!("Password for {website}"))?;
    let second = ask("Confirm password".to_string())?;
    if first.as_str() != second.as_str() {
        return Err(CredVaultError::PasswordMismatch);
    }
    Ok(first)
}
