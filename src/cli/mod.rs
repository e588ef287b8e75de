//! CLI module — Clap argument parser, prompts, and command implementations.

pub mod commands;
pub mod generator;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CredVaultError, Result};

/// Master password for non-interactive use.
pub const PASSWORD_ENV: &str = "CREDVAULT_PASSWORD";

/// New master password for non-interactive `change-master-password`.
pub const NEW_PASSWORD_ENV: &str = "CREDVAULT_NEW_PASSWORD";

/// Shortest password `--auto-gen` will produce.
pub const MIN_GENERATED_LEN: u16 = 8;

/// CredVault CLI: local encrypted credential store.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Local encrypted credential store with a terminal viewer",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file to use (default: from config, else the user data dir)
    #[arg(long, global = true, env = "CREDVAULT_FILE")]
    pub vault_file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init {
        /// Overwrite an existing vault
        #[arg(long)]
        force: bool,

        /// Seed the vault from a plaintext table
        #[arg(long, value_name = "FILE")]
        import: Option<PathBuf>,
    },

    /// Add a credential (or replace one with --replace)
    Add {
        /// Website the credential belongs to
        #[arg(short, long)]
        website: String,

        /// Account username
        #[arg(short, long)]
        username: Option<String>,

        /// Account e-mail
        #[arg(short, long)]
        mail: Option<String>,

        /// Replace the existing entry for this website, or add it
        #[arg(long)]
        replace: bool,

        /// Generate a password of this length instead of prompting
        #[arg(long, value_name = "LEN", value_parser = clap::value_parser!(u16).range(i64::from(MIN_GENERATED_LEN)..))]
        auto_gen: Option<u16>,
    },

    /// Delete credentials
    Delete {
        /// Delete every entry for this website
        #[arg(short, long, required_unless_present = "all", conflicts_with = "all")]
        website: Option<String>,

        /// Delete every credential in the vault
        #[arg(long)]
        all: bool,
    },

    /// Show credentials in the pager, export them, or copy one
    Show {
        /// Only show this website
        #[arg(short, long)]
        website: Option<String>,

        /// Treat --website as a case-insensitive regular expression
        #[arg(short, long, requires = "website")]
        regex: bool,

        /// Close the pager after this many seconds
        #[arg(short = 'd', long, value_name = "SECS")]
        display_time: Option<u64>,

        /// Write a plaintext table to FILE instead of opening the pager
        #[arg(short, long, value_name = "FILE", conflicts_with = "paste")]
        output: Option<PathBuf>,

        /// Show passwords in clear in the pager
        #[arg(long)]
        show_password: bool,

        /// Copy the password of the matched website to the clipboard
        #[arg(short, long, requires = "website")]
        paste: bool,

        /// Maximum pager width in columns
        #[arg(long, value_name = "N")]
        width: Option<usize>,
    },

    /// Print a random password
    GeneratePassword {
        /// Password length (default: from config, 16)
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        length: Option<u16>,

        /// Include digits
        #[arg(short, long)]
        numbers: bool,

        /// Include special characters
        #[arg(short, long)]
        special: bool,
    },

    /// Re-encrypt the vault under a new master password
    ChangeMasterPassword,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum, ignore_case = true)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the master password, trying in order:
/// 1. `CREDVAULT_PASSWORD` env var (scripts)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(PASSWORD_ENV) {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// `env_var` is checked first for scripted use.  Enforces `min_len`.
pub fn prompt_new_password(env_var: &str, min_len: usize) -> Result<Zeroizing<String>> {
    if let Some(pw) = password_from_env(env_var) {
        check_length(&pw, min_len)?;
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if check_length(&password, min_len).is_err() {
            output::warning(&format!(
                "Password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

fn password_from_env(var: &str) -> Option<Zeroizing<String>> {
    std::env::var(var)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

fn check_length(password: &str, min_len: usize) -> Result<()> {
    if password.chars().count() < min_len {
        return Err(CredVaultError::CommandFailed(format!(
            "password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// The vault file to operate on: `--vault-file` wins over the config.
pub fn vault_path(cli: &Cli, settings: &Settings) -> PathBuf {
    cli.vault_file
        .clone()
        .unwrap_or_else(|| settings.vault_file.clone())
}
