//! `credvault show` — browse, export, or copy credentials.
//!
//! After the optional `--website` filter the matched records go to one of:
//! the clipboard (`--paste`), a plaintext table file (`--output`), or the
//! full-screen pager.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{prompt_password, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::pager;
use crate::vault::{self, render_table, Vault};

/// Arguments of the `show` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowArgs<'a> {
    pub website: Option<&'a str>,
    pub regex: bool,
    pub display_time: Option<u64>,
    pub output: Option<&'a Path>,
    pub show_password: bool,
    pub paste: bool,
    pub width: Option<usize>,
}

/// Execute the `show` command.
pub fn execute(cli: &Cli, settings: &Settings, args: &ShowArgs<'_>) -> Result<()> {
    let path = vault_path(cli, settings);
    let master = prompt_password()?;
    let mut vault = vault::decrypt(&master, &path)?;

    select(&mut vault, args.website, args.regex)?;

    if args.paste {
        return paste(&vault, args.regex);
    }

    if let Some(file) = args.output {
        let table = Zeroizing::new(render_table(&vault));
        write_private(file, table.as_bytes())?;
        output::success(&format!(
            "Wrote {} to {}",
            output::records(vault.len()),
            file.display()
        ));
        return Ok(());
    }

    let width = args.width.or(settings.display_width);
    let duration = args
        .display_time
        .or(settings.display_time)
        .map(Duration::from_secs);

    pager::display(&vault, width, duration, args.show_password)
}

/// Narrow `vault` to the requested website.
///
/// A pattern must match exactly one website; an exact name may match any
/// number of records.
fn select(vault: &mut Vault, website: Option<&str>, regex: bool) -> Result<()> {
    match website {
        Some(pattern) if regex => vault.filter_by_pattern(pattern),
        Some(name) => {
            vault.filter_exact(name);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Copy the first selected password to the system clipboard.
fn paste(vault: &Vault, regex: bool) -> Result<()> {
    let record = vault
        .first()
        .ok_or_else(|| CredVaultError::NoMatch("no password for the given website".into()))?;

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CredVaultError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(record.password.as_str())
        .map_err(|e| CredVaultError::ClipboardError(e.to_string()))?;

    if regex {
        output::info(&format!("For: {}", record.website));
    }
    output::success("Password copied to the clipboard");
    Ok(())
}

/// Create (or truncate) `path` readable by the owner only and write
/// `bytes` to it.
fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
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
    Ok(())
}
