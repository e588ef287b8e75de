use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{CredVaultError, Result};

/// User-level configuration, loaded from `<config dir>/credvault/config.toml`.
///
/// Every field has a default, so no config file is needed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Encrypted vault used when `--vault-file` is not given.
    #[serde(default = "default_vault_file")]
    pub vault_file: PathBuf,

    /// Maximum pager width in columns (`None` = terminal width).
    #[serde(default)]
    pub display_width: Option<usize>,

    /// Seconds before the pager closes itself (`None` = until `q`).
    #[serde(default)]
    pub display_time: Option<u64>,

    /// Shortest master password accepted when choosing a new one.
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Length used by `generate-password` when `--length` is omitted.
    #[serde(default = "default_generated_length")]
    pub generated_length: usize,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(Settings::APP_DIR)
        .join("credentials.vault")
}

fn default_min_password_length() -> usize {
    8
}

fn default_generated_length() -> usize {
    16
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            display_width: None,
            display_time: None,
            min_password_length: default_min_password_length(),
            generated_length: default_generated_length(),
        }
    }
}

impl Settings {
    /// Per-user directory name under the platform config/data dirs.
    const APP_DIR: &'static str = "credvault";

    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// `<platform config dir>/credvault`, if the platform has one.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::APP_DIR))
    }

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// A missing file yields the defaults; a file that does not parse is
    /// a `ConfigError`.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            CredVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Load from the platform config directory, or use defaults when
    /// there is none.
    pub fn load_default() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load(&dir),
            None => Ok(Self::default()),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
