//! User configuration.
//!
//! Read once at startup from `<config_dir>/mailform/config.json`. Every
//! field has a default, so a missing file or a partial one is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template file; relative paths resolve against the working directory.
    pub templates_file: PathBuf,
    /// From address. Defaults to `<user>@localhost`.
    pub sender: Option<String>,
    /// How finished messages reach the mail client.
    pub transport: TransportConfig,
    /// Use the dark palette.
    pub dark_mode: bool,
}

/// Mail hand-off configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportConfig {
    /// Pipe into the local sendmail-compatible program.
    Sendmail {
        /// Program to run instead of the platform default.
        #[serde(default)]
        command: Option<PathBuf>,
    },
    /// Drop `.eml` files into a directory.
    Outbox {
        /// Target directory.
        directory: PathBuf,
    },
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::Sendmail { command: None }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_file: PathBuf::from(Self::DEFAULT_TEMPLATES_FILE),
            sender: None,
            transport: TransportConfig::default(),
            dark_mode: false,
        }
    }
}

impl Config {
    /// Template file used when none is configured.
    pub const DEFAULT_TEMPLATES_FILE: &'static str = "email_templates.json";

    /// Default location of the configuration file.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mailform")
            .join("config.json")
    }

    /// Loads the configuration from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path())
    }

    /// Loads the configuration from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// The From address to send as.
    #[must_use]
    pub fn sender(&self) -> String {
        self.sender
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(default_sender, str::to_string)
    }
}

fn default_sender() -> String {
    let user: String = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if user.is_empty() {
        "mailform@localhost".to_string()
    } else {
        format!("{user}@localhost")
    }
}
