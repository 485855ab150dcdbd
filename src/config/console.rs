//! Console display settings loaded from console.toml
//!
//! Every key is optional: a missing file or a missing key falls back to the
//! defaults below, so a fresh checkout runs without any configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "CONSOLE_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "console.toml";

/// Configuration structure representing the entire console.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// How figures and lists are rendered
    pub display: DisplayConfig,
}

/// Rendering preferences
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Prefix printed before monetary amounts
    pub currency_symbol: String,
    /// How many audit actions the detail view shows (0 shows all)
    pub recent_actions_limit: usize,
    /// `chrono` format string for dates
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            recent_actions_limit: 10,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl DisplayConfig {
    /// The action limit as an option, with 0 meaning "no limit".
    #[must_use]
    pub const fn action_limit(&self) -> Option<usize> {
        match self.recent_actions_limit {
            0 => None,
            limit => Some(limit),
        }
    }
}

/// Loads console configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or its TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConsoleConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses console configuration from TOML text
pub fn parse_config(contents: &str) -> Result<ConsoleConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse console.toml: {e}"),
    })
}

/// Loads configuration from `CONSOLE_CONFIG` or `./console.toml`.
///
/// A missing file is not an error: the defaults are returned instead.
pub fn load_default_config() -> Result<ConsoleConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&path).exists() {
        info!("No configuration file at {path}; using defaults.");
        return Ok(ConsoleConfig::default());
    }

    load_config(path)
}
