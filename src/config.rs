//! Application configuration with persistence.
//!
//! The only setting today is the analyzer API base URL. Resolution order,
//! highest precedence first: CLI flag, `LAZYDAG_API_URL` environment
//! variable, config file, built-in default.
//!
//! # Configuration File Location
//!
//! - Linux: `~/.config/lazydag/config.json`
//! - macOS: `~/Library/Application Support/lazydag/config.json`
//! - Windows: `%APPDATA%/lazydag/config.json`

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{API_URL_ENV, DEFAULT_API_URL};

// ============================================================================
// Constants
// ============================================================================

/// Application name used for the configuration directory.
const APP_NAME: &str = "lazydag";

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

// ============================================================================
// AppConfig
// ============================================================================

/// Persisted application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Analyzer API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

impl AppConfig {
    /// Returns the path to the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration directory cannot be determined
    /// or created.
    pub fn config_path() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;
        path.push(APP_NAME);
        fs::create_dir_all(&path)?;
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Loads the configuration from disk, falling back to defaults if the
    /// file is absent or unparsable.
    #[must_use]
    pub fn load() -> Self {
        Self::try_load().unwrap_or_default()
    }

    /// Attempts to load the configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined, the file cannot
    /// be read, or the JSON cannot be parsed.
    pub fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        let content = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves the configuration to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file cannot
    /// be written.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the effective API URL from a CLI flag, the environment, and
    /// the loaded configuration.
    #[must_use]
    pub fn resolve_api_url(&self, cli_flag: Option<&str>) -> String {
        if let Some(url) = cli_flag {
            return url.to_string();
        }
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }
        self.api_url.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
