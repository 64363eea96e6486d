//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/phonebook/config.toml)
//! 3. Environment variables (PHONEBOOK_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::source::DEFAULT_SOURCE_URL;

/// Environment variable prefix
const ENV_PREFIX: &str = "PHONEBOOK";

/// Default number of contacts fetched by "randomize"
const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Endpoint for sample contacts
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Number of sample contacts per fetch
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Log file for TUI mode (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            source_url: default_source_url(),
            sample_size: default_sample_size(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (PHONEBOOK_DATA_DIR, PHONEBOOK_SOURCE_URL, PHONEBOOK_SAMPLE_SIZE)
    /// 2. Config file (~/.config/phonebook/config.toml or PHONEBOOK_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // PHONEBOOK_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // PHONEBOOK_SOURCE_URL
        if let Ok(val) = std::env::var(format!("{}_SOURCE_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.source_url = val;
            }
        }

        // PHONEBOOK_SAMPLE_SIZE
        if let Ok(val) = std::env::var(format!("{}_SAMPLE_SIZE", ENV_PREFIX)) {
            self.sample_size = val
                .parse()
                .with_context(|| format!("Invalid {}_SAMPLE_SIZE: {}", ENV_PREFIX, val))?;
        }

        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with PHONEBOOK_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("phonebook")
            .join("config.toml")
    }

    /// Directory backing the key-value storage
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("local_storage")
    }

    /// Log file used in TUI mode
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("phonebook")
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}
