//! Configuration management for ratiosort.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every section implements `Default`, so a partial file (or no file
//! at all) is fine.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default classification criteria
    pub classification: ClassificationSettings,

    /// Directory walk settings
    pub discovery: DiscoveryConfig,

    /// Resolution probe settings
    pub probe: ProbeConfig,

    /// Destination settings
    pub sort: SortConfig,

    /// Preset file location
    pub presets: PresetsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.ratiosort.ratiosort/config.toml
    /// - Linux: ~/.config/ratiosort/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\ratiosort\config\config.toml
    ///
    /// Falls back to ~/.ratiosort/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "ratiosort", "ratiosort")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".ratiosort").join("config.toml")
            })
    }

    /// Resolved preset file path (with ~ expansion).
    ///
    /// Falls back to `presets.toml` in the same directory as the config file.
    pub fn preset_file(&self) -> PathBuf {
        match &self.presets.file {
            Some(file) => PathBuf::from(shellexpand::tilde(file).into_owned()),
            None => Self::default_path()
                .parent()
                .map(|dir| dir.join("presets.toml"))
                .unwrap_or_else(|| PathBuf::from("presets.toml")),
        }
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
