//! Named classification presets loaded from a TOML file.
//!
//! ```toml
//! [wallpaper-4k]
//! width = 3840
//! height = 2160
//! ratios = ["16:9"]
//! description = "Desktop wallpapers at 4K and above"
//!
//! [ultrawide]
//! ratios = ["21:9", "32:9"]
//! ```
//!
//! Every field is optional; fields a preset leaves out keep the value from
//! the config file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ConfigError;

/// One named bundle of classification defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preset {
    /// Minimum width override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Minimum height override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Target ratio override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratios: Option<Vec<String>>,

    /// Human-readable summary shown by `presets list`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// All presets from one file, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetBook {
    presets: BTreeMap<String, Preset>,
}

impl PresetBook {
    /// Load presets from a TOML file.
    ///
    /// A missing or malformed file is a configuration error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PresetFileMissing {
                path: path.to_path_buf(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::PresetFileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let book = Self::parse(&content).map_err(|source| ConfigError::PresetFileParse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded {} preset(s) from {:?}", book.len(), path);
        Ok(book)
    }

    /// Parse presets from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let presets: BTreeMap<String, Preset> = toml::from_str(content)?;
        Ok(Self { presets })
    }

    /// Look up a preset by name, ignoring case.
    pub fn get(&self, key: &str) -> Result<&Preset, ConfigError> {
        let wanted = key.to_lowercase();
        self.presets
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, preset)| preset)
            .ok_or_else(|| ConfigError::UnknownPreset {
                key: key.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Iterate `(name, preset)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.presets.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
