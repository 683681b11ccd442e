//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::classify::DEFAULT_TOLERANCE;
use crate::pipeline::planner::CollisionPolicy;
use crate::types::TransferMode;

/// Baseline classification criteria, before presets and CLI overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationSettings {
    /// Minimum width in pixels
    pub min_width: u32,

    /// Minimum height in pixels
    pub min_height: u32,

    /// Target aspect ratios, first match wins ("16:9" or "1.778")
    pub ratios: Vec<String>,

    /// Absolute tolerance on the ratio scale
    pub tolerance: f64,
}

impl Default for ClassificationSettings {
    fn default() -> Self {
        Self {
            min_width: 2560,
            min_height: 1440,
            ratios: vec!["16:9".to_string()],
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Which files the directory walk picks up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Recognized image extensions (case-insensitive, no dot)
    pub extensions: Vec<String>,

    /// Skip files whose name contains "thumbnail"
    pub skip_thumbnails: bool,

    /// Skip directories whose name starts with '.'
    pub skip_hidden_dirs: bool,

    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png", "webp", "bmp", "gif", "tiff"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            skip_thumbnails: true,
            skip_hidden_dirs: true,
            follow_links: false,
        }
    }
}

/// How image dimensions are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeBackend {
    /// Read the image header, fall back to the external inspector
    #[default]
    Auto,
    /// Read the image header only
    Image,
    /// Shell out to the external inspector only
    File,
}

impl fmt::Display for ProbeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeBackend::Auto => write!(f, "auto"),
            ProbeBackend::Image => write!(f, "image"),
            ProbeBackend::File => write!(f, "file"),
        }
    }
}

/// Resolution probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Probe backend: "auto", "image" or "file"
    pub backend: ProbeBackend,

    /// External inspector program, invoked as `<command> <path>`
    pub command: String,

    /// Kill the inspector after this many milliseconds
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            backend: ProbeBackend::Auto,
            command: "file".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Where and how matched files are placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Destination root for the sorted tree
    pub destination: PathBuf,

    /// "copy" or "move"
    pub mode: TransferMode,

    /// "increment" (name_1, name_2, ...) or "single" (name_1 only)
    pub collision: CollisionPolicy,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("Sorted_Images"),
            mode: TransferMode::Copy,
            collision: CollisionPolicy::Increment,
        }
    }
}

/// Preset file location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetsConfig {
    /// Path to the preset file (supports ~). Defaults to presets.toml
    /// next to config.toml.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
