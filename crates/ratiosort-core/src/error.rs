//! Error types for the ratiosort pipeline.
//!
//! Configuration errors are fatal and surface before any file is touched.
//! Transfer errors are per-file: they are reported and counted, and the run
//! moves on to the next file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for ratiosort operations.
#[derive(Error, Debug)]
pub enum RatioSortError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// A ratio token could not be turned into a positive number
    #[error("Invalid ratio format '{token}'. Use 'W:H' (e.g., 16:9) or a float.")]
    InvalidRatioFormat { token: String },

    /// The preset file does not exist
    #[error("Preset file not found: {}", path.display())]
    PresetFileMissing { path: PathBuf },

    /// The preset file exists but could not be read
    #[error("Failed to read preset file {}: {source}", path.display())]
    PresetFileRead { path: PathBuf, source: io::Error },

    /// The preset file is not valid TOML or has the wrong shape
    #[error("Failed to parse preset file {}: {source}", path.display())]
    PresetFileParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The requested preset key is not in the preset file
    #[error("Unknown preset '{key}' (available: {})", available.join(", "))]
    UnknownPreset { key: String, available: Vec<String> },
}

/// Why a copy or move into the destination tree failed.
///
/// Every variant carries the source, the planned destination and the
/// underlying I/O error so the failure can be diagnosed from the log alone.
#[derive(Error, Debug)]
pub enum TransferError {
    /// The process lacks permission to read the source or write the destination
    #[error("permission denied ({} -> {}): {cause}", source_path.display(), destination.display())]
    PermissionDenied {
        source_path: PathBuf,
        destination: PathBuf,
        cause: io::Error,
    },

    /// The destination filesystem is full
    #[error("no space left on device ({} -> {}): {cause}", source_path.display(), destination.display())]
    NoSpace {
        source_path: PathBuf,
        destination: PathBuf,
        cause: io::Error,
    },

    /// The source disappeared between discovery and transfer
    #[error("source vanished ({} -> {}): {cause}", source_path.display(), destination.display())]
    SourceVanished {
        source_path: PathBuf,
        destination: PathBuf,
        cause: io::Error,
    },

    /// Something was created at the destination after planning
    #[error("destination already exists ({} -> {}): {cause}", source_path.display(), destination.display())]
    DestinationExists {
        source_path: PathBuf,
        destination: PathBuf,
        cause: io::Error,
    },

    /// Any other I/O failure
    #[error("{} -> {}: {cause}", source_path.display(), destination.display())]
    Io {
        source_path: PathBuf,
        destination: PathBuf,
        cause: io::Error,
    },
}

impl TransferError {
    /// Classify an I/O error raised while transferring `source` to `destination`.
    pub fn classify(source: PathBuf, destination: PathBuf, cause: io::Error) -> Self {
        match cause.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                source_path: source,
                destination,
                cause,
            },
            io::ErrorKind::StorageFull => Self::NoSpace {
                source_path: source,
                destination,
                cause,
            },
            io::ErrorKind::AlreadyExists => Self::DestinationExists {
                source_path: source,
                destination,
                cause,
            },
            io::ErrorKind::NotFound if !source.exists() => Self::SourceVanished {
                source_path: source,
                destination,
                cause,
            },
            _ => Self::Io {
                source_path: source,
                destination,
                cause,
            },
        }
    }

    /// Short machine-friendly name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PermissionDenied { .. } => "permission_denied",
            Self::NoSpace { .. } => "no_space",
            Self::SourceVanished { .. } => "source_vanished",
            Self::DestinationExists { .. } => "destination_exists",
            Self::Io { .. } => "io",
        }
    }

    /// The underlying I/O error.
    pub fn cause(&self) -> &io::Error {
        match self {
            Self::PermissionDenied { cause, .. }
            | Self::NoSpace { cause, .. }
            | Self::SourceVanished { cause, .. }
            | Self::DestinationExists { cause, .. }
            | Self::Io { cause, .. } => cause,
        }
    }
}

/// Convenience type alias for ratiosort results.
pub type Result<T> = std::result::Result<T, RatioSortError>;
