//! CLI enum types for the sort command.

use clap::ValueEnum;
use ratiosort_core::config::ProbeBackend;
use ratiosort_core::{CollisionPolicy, OutputFormat};

/// Resolution probe backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProbeArg {
    /// Image header, then the external inspector
    Auto,
    /// Image header only
    Image,
    /// External inspector only (`file` by default)
    File,
}

impl From<ProbeArg> for ProbeBackend {
    fn from(arg: ProbeArg) -> Self {
        match arg {
            ProbeArg::Auto => ProbeBackend::Auto,
            ProbeArg::Image => ProbeBackend::Image,
            ProbeArg::File => ProbeBackend::File,
        }
    }
}

/// Name collision handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CollisionArg {
    /// Append _1, _2, ... until the name is free
    Increment,
    /// Append _1 once
    Single,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Increment => CollisionPolicy::Increment,
            CollisionArg::Single => CollisionPolicy::SingleSuffix,
        }
    }
}

/// Report file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl From<ReportFormat> for OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Json => OutputFormat::Json,
            ReportFormat::Jsonl => OutputFormat::JsonLines,
        }
    }
}
