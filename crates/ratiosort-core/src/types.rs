//! Core data types shared by the sorting pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::classify::ResolutionTier;
use crate::error::TransferError;

/// Pixel dimensions of an image. Both axes are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// Build a resolution, returning `None` if either axis is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// The shorter of the two axes.
    pub fn short_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Whether matched files are copied or moved into the destination tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Copy, preserving permissions and timestamps (default)
    #[default]
    Copy,
    /// Move, removing the original
    Move,
}

impl TransferMode {
    /// Verb used in console lines ("copy" / "move").
    pub fn verb(self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// What happened to one candidate file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Matched and transferred into the destination tree
    Sorted(Placement),
    /// Matched; the transfer was suppressed by dry-run
    DryRun(Placement),
    /// Resolution found but it did not meet the criteria
    Rejected { resolution: Resolution },
    /// No resolution could be determined
    Unresolved,
    /// Matched, but the copy/move failed
    Failed {
        placement: Placement,
        error: TransferError,
    },
}

impl FileOutcome {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            FileOutcome::Sorted(_) => "sorted",
            FileOutcome::DryRun(_) => "dry_run",
            FileOutcome::Rejected { .. } => "rejected",
            FileOutcome::Unresolved => "unresolved",
            FileOutcome::Failed { .. } => "failed",
        }
    }

    /// Placement details for matched files.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            FileOutcome::Sorted(p) | FileOutcome::DryRun(p) => Some(p),
            FileOutcome::Failed { placement, .. } => Some(placement),
            FileOutcome::Rejected { .. } | FileOutcome::Unresolved => None,
        }
    }
}

/// Where a matched file goes, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Detected resolution
    pub resolution: Resolution,
    /// Matched ratio label (e.g. "16x9")
    pub ratio_label: String,
    /// Resolution tier of the image
    pub tier: ResolutionTier,
    /// Planned destination file path
    pub destination: PathBuf,
}

impl Placement {
    /// Directory the file lands in.
    pub fn directory(&self) -> PathBuf {
        self.destination
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default()
    }
}

/// Running counters for a sort run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortStats {
    /// Files transferred (or that would be, in dry-run)
    pub sorted: u64,
    /// Files with a resolution that failed the criteria
    pub rejected: u64,
    /// Files whose resolution could not be determined
    pub unresolved: u64,
    /// Files whose transfer failed
    pub failed: u64,
}

impl SortStats {
    /// Count one outcome.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Sorted(_) | FileOutcome::DryRun(_) => self.sorted += 1,
            FileOutcome::Rejected { .. } => self.rejected += 1,
            FileOutcome::Unresolved => self.unresolved += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Files that were looked at but not sorted, excluding failures.
    pub fn skipped(&self) -> u64 {
        self.rejected + self.unresolved
    }

    /// Every file examined.
    pub fn total(&self) -> u64 {
        self.sorted + self.rejected + self.unresolved + self.failed
    }
}

/// One line of the optional sort report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SortRecord {
    /// Source file path
    pub source: PathBuf,

    /// Outcome label ("sorted", "dry_run", "rejected", "unresolved", "failed")
    pub outcome: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Matched ratio label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<String>,

    /// Resolution tier label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    /// Planned destination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    /// Transfer failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SortRecord {
    /// Build a report record from a source path and its outcome.
    pub fn from_outcome(source: PathBuf, outcome: &FileOutcome) -> Self {
        let mut record = SortRecord {
            source,
            outcome: outcome.label().to_string(),
            width: None,
            height: None,
            ratio: None,
            tier: None,
            destination: None,
            error: None,
        };

        if let FileOutcome::Rejected { resolution } = outcome {
            record.width = Some(resolution.width());
            record.height = Some(resolution.height());
        }

        if let Some(placement) = outcome.placement() {
            record.width = Some(placement.resolution.width());
            record.height = Some(placement.resolution.height());
            record.ratio = Some(placement.ratio_label.clone());
            record.tier = Some(placement.tier.to_string());
            record.destination = Some(placement.destination.clone());
        }

        if let FileOutcome::Failed { error, .. } = outcome {
            record.error = Some(error.to_string());
        }

        record
    }
}
