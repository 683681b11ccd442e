//! Pipeline orchestration - probe, classify, plan, transfer.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::classify::{classify, ClassificationConfig, ClassificationResult};
use crate::error::{self, TransferError};
use crate::types::{FileOutcome, Placement, TransferMode};

use super::planner::{plan, CollisionPolicy};
use super::probe::ResolutionProvider;
use super::transfer::transfer;

/// Options for where and how matched files are placed.
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Destination root
    pub destination: PathBuf,
    /// Copy or move
    pub mode: TransferMode,
    /// Name collision handling
    pub collision: CollisionPolicy,
    /// Classify and plan only, touch nothing
    pub dry_run: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            destination: PathBuf::from("Sorted_Images"),
            mode: TransferMode::Copy,
            collision: CollisionPolicy::Increment,
            dry_run: false,
        }
    }
}

/// Runs one file at a time through the sorting pipeline.
pub struct Sorter {
    provider: Box<dyn ResolutionProvider>,
    classification: ClassificationConfig,
    options: SortOptions,
    /// Destinations handed out during a dry run, which never reach the disk.
    planned: Mutex<HashSet<PathBuf>>,
}

impl Sorter {
    /// Create a sorter. The classification config is fixed for its lifetime.
    pub fn new(
        provider: Box<dyn ResolutionProvider>,
        classification: ClassificationConfig,
        options: SortOptions,
    ) -> Self {
        Self {
            provider,
            classification,
            options,
            planned: Mutex::new(HashSet::new()),
        }
    }

    pub fn classification(&self) -> &ClassificationConfig {
        &self.classification
    }

    pub fn options(&self) -> &SortOptions {
        &self.options
    }

    /// Create the destination root unless this is a dry run.
    pub fn prepare(&self) -> error::Result<()> {
        if self.options.dry_run {
            return Ok(());
        }
        std::fs::create_dir_all(&self.options.destination)?;
        Ok(())
    }

    /// Sort a single file.
    ///
    /// Never fails as a whole: probe failures become
    /// [`FileOutcome::Unresolved`] and transfer failures become
    /// [`FileOutcome::Failed`].
    pub async fn process(&self, path: &Path) -> FileOutcome {
        let start = std::time::Instant::now();
        tracing::debug!("Processing: {:?}", path);

        let Some(resolution) = self.provider.probe(path).await else {
            tracing::debug!("No resolution found for {:?}", path);
            return FileOutcome::Unresolved;
        };
        tracing::trace!("  Probe ({}): {:?}", self.provider.name(), start.elapsed());

        let (ratio_label, tier) = match classify(resolution, &self.classification) {
            ClassificationResult::Matched { ratio_label, tier } => (ratio_label, tier),
            ClassificationResult::Rejected => {
                tracing::debug!("Rejected {:?} ({})", path, resolution);
                return FileOutcome::Rejected { resolution };
            }
        };

        let Some(file_name) = path.file_name() else {
            tracing::debug!("No file name for {:?}", path);
            return FileOutcome::Unresolved;
        };

        if self.options.dry_run {
            let mut planned = self.planned.lock().unwrap_or_else(|e| e.into_inner());
            let destination = plan(
                &self.options.destination,
                &ratio_label,
                tier,
                Path::new(file_name),
                self.options.collision,
                |candidate| candidate.exists() || planned.contains(candidate),
            );
            planned.insert(destination.clone());
            return FileOutcome::DryRun(Placement {
                resolution,
                ratio_label,
                tier,
                destination,
            });
        }

        let destination = plan(
            &self.options.destination,
            &ratio_label,
            tier,
            Path::new(file_name),
            self.options.collision,
            |candidate| candidate.exists(),
        );

        let placement = Placement {
            resolution,
            ratio_label,
            tier,
            destination,
        };

        match self.transfer(path, &placement.destination).await {
            Ok(()) => {
                tracing::debug!(
                    "Sorted {:?} -> {:?} in {:?}",
                    path,
                    placement.destination,
                    start.elapsed()
                );
                FileOutcome::Sorted(placement)
            }
            Err(error) => {
                tracing::debug!(
                    source = ?path,
                    destination = ?placement.destination,
                    kind = error.kind(),
                    "Failed to {} file: {}",
                    self.options.mode,
                    error.cause()
                );
                FileOutcome::Failed { placement, error }
            }
        }
    }

    async fn transfer(&self, source: &Path, destination: &Path) -> Result<(), TransferError> {
        let mode = self.options.mode;
        let src = source.to_path_buf();
        let dst = destination.to_path_buf();
        tokio::task::spawn_blocking(move || transfer(&src, &dst, mode))
            .await
            .unwrap_or_else(|e| {
                Err(TransferError::Io {
                    source_path: source.to_path_buf(),
                    destination: destination.to_path_buf(),
                    cause: io::Error::other(format!("transfer task failed: {e}")),
                })
            })
    }
}
