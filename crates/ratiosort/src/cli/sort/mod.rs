//! The `ratiosort sort` command.

mod batch;
mod setup;
pub mod types;

pub use types::{CollisionArg, ProbeArg, ReportFormat};

use clap::Args;
use ratiosort_core::config::ProbeBackend;
use ratiosort_core::{FileDiscovery, Sorter};
use std::path::PathBuf;

use batch::run_batch;
use setup::setup_sorter;

/// Arguments for the `sort` command.
#[derive(Args, Debug)]
pub struct SortArgs {
    /// Source directory to scan (recursive), or a single image
    #[arg(long, default_value = ".")]
    pub source: PathBuf,

    /// Destination directory [default: `sort.destination` from config]
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Minimum width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Minimum height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Target aspect ratios, e.g. `16:9 32:9 1.5`. The first match wins.
    #[arg(long, num_args = 1..)]
    pub ratios: Option<Vec<String>>,

    /// Maximum absolute difference between image and target ratio
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Named preset supplying width/height/ratios defaults
    #[arg(long)]
    pub preset: Option<String>,

    /// Preset file [default: `presets.file` from config, else presets.toml next to config.toml]
    #[arg(long, requires = "preset")]
    pub preset_file: Option<PathBuf>,

    /// Move files instead of copying them
    #[arg(long = "move")]
    pub move_files: bool,

    /// Show what would happen without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Resolution probe backend [default: `probe.backend` from config]
    #[arg(long, value_enum)]
    pub probe: Option<ProbeArg>,

    /// Name collision handling [default: `sort.collision` from config]
    #[arg(long, value_enum)]
    pub collision: Option<CollisionArg>,

    /// Write a per-file report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "jsonl")]
    pub format: ReportFormat,
}

impl Default for SortArgs {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            dest: None,
            width: None,
            height: None,
            ratios: None,
            tolerance: None,
            preset: None,
            preset_file: None,
            move_files: false,
            dry_run: false,
            probe: None,
            collision: None,
            report: None,
            format: ReportFormat::Jsonl,
        }
    }
}

/// Everything assembled by `setup_sorter()` before the first file is read.
pub(crate) struct SortContext {
    pub sorter: Sorter,
    pub discovery: FileDiscovery,
    pub backend: ProbeBackend,
}

/// Execute the sort command.
pub async fn execute(args: SortArgs) -> anyhow::Result<()> {
    let ctx = setup_sorter(&args)?;
    print_criteria(&ctx, &args);

    let files = ctx.discovery.discover(&args.source);
    if files.is_empty() {
        tracing::warn!("No supported image files found at {:?}", args.source);
    } else {
        tracing::info!(
            "Found {} image(s), {:.1} MB",
            files.len(),
            FileDiscovery::total_size(&files) as f64 / 1_000_000.0
        );
    }

    run_batch(ctx, &args, files).await
}

/// Echo the effective run settings before scanning.
fn print_criteria(ctx: &SortContext, args: &SortArgs) {
    let classification = ctx.sorter.classification();
    let options = ctx.sorter.options();
    let ratios: Vec<&str> = classification.ratios().iter().map(|r| r.token()).collect();
    let action = match (options.dry_run, options.mode) {
        (true, mode) => format!("Dry run (would {mode})"),
        (false, ratiosort_core::TransferMode::Copy) => "Copying".to_string(),
        (false, ratiosort_core::TransferMode::Move) => "Moving".to_string(),
    };

    println!("Scanning '{}'...", args.source.display());
    println!(
        "Criteria: Resolution >= {}x{}",
        classification.min_width(),
        classification.min_height()
    );
    println!(
        "Target Ratios: [{}] (Tolerance: +/- {})",
        ratios.join(", "),
        classification.tolerance()
    );
    println!("Action: {action} to '{}'", options.destination.display());
    println!();
    tracing::debug!(
        "Probe backend: {}, collisions: {}",
        ctx.backend,
        options.collision
    );
}
