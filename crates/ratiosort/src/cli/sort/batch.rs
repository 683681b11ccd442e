//! The per-file loop: progress bar, status lines, report, summary.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use console::style;
use ratiosort_core::{
    DiscoveredFile, FileOutcome, OutputWriter, SortRecord, SortStats, TransferMode,
};

use super::{SortArgs, SortContext};

/// Sort every discovered file in order.
///
/// Files are handled strictly one at a time. Transfer failures are reported
/// and counted; they never stop the run.
pub async fn run_batch(
    ctx: SortContext,
    args: &SortArgs,
    files: Vec<DiscoveredFile>,
) -> anyhow::Result<()> {
    let mut report = match &args.report {
        Some(path) => {
            let file = File::create(path)?;
            Some(OutputWriter::new(BufWriter::new(file), args.format.into(), true))
        }
        None => None,
    };

    let mode = ctx.sorter.options().mode;
    let progress = create_progress_bar(files.len() as u64);
    let mut stats = SortStats::default();
    let start_time = Instant::now();

    for file in &files {
        let outcome = ctx.sorter.process(&file.path).await;
        stats.record(&outcome);

        if let Some(line) = StatusLine::for_outcome(&file.file_name(), mode, &outcome) {
            progress.suspend(|| println!("{line}"));
        }

        if let Some(writer) = &mut report {
            writer.write(&SortRecord::from_outcome(file.path.clone(), &outcome))?;
        }

        progress.inc(1);
        let elapsed = start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            progress.set_message(format!("{:.1} img/sec", stats.total() as f64 / elapsed));
        }
    }

    progress.finish_and_clear();

    if let Some(writer) = report {
        let written = writer.items_written();
        writer.finish()?;
        if let Some(path) = &args.report {
            tracing::info!("Report with {} record(s) written to {:?}", written, path);
        }
    }

    println!("\nOperation Complete. Processed {} files.", stats.sorted);
    print_summary(&stats, ctx.sorter.options().dry_run, start_time.elapsed());

    Ok(())
}

/// One console line for a file that was sorted, would be sorted, or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLine {
    tag: Tag,
    body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Ok,
    Err,
    DryRun,
}

impl StatusLine {
    /// Rejected and unresolved files produce no line.
    pub(crate) fn for_outcome(
        name: &str,
        mode: TransferMode,
        outcome: &FileOutcome,
    ) -> Option<Self> {
        let verb = mode.verb();
        let line = match outcome {
            FileOutcome::Sorted(placement) => StatusLine {
                tag: Tag::Ok,
                body: format!("{name} -> {}", placement.directory().display()),
            },
            FileOutcome::DryRun(placement) => StatusLine {
                tag: Tag::DryRun,
                body: format!(
                    "Would {verb} {name} ({}) to {}",
                    placement.resolution,
                    placement.directory().display()
                ),
            },
            FileOutcome::Failed { error, .. } => StatusLine {
                tag: Tag::Err,
                body: format!("Failed to {verb} {name}: {}", error.cause()),
            },
            FileOutcome::Rejected { .. } | FileOutcome::Unresolved => return None,
        };
        Some(line)
    }

    /// The line without colour.
    pub(crate) fn plain(&self) -> String {
        format!("{} {}", self.tag.label(), self.body)
    }
}

impl Tag {
    fn label(self) -> &'static str {
        match self {
            Tag::Ok => "[OK]",
            Tag::Err => "[ERR]",
            Tag::DryRun => "[Dry-Run]",
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.tag {
            Tag::Ok => style(self.tag.label()).green(),
            Tag::Err => style(self.tag.label()).red().bold(),
            Tag::DryRun => style(self.tag.label()).yellow(),
        };
        write!(f, "{} {}", tag, self.body)
    }
}

/// Create a progress bar for the run.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    if let Ok(bar_style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(bar_style.progress_chars("##-"));
    }
    pb.set_message("scanning...");
    pb
}

/// Print the counts table to stderr.
fn print_summary(stats: &SortStats, dry_run: bool, elapsed: Duration) {
    let rate = if elapsed.as_secs_f64() > 0.0 {
        stats.total() as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };
    let sorted_label = if dry_run { "Would sort:" } else { "Sorted:" };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    {:<14}{:>8}", sorted_label, stats.sorted);
    eprintln!("    {:<14}{:>8}", "Rejected:", stats.rejected);
    if stats.unresolved > 0 {
        eprintln!("    {:<14}{:>8}", "Unresolved:", stats.unresolved);
    }
    if stats.failed > 0 {
        eprintln!("    {:<14}{:>8}", "Failed:", stats.failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    {:<14}{:>8}", "Skipped:", stats.skipped());
    eprintln!("    {:<14}{:>8}", "Total:", stats.total());
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
