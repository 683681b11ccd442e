//! Ratiosort CLI - sort images into folders by aspect ratio and resolution.
//!
//! Matching images are copied (or moved) into
//! `<dest>/Ratio_<label>/<tier>/`, e.g. `Sorted_Images/Ratio_16x9/4K_UHD/`.
//!
//! # Usage
//!
//! ```bash
//! # Sort the current directory with the defaults (16:9, at least 2560x1440)
//! ratiosort sort
//!
//! # Ultrawide wallpapers, moved rather than copied
//! ratiosort sort --source ~/Pictures --ratios 21:9 32:9 --height 1440 --move
//!
//! # Preview only
//! ratiosort sort --preset wallpaper-4k --dry-run
//!
//! # Inspect a few files
//! ratiosort probe a.jpg b.png
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Ratiosort - sort images by resolution and aspect ratio.
#[derive(Parser, Debug)]
#[command(name = "ratiosort")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Sort images from a source tree into ratio/tier folders
    Sort(cli::sort::SortArgs),

    /// Print resolution, ratio and tier for individual files
    Probe(cli::probe::ProbeArgs),

    /// List and locate classification presets
    Presets(cli::presets::PresetsArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match ratiosort_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `ratiosort config path`."
            );
            ratiosort_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Ratiosort v{}", ratiosort_core::VERSION);

    match cli.command {
        Commands::Sort(args) => cli::sort::execute(args).await,
        Commands::Probe(args) => cli::probe::execute(args, &config).await,
        Commands::Presets(args) => cli::presets::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
