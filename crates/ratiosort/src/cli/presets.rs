//! The `ratiosort presets` command.

use clap::{Args, Subcommand};
use ratiosort_core::{Config, Preset, PresetBook};
use std::path::PathBuf;

/// Arguments for the `presets` command.
#[derive(Args, Debug)]
pub struct PresetsArgs {
    #[command(subcommand)]
    pub command: PresetsCommand,
}

/// Subcommands for preset inspection.
#[derive(Subcommand, Debug)]
pub enum PresetsCommand {
    /// List presets and the criteria they set
    List {
        /// Preset file [default: `presets.file` from config, else presets.toml next to config.toml]
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show the preset file path
    Path,
}

/// Execute the presets command.
pub async fn execute(args: PresetsArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { file } => {
            let path = file.unwrap_or_else(|| config.preset_file());
            let book = PresetBook::load(&path)?;
            if book.is_empty() {
                println!("No presets defined in {}", path.display());
                return Ok(());
            }
            for (name, preset) in book.iter() {
                println!("{}", describe(name, preset));
            }
        }

        PresetsCommand::Path => {
            println!("{}", config.preset_file().display());
        }
    }

    Ok(())
}

/// One listing line: name, the fields the preset sets, and its description.
fn describe(name: &str, preset: &Preset) -> String {
    let mut parts = Vec::new();
    match (preset.width, preset.height) {
        (Some(w), Some(h)) => parts.push(format!(">= {w}x{h}")),
        (Some(w), None) => parts.push(format!("width >= {w}")),
        (None, Some(h)) => parts.push(format!("height >= {h}")),
        (None, None) => {}
    }
    if let Some(ratios) = &preset.ratios {
        parts.push(format!("ratios {}", ratios.join(" ")));
    }

    let mut line = format!("{name:<20} {}", parts.join(", "));
    if let Some(description) = &preset.description {
        line.push_str(&format!("  # {description}"));
    }
    line.trim_end().to_string()
}
