//! Sorter setup: config, preset, and CLI overrides resolved into one context.

use ratiosort_core::config::ProbeBackend;
use ratiosort_core::{
    ClassificationConfig, ClassificationConfigBuilder, Config, FileDiscovery, PresetBook,
    ProviderFactory, SortOptions, Sorter, TransferMode,
};

use super::{SortArgs, SortContext};

/// Validate input, load config and presets, and assemble everything needed
/// for the run. Any configuration problem aborts here, before a single file
/// is probed.
pub fn setup_sorter(args: &SortArgs) -> anyhow::Result<SortContext> {
    if !args.source.exists() {
        anyhow::bail!(
            "Source path does not exist: {:?}\n\n  Hint: Check the path and try again.",
            args.source
        );
    }

    let config = Config::load()?;
    let classification = build_classification(args, &config)?;

    let backend = args.probe.map(ProbeBackend::from).unwrap_or(config.probe.backend);
    let provider = ProviderFactory::create(backend, &config.probe);

    let options = SortOptions {
        destination: args
            .dest
            .clone()
            .unwrap_or_else(|| config.sort.destination.clone()),
        mode: if args.move_files {
            TransferMode::Move
        } else {
            config.sort.mode
        },
        collision: args.collision.map(Into::into).unwrap_or(config.sort.collision),
        dry_run: args.dry_run,
    };

    let sorter = Sorter::new(provider, classification, options);
    sorter.prepare()?;

    // The destination must exist (unless dry-run) before it is excluded, so
    // that it canonicalizes the same way as the walked directories.
    let discovery =
        FileDiscovery::new(config.discovery.clone()).exclude(&sorter.options().destination);

    Ok(SortContext {
        sorter,
        discovery,
        backend,
    })
}

/// Resolve config defaults, the optional preset, and explicit flags.
fn build_classification(args: &SortArgs, config: &Config) -> anyhow::Result<ClassificationConfig> {
    let mut builder = ClassificationConfigBuilder::new(config.classification.clone());

    if let Some(key) = &args.preset {
        let path = args
            .preset_file
            .clone()
            .unwrap_or_else(|| config.preset_file());
        let book = PresetBook::load(&path)?;
        let preset = book.get(key)?;
        tracing::info!("Using preset '{}' from {:?}", key, path);
        builder = builder.preset(preset.clone());
    }

    let classification = builder
        .min_width(args.width)
        .min_height(args.height)
        .ratios(args.ratios.clone())
        .tolerance(args.tolerance)
        .build()?;
    Ok(classification)
}
