//! Ratiosort Core - sort images into folders by aspect ratio and resolution.
//!
//! Every candidate image under a source tree is probed for its pixel
//! dimensions, checked against minimum width/height and a list of accepted
//! aspect ratios, and copied or moved into
//! `<dest>/Ratio_<label>/<tier>/`.
//!
//! # Architecture
//!
//! ```text
//! Discover → Probe → Classify → Plan destination → Copy/Move (or dry-run)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use ratiosort_core::{Config, ClassificationConfigBuilder, ProviderFactory, SortOptions, Sorter};
//!
//! #[tokio::main]
//! async fn main() -> ratiosort_core::Result<()> {
//!     let config = Config::load()?;
//!     let classification = ClassificationConfigBuilder::new(config.classification.clone()).build()?;
//!     let provider = ProviderFactory::create(config.probe.backend, &config.probe);
//!     let sorter = Sorter::new(provider, classification, SortOptions::default());
//!
//!     let outcome = sorter.process("./wallpaper.png".as_ref()).await;
//!     println!("{}", outcome.label());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod classify;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod presets;
pub mod types;

// Re-exports for convenient access
pub use classify::{
    classify, parse_ratio, ClassificationConfig, ClassificationConfigBuilder,
    ClassificationResult, RatioSpec, ResolutionTier,
};
pub use config::Config;
pub use error::{ConfigError, RatioSortError, Result, TransferError};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{
    CollisionPolicy, DiscoveredFile, FileDiscovery, ProviderFactory, ResolutionProvider,
    SortOptions, Sorter,
};
pub use presets::{Preset, PresetBook};
pub use types::{FileOutcome, Placement, Resolution, SortRecord, SortStats, TransferMode};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
