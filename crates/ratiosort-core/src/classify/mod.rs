//! Resolution and aspect-ratio classification.
//!
//! - **ratio**: parse ratio tokens into [`RatioSpec`]s
//! - **tier**: bucket a resolution into a [`ResolutionTier`]
//! - **builder**: layer config defaults, a preset and explicit overrides into
//!   one immutable [`ClassificationConfig`]

mod builder;
pub mod ratio;
pub mod tier;

pub use builder::ClassificationConfigBuilder;
pub use ratio::{parse_ratio, RatioSpec};
pub use tier::ResolutionTier;

use serde::Serialize;

use crate::error::ConfigError;
use crate::types::Resolution;

/// Default absolute tolerance on the ratio scale.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Per-run classification settings. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationConfig {
    min_width: u32,
    min_height: u32,
    ratios: Vec<RatioSpec>,
    tolerance: f64,
}

impl ClassificationConfig {
    /// Create a config, rejecting an empty ratio list or a non-positive tolerance.
    pub fn new(
        min_width: u32,
        min_height: u32,
        ratios: Vec<RatioSpec>,
        tolerance: f64,
    ) -> Result<Self, ConfigError> {
        if ratios.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one target ratio is required".into(),
            ));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "ratio tolerance must be a positive number (got {tolerance})"
            )));
        }
        Ok(Self {
            min_width,
            min_height,
            ratios,
            tolerance,
        })
    }

    pub fn min_width(&self) -> u32 {
        self.min_width
    }

    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    /// Target ratios in priority order.
    pub fn ratios(&self) -> &[RatioSpec] {
        &self.ratios
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Both axes meet their minimum. Width is compared to width and height
    /// to height; portrait images are not swapped.
    pub fn meets_minimum(&self, res: Resolution) -> bool {
        res.width() >= self.min_width && res.height() >= self.min_height
    }

    /// The first configured ratio within tolerance of `ratio`.
    pub fn matching_ratio(&self, ratio: f64) -> Option<&RatioSpec> {
        self.ratios
            .iter()
            .find(|spec| spec.matches(ratio, self.tolerance))
    }
}

/// Outcome of classifying one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationResult {
    /// Passed both checks
    Matched {
        /// Matched ratio label, e.g. `16x9`
        ratio_label: String,
        /// Tier of the image
        tier: ResolutionTier,
    },
    /// Failed the resolution check, the ratio check, or both
    Rejected,
}

/// Decide whether an image with `res` belongs in the sorted tree.
pub fn classify(res: Resolution, config: &ClassificationConfig) -> ClassificationResult {
    let high_res = config.meets_minimum(res);
    let matched = config.matching_ratio(res.aspect_ratio());

    match matched {
        Some(spec) if high_res => ClassificationResult::Matched {
            ratio_label: spec.label(),
            tier: ResolutionTier::from(res),
        },
        _ => ClassificationResult::Rejected,
    }
}
