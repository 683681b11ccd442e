//! Layered construction of [`ClassificationConfig`].
//!
//! Layers are applied in a fixed order at [`build`](ClassificationConfigBuilder::build),
//! no matter the order the setters were called in:
//!
//! 1. config-file defaults (`[classification]`)
//! 2. the selected preset, if any
//! 3. explicit per-run values

use crate::config::ClassificationSettings;
use crate::error::Result;
use crate::presets::Preset;

use super::{ClassificationConfig, RatioSpec};

/// Collects the three configuration layers and resolves them once.
#[derive(Debug, Clone, Default)]
pub struct ClassificationConfigBuilder {
    defaults: ClassificationSettings,
    preset: Option<Preset>,
    min_width: Option<u32>,
    min_height: Option<u32>,
    ratios: Option<Vec<String>>,
    tolerance: Option<f64>,
}

impl ClassificationConfigBuilder {
    /// Start from the given defaults.
    pub fn new(defaults: ClassificationSettings) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Layer a preset over the defaults.
    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    /// Explicit minimum width. `None` leaves the lower layers in effect.
    pub fn min_width(mut self, width: Option<u32>) -> Self {
        if width.is_some() {
            self.min_width = width;
        }
        self
    }

    /// Explicit minimum height.
    pub fn min_height(mut self, height: Option<u32>) -> Self {
        if height.is_some() {
            self.min_height = height;
        }
        self
    }

    /// Explicit ratio list. An empty list counts as not given.
    pub fn ratios(mut self, ratios: Option<Vec<String>>) -> Self {
        if let Some(ratios) = ratios.filter(|r| !r.is_empty()) {
            self.ratios = Some(ratios);
        }
        self
    }

    /// Explicit ratio tolerance.
    pub fn tolerance(mut self, tolerance: Option<f64>) -> Self {
        if tolerance.is_some() {
            self.tolerance = tolerance;
        }
        self
    }

    /// Resolve all layers and parse the ratio tokens.
    ///
    /// Fails on the first invalid ratio token, an empty ratio list, or a
    /// non-positive tolerance.
    pub fn build(self) -> Result<ClassificationConfig> {
        let mut settings = self.defaults;

        if let Some(preset) = self.preset {
            if let Some(width) = preset.width {
                settings.min_width = width;
            }
            if let Some(height) = preset.height {
                settings.min_height = height;
            }
            if let Some(ratios) = preset.ratios.filter(|r| !r.is_empty()) {
                settings.ratios = ratios;
            }
        }

        if let Some(width) = self.min_width {
            settings.min_width = width;
        }
        if let Some(height) = self.min_height {
            settings.min_height = height;
        }
        if let Some(ratios) = self.ratios {
            settings.ratios = ratios;
        }
        if let Some(tolerance) = self.tolerance {
            settings.tolerance = tolerance;
        }

        let specs = RatioSpec::parse_all(&settings.ratios)?;
        let config = ClassificationConfig::new(
            settings.min_width,
            settings.min_height,
            specs,
            settings.tolerance,
        )?;
        Ok(config)
    }
}
