//! Configuration validation with range checks.

use crate::classify::parse_ratio;
use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.classification.ratios.is_empty() {
            return Err(ConfigError::ValidationError(
                "classification.ratios must not be empty".into(),
            ));
        }
        for token in &self.classification.ratios {
            parse_ratio(token)?;
        }
        let tolerance = self.classification.tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::ValidationError(
                "classification.tolerance must be > 0".into(),
            ));
        }
        if self.discovery.extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "discovery.extensions must not be empty".into(),
            ));
        }
        if self.probe.command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "probe.command must not be empty".into(),
            ));
        }
        if self.probe.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "probe.timeout_ms must be > 0".into(),
            ));
        }
        if self.sort.destination.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "sort.destination must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ratio_token() {
        let mut config = Config::default();
        config.classification.ratios = vec!["16:9".into(), "wide".into()];
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRatioFormat { .. }));
    }

    #[test]
    fn test_validate_rejects_empty_ratios() {
        let mut config = Config::default();
        config.classification.ratios.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("classification.ratios"));
    }

    #[test]
    fn test_validate_rejects_non_positive_tolerance() {
        let mut config = Config::default();
        config.classification.tolerance = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tolerance"));

        config.classification.tolerance = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.probe.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_empty_destination() {
        let mut config = Config::default();
        config.sort.destination = PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sort.destination"));
    }
}
