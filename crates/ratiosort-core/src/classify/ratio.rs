//! Aspect-ratio tokens: `"16:9"` or a bare float like `"1.778"`.

use serde::Serialize;

use crate::error::ConfigError;

/// Parse a ratio token into width / height.
///
/// `"W:H"` must have exactly two numeric parts and a non-zero height.
/// Anything else is parsed as a single float. The result must be finite
/// and positive.
pub fn parse_ratio(token: &str) -> Result<f64, ConfigError> {
    let trimmed = token.trim();
    let invalid = || ConfigError::InvalidRatioFormat {
        token: token.to_string(),
    };

    let value = if trimmed.contains(':') {
        let mut parts = trimmed.split(':');
        let (Some(w), Some(h), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };
        let w: f64 = w.trim().parse().map_err(|_| invalid())?;
        let h: f64 = h.trim().parse().map_err(|_| invalid())?;
        if h == 0.0 {
            return Err(invalid());
        }
        w / h
    } else {
        trimmed.parse::<f64>().map_err(|_| invalid())?
    };

    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// A target aspect ratio: the token as the user wrote it plus its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioSpec {
    token: String,
    value: f64,
}

impl RatioSpec {
    /// Parse a user-supplied token.
    pub fn parse(token: &str) -> Result<Self, ConfigError> {
        let value = parse_ratio(token)?;
        Ok(Self {
            token: token.trim().to_string(),
            value,
        })
    }

    /// Parse a list of tokens, failing on the first bad one.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Self>, ConfigError> {
        tokens.iter().map(|t| Self::parse(t.as_ref())).collect()
    }

    /// The original token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Width divided by height.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Folder-safe label: `16:9` becomes `16x9`.
    pub fn label(&self) -> String {
        self.token.replace(':', "x")
    }

    /// Whether `ratio` lies strictly within `tolerance` of this target.
    pub fn matches(&self, ratio: f64, tolerance: f64) -> bool {
        (ratio - self.value).abs() < tolerance
    }
}
