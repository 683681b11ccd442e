//! Resolution tiers derived from the shorter image side.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Resolution;

/// Display-quality bucket for an image.
///
/// Variants are ordered from highest to lowest. The `Display` form doubles
/// as the destination directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResolutionTier {
    #[serde(rename = "8K_UHD")]
    Uhd8k,
    #[serde(rename = "4K_UHD")]
    Uhd4k,
    #[serde(rename = "QHD_2K")]
    Qhd2k,
    #[serde(rename = "FHD_1080p")]
    Fhd1080p,
    #[serde(rename = "HD_720p")]
    Hd720p,
    #[serde(rename = "Standard_Res")]
    Standard,
}

/// Lower bound on the short side for each tier, highest first.
const TIER_THRESHOLDS: &[(u32, ResolutionTier)] = &[
    (4320, ResolutionTier::Uhd8k),
    (2160, ResolutionTier::Uhd4k),
    (1440, ResolutionTier::Qhd2k),
    (1080, ResolutionTier::Fhd1080p),
    (720, ResolutionTier::Hd720p),
];

impl ResolutionTier {
    /// Tier for the given dimensions. Orientation does not matter.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self::from_short_side(width.min(height))
    }

    fn from_short_side(short_side: u32) -> Self {
        TIER_THRESHOLDS
            .iter()
            .find(|(min, _)| short_side >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(ResolutionTier::Standard)
    }

    /// Directory label, e.g. `4K_UHD`.
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionTier::Uhd8k => "8K_UHD",
            ResolutionTier::Uhd4k => "4K_UHD",
            ResolutionTier::Qhd2k => "QHD_2K",
            ResolutionTier::Fhd1080p => "FHD_1080p",
            ResolutionTier::Hd720p => "HD_720p",
            ResolutionTier::Standard => "Standard_Res",
        }
    }
}

impl From<Resolution> for ResolutionTier {
    fn from(res: Resolution) -> Self {
        Self::from_short_side(res.short_side())
    }
}

impl fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
