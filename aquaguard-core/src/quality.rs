//! Score classification and display banding
//!
//! Maps scores and raw turbidity onto the bands dashboards show. Banding is
//! presentation only; the potability verdict comes from the rule evaluator
//! and the two never disagree on what matters (an Unsafe band implies a
//! failing score, not the other way around).

use crate::constants::quality::{
    QUALITY_EXCELLENT_MIN, QUALITY_FAIR_MIN, QUALITY_GOOD_MIN, QUALITY_POOR_MIN,
    TURBIDITY_GOOD_MAX_NTU, TURBIDITY_WARNING_MAX_NTU,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Quality band derived from a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QualityBand {
    /// Score 90 and above
    Excellent,
    /// Score 75 to just under 90
    Good,
    /// Score 60 to just under 75
    Fair,
    /// Score 40 to just under 60
    Poor,
    /// Score below 40
    Unsafe,
}

impl QualityBand {
    /// Classify a score; boundary values land in the higher band
    pub fn from_score(score: f32) -> Self {
        if score >= QUALITY_EXCELLENT_MIN {
            Self::Excellent
        } else if score >= QUALITY_GOOD_MIN {
            Self::Good
        } else if score >= QUALITY_FAIR_MIN {
            Self::Fair
        } else if score >= QUALITY_POOR_MIN {
            Self::Poor
        } else {
            Self::Unsafe
        }
    }

    /// Display string used in responses and dashboards
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Unsafe => "Unsafe",
        }
    }
}

/// Display band for a raw turbidity reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TurbidityBand {
    /// At or below 1 NTU
    Good,
    /// Above 1 NTU up to 50 NTU
    Warning,
    /// Above 50 NTU
    Bad,
}

impl TurbidityBand {
    /// Classify a turbidity reading in NTU
    pub fn from_ntu(ntu: f32) -> Self {
        if ntu <= TURBIDITY_GOOD_MAX_NTU {
            Self::Good
        } else if ntu <= TURBIDITY_WARNING_MAX_NTU {
            Self::Warning
        } else {
            Self::Bad
        }
    }

    /// Lowercase display string stored with ingested readings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Bad => "bad",
        }
    }
}

/// Risk score as the inverse of a quality score, clamped to the scale
pub fn risk_score(quality_score: f32) -> f32 {
    (100.0 - quality_score).clamp(0.0, 100.0)
}
