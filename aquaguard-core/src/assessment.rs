//! Assessment outcome types
//!
//! The evaluator produces an [`AssessmentResult`]; everything in it is
//! derived from the two guideline rules. Issue and action texts are fixed
//! vocabulary so downstream consumers can match on them, and the serving
//! layer forwards them verbatim.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Issue text for a TDS limit violation
pub const TDS_ISSUE: &str =
    "Water is NOT potable. Consider treatment like filtration or chemical disinfection.";

/// Action text for a TDS limit violation
pub const TDS_ACTION: &str = "TDS treatment required";

/// Issue text for a turbidity threshold violation
pub const TURBIDITY_ISSUE: &str = "High Turbidity: May contain pathogens, use sediment filters.";

/// Action text for a turbidity threshold violation
pub const TURBIDITY_ACTION: &str = "Sediment filtration required";

/// Recommendation text when no rule triggers
pub const CLEAN_RECOMMENDATION: &str = "Water is POTABLE. No immediate action needed.";

/// Action text when no rule triggers
pub const CLEAN_ACTION: &str = "None";

/// Potability verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PotabilityStatus {
    /// Both guideline rules passed
    Potable,
    /// At least one guideline rule failed
    #[cfg_attr(feature = "serde", serde(rename = "Not Potable"))]
    NotPotable,
}

impl PotabilityStatus {
    /// Display string used in responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Potable => "Potable",
            Self::NotPotable => "Not Potable",
        }
    }
}

/// Overall risk classification
///
/// High whenever any rule failed, Low otherwise. There is no intermediate
/// level; the score carries the gradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiskLevel {
    /// No rule failed
    Low,
    /// At least one rule failed
    High,
}

impl RiskLevel {
    /// Display string used in responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

/// Per-rule WHO compliance record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WhoCompliance {
    /// TDS at or below the guideline limit
    pub tds_compliant: bool,
    /// Turbidity at or below the warning threshold
    pub turbidity_compliant: bool,
    /// Both rules passed
    pub overall_compliant: bool,
}

/// Complete outcome of one rule evaluation
///
/// At most one issue and one action per rule, in rule order (TDS first).
/// The vectors are empty exactly when the water is potable.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentResult {
    /// Potability verdict
    pub status: PotabilityStatus,
    /// Score on the 0-100 scale
    pub score: f32,
    /// Overall risk classification
    pub risk_level: RiskLevel,
    /// Per-rule compliance record
    pub compliance: WhoCompliance,
    /// Triggered issue texts, in rule order
    pub issues: Vec<&'static str, 2>,
    /// Triggered action texts, in rule order
    pub actions: Vec<&'static str, 2>,
}

impl AssessmentResult {
    /// True when no rule triggered
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(feature = "std")]
impl AssessmentResult {
    /// Space-joined issue texts, or the fixed clean-water text
    pub fn recommendation(&self) -> String {
        if self.issues.is_empty() {
            CLEAN_RECOMMENDATION.to_string()
        } else {
            self.issues.join(" ")
        }
    }

    /// Comma-joined action texts, or `"None"`
    pub fn action_required(&self) -> String {
        if self.actions.is_empty() {
            CLEAN_ACTION.to_string()
        } else {
            self.actions.join(", ")
        }
    }
}
