//! WHO guideline rule evaluator
//!
//! Deterministic potability classification from TDS and turbidity. The
//! evaluator is total: any finite reading gets a verdict, a score, and the
//! matching recommendation vocabulary. Trained models never override it;
//! they only annotate the prediction method at the serving layer.
//!
//! Status and score are decoupled on purpose. Status is a hard threshold
//! pair, while the score keeps its bracket resolution well past the limits
//! so operators can rank two failing sources.

use heapless::Vec;

use crate::assessment::{
    AssessmentResult, PotabilityStatus, RiskLevel, WhoCompliance, TDS_ACTION, TDS_ISSUE,
    TURBIDITY_ACTION, TURBIDITY_ISSUE,
};
use crate::constants::scoring;
use crate::constants::who::{TDS_LIMIT_MG_L, TURBIDITY_WARNING_NTU};
use crate::reading::Reading;

/// Threshold rule evaluator
///
/// Holds the guideline limits so deployments under stricter local standards
/// can tighten them without touching the scoring brackets, which stay fixed
/// to the WHO scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleEvaluator {
    /// TDS potability limit in mg/L
    tds_limit: f32,
    /// Turbidity warning threshold in NTU
    turbidity_limit: f32,
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self {
            tds_limit: TDS_LIMIT_MG_L,               // WHO palatability limit
            turbidity_limit: TURBIDITY_WARNING_NTU,  // disinfection effectiveness
        }
    }
}

impl RuleEvaluator {
    /// Evaluator with custom limits
    ///
    /// Negative limits are clamped to zero; a zero limit fails every
    /// positive reading.
    pub fn new_with_limits(tds_limit: f32, turbidity_limit: f32) -> Self {
        Self {
            tds_limit: tds_limit.max(0.0),
            turbidity_limit: turbidity_limit.max(0.0),
        }
    }

    /// The TDS limit this evaluator enforces, mg/L
    pub fn tds_limit(&self) -> f32 {
        self.tds_limit
    }

    /// The turbidity threshold this evaluator enforces, NTU
    pub fn turbidity_limit(&self) -> f32 {
        self.turbidity_limit
    }

    /// Classify a validated reading
    ///
    /// Values exactly at a limit are compliant; only strict excess trips a
    /// rule. Each tripped rule appends its fixed issue and action text, TDS
    /// before turbidity.
    pub fn evaluate(&self, reading: &Reading) -> AssessmentResult {
        let tds_compliant = reading.tds_value <= self.tds_limit;
        let turbidity_compliant = reading.turbidity_value <= self.turbidity_limit;
        let overall_compliant = tds_compliant && turbidity_compliant;

        let status = if overall_compliant {
            PotabilityStatus::Potable
        } else {
            PotabilityStatus::NotPotable
        };

        let mut issues: Vec<&'static str, 2> = Vec::new();
        let mut actions: Vec<&'static str, 2> = Vec::new();

        // Capacity matches the rule count, pushes cannot fail
        if !tds_compliant {
            let _ = issues.push(TDS_ISSUE);
            let _ = actions.push(TDS_ACTION);
        }
        if !turbidity_compliant {
            let _ = issues.push(TURBIDITY_ISSUE);
            let _ = actions.push(TURBIDITY_ACTION);
        }

        let risk_level = if issues.is_empty() {
            RiskLevel::Low
        } else {
            RiskLevel::High
        };

        AssessmentResult {
            status,
            score: potability_score(reading.tds_value, reading.turbidity_value),
            risk_level,
            compliance: WhoCompliance {
                tds_compliant,
                turbidity_compliant,
                overall_compliant,
            },
            issues,
            actions,
        }
    }
}

/// Potability score on the 0-100 scale
///
/// Deductions are bracketed per axis and additive across axes; both a TDS
/// and a turbidity penalty may apply to the same reading. The result is
/// clamped to the scale.
pub fn potability_score(tds_value: f32, turbidity_value: f32) -> f32 {
    let score = scoring::MAX_SCORE - tds_deduction(tds_value) - turbidity_deduction(turbidity_value);
    score.clamp(scoring::MIN_SCORE, scoring::MAX_SCORE)
}

/// Score deduction contributed by the TDS axis
pub fn tds_deduction(tds_value: f32) -> f32 {
    if tds_value > scoring::TDS_SEVERE_MG_L {
        scoring::TDS_SEVERE_DEDUCTION
    } else if tds_value > scoring::TDS_HIGH_MG_L {
        scoring::TDS_HIGH_DEDUCTION
    } else if tds_value > scoring::TDS_ELEVATED_MG_L {
        scoring::TDS_ELEVATED_DEDUCTION
    } else if tds_value > TDS_LIMIT_MG_L {
        scoring::TDS_VIOLATION_DEDUCTION
    } else {
        0.0
    }
}

/// Score deduction contributed by the turbidity axis
pub fn turbidity_deduction(turbidity_value: f32) -> f32 {
    if turbidity_value > scoring::TURBIDITY_SEVERE_NTU {
        scoring::TURBIDITY_SEVERE_DEDUCTION
    } else if turbidity_value > scoring::TURBIDITY_HIGH_NTU {
        scoring::TURBIDITY_HIGH_DEDUCTION
    } else if turbidity_value > TURBIDITY_WARNING_NTU {
        scoring::TURBIDITY_WARNING_DEDUCTION
    } else {
        0.0
    }
}
