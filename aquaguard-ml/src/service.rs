//! Assessment Service Orchestration
//!
//! ## Overview
//!
//! The [`AssessmentService`] is the external contract of the engine: one
//! `assess` operation and one `forecast` operation. It validates inputs,
//! runs the rule evaluator, consults the trained models when present, and
//! assembles the full response payload the serving layer forwards.
//!
//! ## Precedence
//!
//! The rule evaluator is authoritative for potability. The classifier and
//! score regressor run when loaded, but their output is advisory metadata
//! only; a disagreeing model can never flip the status or move the score.
//! Which path answered is part of the contract, reported through
//! `ai_info.ml_models_loaded` and `ai_info.prediction_method` on every
//! response.
//!
//! ## Model Handle
//!
//! The optional [`ModelBundle`] is injected at construction, making the
//! no-model configuration a constructor-time fact. Testing both branches
//! is two constructions away; nothing consults globals or the filesystem
//! at request time.
//!
//! ## Example
//!
//! ```
//! use aquaguard_ml::{AssessmentService, AssessRequest};
//!
//! let service = AssessmentService::new(None);
//! let response = service.assess(&AssessRequest::new(350.0, 0.8))?;
//!
//! assert_eq!(response.potability_score, 100.0);
//! assert!(!response.ai_info.ml_models_loaded);
//! # Ok::<(), aquaguard_core::ValidationError>(())
//! ```

use aquaguard_core::constants::forecast::ASSESSMENT_CONFIDENCE;
use aquaguard_core::constants::who::{TDS_LIMIT_MG_L, TURBIDITY_WARNING_NTU};
use aquaguard_core::errors::ValidationError;
use aquaguard_core::evaluator::RuleEvaluator;
use aquaguard_core::reading::Reading;
use aquaguard_core::time::{SystemTime, TimeSource, Timestamp};
use aquaguard_core::validators::ReadingValidator;
use aquaguard_core::{PotabilityStatus, RiskLevel, Validator, WhoCompliance};
use serde::Serialize;

use crate::features::FeatureBuilder;
use crate::forecast::{ForecastResult, Forecaster};
use crate::log_warn;
use crate::model::ModelBundle;
use crate::request::AssessRequest;

/// Prediction-method string when the trained models answered
pub const METHOD_ML_MODELS: &str = "ML Models";

/// Prediction-method string for rule-only operation
pub const METHOD_RULE_BASED: &str = "Rule-based (WHO Guidelines)";

/// Echo of the assessed parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterEcho {
    /// Assessed TDS in mg/L
    pub tds_value: f32,
    /// Assessed turbidity in NTU
    pub turbidity_value: f32,
    /// Assessed temperature in Celsius
    pub temperature: f32,
    /// Assessed pH level
    pub ph_level: f32,
}

/// Echo of the guideline limits the verdict was computed against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuidelineEcho {
    /// TDS potability limit in mg/L
    pub tds_limit: f32,
    /// Turbidity warning threshold in NTU
    pub turbidity_warning_threshold: f32,
}

/// Model provenance block of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AiInfo {
    /// Version string of the training run
    pub model_version: String,
    /// Date the models were trained
    pub training_date: String,
    /// Reported training accuracy
    pub accuracy: String,
    /// Whether the trained pair contributed to this response
    pub ml_models_loaded: bool,
    /// Which prediction path answered
    pub prediction_method: &'static str,
}

/// Complete assessment payload
///
/// Mirrors what the serving layer forwards verbatim: verdict, score,
/// joined recommendation vocabulary, compliance record, parameter and
/// guideline echoes, and the model provenance block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResponse {
    /// Potability verdict
    pub potability_status: PotabilityStatus,
    /// Score on the 0-100 scale
    pub potability_score: f32,
    /// Confidence of the assessment
    pub confidence: f32,
    /// Overall risk classification
    pub risk_level: RiskLevel,
    /// Space-joined issue texts, or the fixed clean-water text
    pub recommendation: String,
    /// Comma-joined action texts, or `"None"`
    pub action_required: String,
    /// Per-rule compliance record
    pub who_compliance: WhoCompliance,
    /// Echo of the assessed parameters
    pub parameters: ParameterEcho,
    /// Echo of the enforced guideline limits
    pub who_guidelines: GuidelineEcho,
    /// Model provenance
    pub ai_info: AiInfo,
}

/// The engine's external contract
///
/// Stateless per request apart from the injected clock and the read-only
/// model bundle; a shared reference serves concurrent requests safely.
#[derive(Debug)]
pub struct AssessmentService<C: TimeSource = SystemTime> {
    validator: ReadingValidator,
    evaluator: RuleEvaluator,
    models: Option<ModelBundle>,
    clock: C,
}

impl AssessmentService<SystemTime> {
    /// Service on the system clock
    pub fn new(models: Option<ModelBundle>) -> Self {
        Self::with_clock(models, SystemTime)
    }
}

impl<C: TimeSource> AssessmentService<C> {
    /// Service with an injected clock, for tests and replay
    pub fn with_clock(models: Option<ModelBundle>, clock: C) -> Self {
        if models.is_none() {
            log_warn!("no model bundle provided, running rule-based only");
        }

        Self {
            validator: ReadingValidator::default(),
            evaluator: RuleEvaluator::default(),
            models,
            clock,
        }
    }

    /// Whether the trained assessment pair is available
    pub fn models_loaded(&self) -> bool {
        self.models
            .as_ref()
            .is_some_and(|bundle| bundle.has_assessment_models())
    }

    /// Assess one request
    ///
    /// Validation is the only failure path. Past it, the rule evaluator
    /// always answers; the trained pair runs advisorily and any problem it
    /// has degrades the metadata, never the verdict.
    pub fn assess(&self, request: &AssessRequest) -> Result<AssessmentResponse, ValidationError> {
        let now = self.clock.now();
        let reading = request.reading_at(now);
        self.validator.validate(&reading)?;

        let result = self.evaluator.evaluate(&reading);
        let ml_models_used = self.run_advisory_models(&reading, now);

        let info = self
            .models
            .as_ref()
            .map(|bundle| bundle.info.clone())
            .unwrap_or_default();

        Ok(AssessmentResponse {
            potability_status: result.status,
            potability_score: result.score,
            confidence: ASSESSMENT_CONFIDENCE,
            risk_level: result.risk_level,
            recommendation: result.recommendation(),
            action_required: result.action_required(),
            who_compliance: result.compliance,
            parameters: ParameterEcho {
                tds_value: reading.tds_value,
                turbidity_value: reading.turbidity_value,
                temperature: reading.temperature,
                ph_level: reading.ph_level,
            },
            who_guidelines: GuidelineEcho {
                tds_limit: TDS_LIMIT_MG_L,
                turbidity_warning_threshold: TURBIDITY_WARNING_NTU,
            },
            ai_info: AiInfo {
                model_version: info.model_version,
                training_date: info.training_date,
                accuracy: info.accuracy,
                ml_models_loaded: ml_models_used,
                prediction_method: if ml_models_used {
                    METHOD_ML_MODELS
                } else {
                    METHOD_RULE_BASED
                },
            },
        })
    }

    /// Forecast both quantities; never errors outward
    pub fn forecast(
        &self,
        current_tds: f32,
        current_turbidity: f32,
        horizon_hours: u32,
        history: &[Reading],
    ) -> ForecastResult {
        let mut forecaster = Forecaster::new(self.models.as_ref(), self.clock.now());
        forecaster.forecast(current_tds, current_turbidity, horizon_hours, history)
    }

    /// Run the classifier and score regressor for metadata purposes
    ///
    /// Returns whether both produced a prediction. The predicted label and
    /// score are discarded by design; only the fact that the trained pair
    /// answered reaches the response.
    fn run_advisory_models(&self, reading: &Reading, now: Timestamp) -> bool {
        let Some(bundle) = &self.models else {
            return false;
        };
        let (Some(classifier), Some(regressor)) = (&bundle.classifier, &bundle.score_regressor)
        else {
            return false;
        };

        let features = FeatureBuilder::assessment_features(reading, now);
        match (
            classifier.predict_not_potable(features.as_slice()),
            regressor.predict(features.as_slice()),
        ) {
            (Ok(_), Ok(_)) => true,
            (Err(err), _) | (_, Err(err)) => {
                log_warn!(
                    "advisory model prediction failed ({}), reporting rule-based method",
                    err
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::ForecastMethod;
    use crate::model::{ClassifierModel, RegressionTree, RegressorModel, TreeNode};
    use aquaguard_core::time::FixedTime;

    fn leaf_tree(value: f32) -> RegressionTree {
        RegressionTree {
            nodes: vec![TreeNode::Leaf { value }],
        }
    }

    /// Bundle whose classifier calls everything not potable
    fn disagreeing_bundle() -> ModelBundle {
        ModelBundle {
            classifier: Some(ClassifierModel {
                n_features: 11,
                trees: vec![leaf_tree(1.0)],
            }),
            score_regressor: Some(RegressorModel {
                n_features: 11,
                trees: vec![leaf_tree(5.0)],
            }),
            ..Default::default()
        }
    }

    fn rule_only_service() -> AssessmentService<FixedTime> {
        AssessmentService::with_clock(None, FixedTime::new(1_700_000_000_000))
    }

    #[test]
    fn test_clean_water_scenario() {
        let response = rule_only_service()
            .assess(&AssessRequest::new(350.0, 0.8))
            .unwrap();

        assert_eq!(response.potability_status, PotabilityStatus::Potable);
        assert_eq!(response.potability_score, 100.0);
        assert_eq!(response.risk_level, RiskLevel::Low);
        assert_eq!(response.confidence, 0.85);
        assert_eq!(
            response.recommendation,
            "Water is POTABLE. No immediate action needed."
        );
        assert_eq!(response.action_required, "None");
        assert!(response.who_compliance.overall_compliant);
    }

    #[test]
    fn test_tds_violation_scenario() {
        // Turbidity exactly at the threshold stays compliant
        let response = rule_only_service()
            .assess(&AssessRequest::new(800.0, 5.0))
            .unwrap();

        assert_eq!(response.potability_status, PotabilityStatus::NotPotable);
        assert_eq!(response.potability_score, 60.0);
        assert_eq!(response.risk_level, RiskLevel::High);
        assert_eq!(response.action_required, "TDS treatment required");
        assert!(response.who_compliance.turbidity_compliant);
    }

    #[test]
    fn test_gross_contamination_scenario() {
        let response = rule_only_service()
            .assess(&AssessRequest::new(1_300.0, 60.0))
            .unwrap();

        assert_eq!(response.potability_status, PotabilityStatus::NotPotable);
        assert_eq!(response.potability_score, 0.0);
        assert_eq!(
            response.action_required,
            "TDS treatment required, Sediment filtration required"
        );
    }

    #[test]
    fn test_validation_rejects_before_assessment() {
        let err = rule_only_service()
            .assess(&AssessRequest::new(-1.0, 1.0))
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::OutOfRange {
                field: "tds_value",
                value: -1.0,
                min: 0.0,
                max: 10_000.0,
            }
        );
    }

    #[test]
    fn test_assessment_is_idempotent() {
        let service = rule_only_service();
        let request = AssessRequest::new(950.0, 12.0);

        assert_eq!(service.assess(&request), service.assess(&request));
    }

    #[test]
    fn test_rule_only_metadata() {
        let service = rule_only_service();
        assert!(!service.models_loaded());

        let response = service.assess(&AssessRequest::new(350.0, 0.8)).unwrap();
        assert!(!response.ai_info.ml_models_loaded);
        assert_eq!(response.ai_info.prediction_method, METHOD_RULE_BASED);
        // Defaults still echo so the payload shape is stable
        assert_eq!(response.ai_info.model_version, "1.0");
    }

    #[test]
    fn test_disagreeing_model_cannot_flip_status() {
        let service = AssessmentService::with_clock(
            Some(disagreeing_bundle()),
            FixedTime::new(1_700_000_000_000),
        );
        assert!(service.models_loaded());

        // Classifier says not potable, score regressor says 5.0; the rules win
        let response = service.assess(&AssessRequest::new(350.0, 0.8)).unwrap();
        assert_eq!(response.potability_status, PotabilityStatus::Potable);
        assert_eq!(response.potability_score, 100.0);
        assert!(response.ai_info.ml_models_loaded);
        assert_eq!(response.ai_info.prediction_method, METHOD_ML_MODELS);
    }

    #[test]
    fn test_partial_bundle_reports_rule_based() {
        let bundle = ModelBundle {
            classifier: Some(ClassifierModel {
                n_features: 11,
                trees: vec![leaf_tree(0.0)],
            }),
            ..Default::default()
        };
        let service = AssessmentService::with_clock(Some(bundle), FixedTime::new(0));

        assert!(!service.models_loaded());
        let response = service.assess(&AssessRequest::new(350.0, 0.8)).unwrap();
        assert!(!response.ai_info.ml_models_loaded);
        assert_eq!(response.ai_info.prediction_method, METHOD_RULE_BASED);
    }

    #[test]
    fn test_broken_model_degrades_to_rule_metadata() {
        // Empty ensembles fail at predict time, not load time
        let bundle = ModelBundle {
            classifier: Some(ClassifierModel {
                n_features: 11,
                trees: vec![],
            }),
            score_regressor: Some(RegressorModel {
                n_features: 11,
                trees: vec![],
            }),
            ..Default::default()
        };
        let service = AssessmentService::with_clock(Some(bundle), FixedTime::new(0));

        let response = service.assess(&AssessRequest::new(350.0, 0.8)).unwrap();
        assert_eq!(response.potability_status, PotabilityStatus::Potable);
        assert!(!response.ai_info.ml_models_loaded);
        assert_eq!(response.ai_info.prediction_method, METHOD_RULE_BASED);
    }

    #[test]
    fn test_forecast_through_service() {
        let service = rule_only_service();
        let result = service.forecast(350.0, 0.8, 6, &[]);

        assert_eq!(result.method, ForecastMethod::TrendBased);
        assert_eq!(result.confidence, 0.70);
        assert_eq!(result.horizon_hours, 6);
    }

    #[test]
    fn test_response_serialization_shape() {
        let response = rule_only_service()
            .assess(&AssessRequest::new(800.0, 0.8))
            .unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["potability_status"], "Not Potable");
        assert_eq!(json["risk_level"], "High");
        assert_eq!(json["who_guidelines"]["tds_limit"], 500.0);
        assert_eq!(json["who_compliance"]["tds_compliant"], false);
        assert_eq!(
            json["ai_info"]["prediction_method"],
            "Rule-based (WHO Guidelines)"
        );
    }
}
