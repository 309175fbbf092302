//! Model Artifacts
//!
//! ## Overview
//!
//! Trained models arrive as JSON documents holding flattened decision-tree
//! ensembles. Each tree is an array of nodes indexed by `u16`; prediction
//! is a root-to-leaf traversal per tree and a mean over trees. The format
//! is deliberately dumb: no weights to interpret, no runtime to embed,
//! just a `predict(&[f32]) -> f32` capability over a plain data structure
//! that is `Send + Sync` by construction.
//!
//! ## Failure Policy
//!
//! Every way an artifact can disappoint — missing file, unparseable JSON,
//! wrong feature count, empty ensemble, corrupt child index — maps to a
//! [`ModelError`]. Callers in this crate absorb those errors into their
//! fallback tiers; nothing here is ever surfaced to an end caller as a
//! failure (see the forecaster and service). Absence of an artifact is the
//! normal no-model condition.
//!
//! ## Artifact Shape
//!
//! ```json
//! {
//!   "classifier": {
//!     "n_features": 11,
//!     "trees": [
//!       { "nodes": [
//!         { "feature": 0, "threshold": 500.0, "left": 1, "right": 2 },
//!         { "value": 0.0 },
//!         { "value": 1.0 }
//!       ] }
//!     ]
//!   },
//!   "tds_forecaster": { "n_features": 12, "trees": [ { "nodes": [ { "value": 350.0 } ] } ] },
//!   "info": { "model_version": "1.0", "training_date": "2024-10-21", "accuracy": "99.5%" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::features::{ASSESSMENT_FEATURE_COUNT, FORECAST_FEATURE_COUNT};
use crate::log_warn;

/// Result type for model operations
pub type MlResult<T> = Result<T, ModelError>;

/// Threshold above which a classifier score means not potable
const NOT_POTABLE_SCORE: f32 = 0.5;

/// Model artifact errors
///
/// All recovered locally: the forecaster degrades to its trend heuristic
/// and the service to rule-only metadata. None of these cross the service
/// boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// No artifact present for the requested capability
    #[error("model artifact missing")]
    ArtifactMissing,

    /// Artifact exists but cannot be used
    #[error("malformed model artifact: {reason}")]
    MalformedArtifact {
        /// What was wrong with the artifact
        reason: &'static str,
    },

    /// Feature vector shape does not match the trained model
    #[error("feature count mismatch: model expects {expected}, got {actual}")]
    FeatureMismatch {
        /// Feature count the model was trained with
        expected: usize,
        /// Feature count supplied at predict time
        actual: usize,
    },

    /// Model has no trees to average over
    #[error("model has an empty ensemble")]
    EmptyEnsemble,
}

/// One node of a flattened decision tree
///
/// Split nodes index their children into the owning tree's node array;
/// `feature < threshold` goes left. Leaves carry the predicted value (or
/// class score for the classifier).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split node
    Split {
        /// Feature index into the input vector
        feature: u8,
        /// Split threshold
        threshold: f32,
        /// Node index taken when `feature < threshold`
        left: u16,
        /// Node index taken otherwise
        right: u16,
    },
    /// Terminal node carrying the prediction
    Leaf {
        /// Predicted value or class score
        value: f32,
    },
}

/// A single flattened decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Node array; index 0 is the root
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Root-to-leaf traversal for one feature vector
    ///
    /// The step count is capped at the node count, so a corrupt artifact
    /// with an index cycle terminates with an error instead of spinning.
    pub fn predict(&self, features: &[f32]) -> MlResult<f32> {
        if self.nodes.is_empty() {
            return Err(ModelError::MalformedArtifact {
                reason: "tree has no nodes",
            });
        }

        let mut index = 0usize;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index).ok_or(ModelError::MalformedArtifact {
                reason: "child index out of bounds",
            })? {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features.get(*feature as usize).copied().ok_or(
                        ModelError::MalformedArtifact {
                            reason: "split feature outside the input vector",
                        },
                    )?;
                    index = if value < *threshold {
                        *left as usize
                    } else {
                        *right as usize
                    };
                }
            }
        }

        Err(ModelError::MalformedArtifact {
            reason: "traversal did not reach a leaf",
        })
    }
}

/// Regression ensemble: mean prediction over trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressorModel {
    /// Feature count the ensemble was trained with
    pub n_features: usize,
    /// Trees averaged at predict time
    pub trees: Vec<RegressionTree>,
}

impl RegressorModel {
    /// Predict the target value for one feature vector
    pub fn predict(&self, features: &[f32]) -> MlResult<f32> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }

        let mut sum = 0.0f32;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }

        Ok(sum / self.trees.len() as f32)
    }
}

/// Classification ensemble over the same tree structure
///
/// Leaf values are class scores; the mean score over trees is compared
/// against 0.5. Per the engine's precedence design the label is advisory
/// metadata only and never overrides the rule evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierModel {
    /// Feature count the ensemble was trained with
    pub n_features: usize,
    /// Trees averaged at predict time
    pub trees: Vec<RegressionTree>,
}

impl ClassifierModel {
    /// Mean class score over the ensemble
    pub fn predict_score(&self, features: &[f32]) -> MlResult<f32> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        if self.trees.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }

        let mut sum = 0.0f32;
        for tree in &self.trees {
            sum += tree.predict(features)?;
        }

        Ok(sum / self.trees.len() as f32)
    }

    /// Advisory not-potable label for one feature vector
    pub fn predict_not_potable(&self, features: &[f32]) -> MlResult<bool> {
        Ok(self.predict_score(features)? > NOT_POTABLE_SCORE)
    }
}

/// Artifact metadata echoed in assessment responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Version string of the training run
    pub model_version: String,
    /// Date the models were trained
    pub training_date: String,
    /// Reported training accuracy
    pub accuracy: String,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            model_version: "1.0".to_string(),
            training_date: "2024-10-21".to_string(),
            accuracy: "99.5%".to_string(),
        }
    }
}

/// The complete set of loadable model artifacts
///
/// Every slot is optional; a partially populated bundle is normal (a site
/// may have forecast regressors long before its potability classifier has
/// enough labeled data). Constructed once at startup and injected into the
/// service; plain data, so shared references are safe across threads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelBundle {
    /// Potability classifier (11 assessment features)
    #[serde(default)]
    pub classifier: Option<ClassifierModel>,
    /// Potability score regressor (11 assessment features)
    #[serde(default)]
    pub score_regressor: Option<RegressorModel>,
    /// Next-step TDS regressor (12 forecast features)
    #[serde(default)]
    pub tds_forecaster: Option<RegressorModel>,
    /// Next-step turbidity regressor (12 forecast features)
    #[serde(default)]
    pub turbidity_forecaster: Option<RegressorModel>,
    /// Training metadata
    #[serde(default)]
    pub info: ModelInfo,
}

impl ModelBundle {
    /// Parse a bundle from raw JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> MlResult<Self> {
        let bundle: Self = serde_json::from_slice(bytes).map_err(|err| {
            log_warn!("model bundle failed to parse: {}", err);
            ModelError::MalformedArtifact {
                reason: "invalid JSON document",
            }
        })?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Load a bundle from a file
    ///
    /// A missing file is the normal no-model condition; callers construct
    /// their service with `None` and run rule-only.
    pub fn load(path: &std::path::Path) -> MlResult<Self> {
        let bytes = std::fs::read(path).map_err(|err| {
            log_warn!("model bundle not loadable from {:?}: {}", path, err);
            ModelError::ArtifactMissing
        })?;
        Self::from_json_slice(&bytes)
    }

    /// Check that every present model matches its contract shape
    pub fn validate(&self) -> MlResult<()> {
        for n_features in [
            self.classifier.as_ref().map(|m| m.n_features),
            self.score_regressor.as_ref().map(|m| m.n_features),
        ]
        .into_iter()
        .flatten()
        {
            if n_features != ASSESSMENT_FEATURE_COUNT {
                return Err(ModelError::FeatureMismatch {
                    expected: ASSESSMENT_FEATURE_COUNT,
                    actual: n_features,
                });
            }
        }

        for n_features in [
            self.tds_forecaster.as_ref().map(|m| m.n_features),
            self.turbidity_forecaster.as_ref().map(|m| m.n_features),
        ]
        .into_iter()
        .flatten()
        {
            if n_features != FORECAST_FEATURE_COUNT {
                return Err(ModelError::FeatureMismatch {
                    expected: FORECAST_FEATURE_COUNT,
                    actual: n_features,
                });
            }
        }

        Ok(())
    }

    /// True when the assessment pair (classifier + score regressor) is present
    pub fn has_assessment_models(&self) -> bool {
        self.classifier.is_some() && self.score_regressor.is_some()
    }

    /// True when both forecast regressors are present
    pub fn has_forecast_models(&self) -> bool {
        self.tds_forecaster.is_some() && self.turbidity_forecaster.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_tree(value: f32) -> RegressionTree {
        RegressionTree {
            nodes: vec![TreeNode::Leaf { value }],
        }
    }

    fn threshold_tree() -> RegressionTree {
        RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 500.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 10.0 },
                TreeNode::Leaf { value: 20.0 },
            ],
        }
    }

    #[test]
    fn test_tree_traversal() {
        let tree = threshold_tree();
        assert_eq!(tree.predict(&[350.0]).unwrap(), 10.0);
        assert_eq!(tree.predict(&[800.0]).unwrap(), 20.0);
        // Exactly at the threshold goes right
        assert_eq!(tree.predict(&[500.0]).unwrap(), 20.0);
    }

    #[test]
    fn test_empty_tree_is_malformed() {
        let tree = RegressionTree { nodes: vec![] };
        assert!(matches!(
            tree.predict(&[0.0]),
            Err(ModelError::MalformedArtifact { .. })
        ));
    }

    #[test]
    fn test_cyclic_tree_terminates() {
        // Root points at itself
        let tree = RegressionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            }],
        };
        assert_eq!(
            tree.predict(&[0.5]),
            Err(ModelError::MalformedArtifact {
                reason: "traversal did not reach a leaf",
            })
        );
    }

    #[test]
    fn test_ensemble_averages_trees() {
        let model = RegressorModel {
            n_features: 1,
            trees: vec![leaf_tree(10.0), leaf_tree(30.0)],
        };
        assert_eq!(model.predict(&[0.0]).unwrap(), 20.0);
    }

    #[test]
    fn test_feature_mismatch() {
        let model = RegressorModel {
            n_features: 12,
            trees: vec![leaf_tree(1.0)],
        };
        assert_eq!(
            model.predict(&[0.0, 1.0]),
            Err(ModelError::FeatureMismatch {
                expected: 12,
                actual: 2,
            })
        );
    }

    #[test]
    fn test_empty_ensemble() {
        let model = RegressorModel {
            n_features: 1,
            trees: vec![],
        };
        assert_eq!(model.predict(&[0.0]), Err(ModelError::EmptyEnsemble));
    }

    #[test]
    fn test_classifier_label_threshold() {
        let model = ClassifierModel {
            n_features: 1,
            trees: vec![threshold_tree()],
        };
        // Scores of 10/20 are both way over 0.5
        assert!(model.predict_not_potable(&[350.0]).unwrap());

        let clean = ClassifierModel {
            n_features: 1,
            trees: vec![leaf_tree(0.2)],
        };
        assert!(!clean.predict_not_potable(&[350.0]).unwrap());
    }

    #[test]
    fn test_bundle_round_trip() {
        let bundle = ModelBundle {
            tds_forecaster: Some(RegressorModel {
                n_features: 12,
                trees: vec![threshold_tree()],
            }),
            ..Default::default()
        };

        let json = serde_json::to_vec(&bundle).unwrap();
        let parsed = ModelBundle::from_json_slice(&json).unwrap();
        assert_eq!(parsed, bundle);
        assert!(!parsed.has_forecast_models());
        assert!(!parsed.has_assessment_models());
    }

    #[test]
    fn test_bundle_parses_node_forms() {
        let json = br#"{
            "tds_forecaster": {
                "n_features": 12,
                "trees": [
                    { "nodes": [
                        { "feature": 3, "threshold": 400.0, "left": 1, "right": 2 },
                        { "value": 380.0 },
                        { "value": 430.0 }
                    ] }
                ]
            },
            "info": { "model_version": "2.3", "training_date": "2025-06-01", "accuracy": "97.1%" }
        }"#;

        let bundle = ModelBundle::from_json_slice(json).unwrap();
        assert_eq!(bundle.info.model_version, "2.3");

        let model = bundle.tds_forecaster.unwrap();
        assert_eq!(model.trees[0].nodes.len(), 3);
        assert!(matches!(model.trees[0].nodes[1], TreeNode::Leaf { value } if value == 380.0));
    }

    #[test]
    fn test_bundle_rejects_garbage() {
        assert_eq!(
            ModelBundle::from_json_slice(b"not json"),
            Err(ModelError::MalformedArtifact {
                reason: "invalid JSON document",
            })
        );
    }

    #[test]
    fn test_bundle_rejects_wrong_shape() {
        let bundle = ModelBundle {
            classifier: Some(ClassifierModel {
                n_features: 12,
                trees: vec![leaf_tree(0.0)],
            }),
            ..Default::default()
        };
        assert_eq!(
            bundle.validate(),
            Err(ModelError::FeatureMismatch {
                expected: 11,
                actual: 12,
            })
        );
    }

    #[test]
    fn test_missing_file_is_artifact_missing() {
        let err = ModelBundle::load(std::path::Path::new("/nonexistent/models.json"));
        assert_eq!(err, Err(ModelError::ArtifactMissing));
    }

    #[test]
    fn test_default_info_strings() {
        let info = ModelInfo::default();
        assert_eq!(info.model_version, "1.0");
        assert_eq!(info.training_date, "2024-10-21");
        assert_eq!(info.accuracy, "99.5%");
    }
}
