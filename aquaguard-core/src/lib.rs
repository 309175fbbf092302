//! AquaGuard Core - WHO Guideline Potability Assessment
//!
//! ## Overview
//!
//! Deterministic water potability assessment from a TDS and turbidity
//! sensor pair, built to run anywhere between the probe and the serving
//! layer:
//!
//! - `no_std` capable with zero heap allocation on the assessment path
//! - Total once validated: every in-domain reading gets a verdict, a
//!   0-100 score, and fixed recommendation vocabulary
//! - Rules are authoritative; trained models (see `aquaguard-ml`) annotate
//!   results but can never flip a verdict
//!
//! ## Architecture
//!
//! ```text
//! Reading ──► ReadingValidator ──► RuleEvaluator ──► AssessmentResult
//!                  │                                      │
//!                  ▼                                      ▼
//!            ValidationError                  QualityBand / RiskLevel
//! ```
//!
//! Validation is the only failure mode. The evaluator never errors, never
//! allocates, and is idempotent for a given reading.
//!
//! ## Example
//!
//! ```
//! use aquaguard_core::{
//!     PotabilityStatus, Reading, ReadingValidator, RuleEvaluator, Validator,
//! };
//!
//! let validator = ReadingValidator::default();
//! let evaluator = RuleEvaluator::default();
//!
//! let reading = Reading::new(350.0, 0.8, 1_700_000_000_000);
//! validator.validate(&reading)?;
//!
//! let result = evaluator.evaluate(&reading);
//! assert_eq!(result.status, PotabilityStatus::Potable);
//! assert_eq!(result.score, 100.0);
//! # Ok::<(), aquaguard_core::ValidationError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod assessment;
pub mod buffer;
pub mod constants;
pub mod errors;
pub mod evaluator;
pub mod quality;
pub mod reading;
pub mod time;
pub mod traits;
pub mod validators;

// Public API
pub use assessment::{AssessmentResult, PotabilityStatus, RiskLevel, WhoCompliance};
pub use buffer::ReadingWindow;
pub use errors::{ValidationError, ValidationResult};
pub use evaluator::{potability_score, RuleEvaluator};
pub use quality::{QualityBand, TurbidityBand};
pub use reading::{Reading, TargetQuantity};
pub use time::{TimeSource, Timestamp};
pub use traits::{ParamBounds, Validatable, Validator};
pub use validators::ReadingValidator;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
