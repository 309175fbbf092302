//! Error Types for Assessment Input Validation
//!
//! ## Design Philosophy
//!
//! Validation is the only hard failure mode in the assessment engine. Once a
//! reading passes its domain checks, every downstream stage (rule evaluation,
//! scoring, forecasting) is total: model problems degrade to rule-only or
//! trend-only operation instead of erroring. That keeps the error surface
//! small enough to reason about on constrained targets:
//!
//! 1. **Copy semantics**: every variant is inline data, no heap, no backtrace.
//! 2. **Field identification**: variants carry the offending request field as
//!    a `&'static str` so the serving layer can map failures back onto the
//!    parameter a client sent.
//! 3. **Bounds included**: `OutOfRange` reports the violated domain, which is
//!    forwarded verbatim in error responses.
//!
//! ## Example
//!
//! ```
//! use aquaguard_core::errors::{ValidationError, ValidationResult};
//! use aquaguard_core::validators::utils::check_range;
//!
//! fn check_tds(value: f32) -> ValidationResult<()> {
//!     check_range("tds_value", value, 0.0, 10_000.0)
//! }
//!
//! assert!(check_tds(350.0).is_ok());
//! assert_eq!(
//!     check_tds(-1.0),
//!     Err(ValidationError::OutOfRange {
//!         field: "tds_value",
//!         value: -1.0,
//!         min: 0.0,
//!         max: 10_000.0,
//!     })
//! );
//! ```

use thiserror_no_std::Error;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input validation errors
///
/// The instrument domains checked here are wider than the potability limits:
/// a 9000 mg/L TDS reading is valid input (and scores terribly), a negative
/// one is a sensor or transport fault and gets rejected before assessment.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Parameter outside its instrument domain
    #[error("{field} value {value} outside range [{min}, {max}]")]
    OutOfRange {
        /// Request field that failed validation
        field: &'static str,
        /// The rejected value
        value: f32,
        /// Minimum acceptable value
        min: f32,
        /// Maximum acceptable value
        max: f32,
    },

    /// Parameter is NaN or infinite
    #[error("{field} is not a valid number")]
    InvalidValue {
        /// Request field that failed validation
        field: &'static str,
    },
}

impl ValidationError {
    /// Name of the request field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. } => field,
            Self::InvalidValue { field } => field,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ValidationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => defmt::write!(fmt, "{} value {} outside [{}, {}]", field, value, min, max),
            Self::InvalidValue { field } => {
                defmt::write!(fmt, "{} is not a valid number", field)
            }
        }
    }
}
