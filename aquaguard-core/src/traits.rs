//! Core traits for the assessment engine
//!
//! The `Validator` trait is the seam between transport-specific request
//! handling and the engine: anything that can produce a [`Reading`] can be
//! checked against instrument domains before the rule evaluator runs.
//!
//! [`Reading`]: crate::reading::Reading

use crate::errors::ValidationResult;

/// Inclusive domain for one request parameter
///
/// Bounds describe what the instrument can plausibly report, not what is
/// safe to drink. Potability limits live in [`crate::constants::who`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParamBounds {
    /// Request field the bounds apply to
    pub field: &'static str,
    /// Minimum acceptable value
    pub min: f32,
    /// Maximum acceptable value
    pub max: f32,
}

impl ParamBounds {
    /// Bounds for a named field
    pub const fn new(field: &'static str, min: f32, max: f32) -> Self {
        Self { field, min, max }
    }

    /// True when `value` is finite and within the domain
    pub fn contains(&self, value: f32) -> bool {
        value.is_valid() && value >= self.min && value <= self.max
    }
}

/// Core validator trait
///
/// Implementations check one value type against fixed instrument domains.
/// Checks are ordered; the first violation is returned and later fields are
/// not inspected.
pub trait Validator {
    /// The type being validated
    type Value;

    /// Validate a value against the configured domains
    fn validate(&self, value: &Self::Value) -> ValidationResult<()>;

    /// The per-field domains this validator enforces, in check order
    fn bounds(&self) -> &[ParamBounds];
}

/// Types that can report their own basic well-formedness
pub trait Validatable {
    /// True when the value is usable in arithmetic (finite, not NaN)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
