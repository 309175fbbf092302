//! Common validation helpers
//!
//! Pure functions shared by the request validators. No allocation and no
//! side effects, safe to call from interrupt context on embedded ingest
//! nodes.

use crate::errors::{ValidationError, ValidationResult};
use crate::traits::Validatable;

/// Check that a value is finite and inside `[min, max]`
///
/// Non-finite values report `InvalidValue` rather than `OutOfRange` so the
/// caller can distinguish a broken transport (NaN) from a saturated probe.
pub fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> ValidationResult<()> {
    if !value.is_valid() {
        return Err(ValidationError::InvalidValue { field });
    }

    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    Ok(())
}
