//! Whole-reading validator
//!
//! Checks the four assessed parameters of a [`Reading`] against instrument
//! domains, in the fixed order the serving layer documents. Raw channels
//! (`analog_value`, `voltage`) are deliberately unchecked; they are feature
//! inputs only and non-finite values there are dropped during feature
//! extraction instead.

use crate::errors::ValidationResult;
use crate::constants::who::{
    PH_VALID_MAX, PH_VALID_MIN, TDS_VALID_MAX, TDS_VALID_MIN, TEMPERATURE_VALID_MAX_C,
    TEMPERATURE_VALID_MIN_C, TURBIDITY_VALID_MAX, TURBIDITY_VALID_MIN,
};
use crate::reading::Reading;
use crate::traits::{ParamBounds, Validator};
use crate::validators::utils::check_range;

/// Validator for complete readings
///
/// Bounds are stored in check order; [`Validator::bounds`] exposes them so
/// the serving layer can publish its accepted domains.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingValidator {
    bounds: [ParamBounds; 4],
}

impl Default for ReadingValidator {
    fn default() -> Self {
        Self {
            bounds: [
                ParamBounds::new("tds_value", TDS_VALID_MIN, TDS_VALID_MAX),
                ParamBounds::new("turbidity_value", TURBIDITY_VALID_MIN, TURBIDITY_VALID_MAX),
                ParamBounds::new("temperature", TEMPERATURE_VALID_MIN_C, TEMPERATURE_VALID_MAX_C),
                ParamBounds::new("ph_level", PH_VALID_MIN, PH_VALID_MAX),
            ],
        }
    }
}

impl ReadingValidator {
    /// Validator with custom instrument domains
    ///
    /// Each pair is `(min, max)`; swapped pairs are reordered rather than
    /// rejected so a misconfigured deployment fails loudly at validation
    /// time, not construction time.
    pub fn new_with_bounds(
        tds: (f32, f32),
        turbidity: (f32, f32),
        temperature: (f32, f32),
        ph: (f32, f32),
    ) -> Self {
        fn ordered(field: &'static str, (min, max): (f32, f32)) -> ParamBounds {
            if min <= max {
                ParamBounds::new(field, min, max)
            } else {
                ParamBounds::new(field, max, min)
            }
        }

        Self {
            bounds: [
                ordered("tds_value", tds),
                ordered("turbidity_value", turbidity),
                ordered("temperature", temperature),
                ordered("ph_level", ph),
            ],
        }
    }
}

impl Validator for ReadingValidator {
    type Value = Reading;

    fn validate(&self, reading: &Reading) -> ValidationResult<()> {
        let [tds, turbidity, temperature, ph] = &self.bounds;

        check_range(tds.field, reading.tds_value, tds.min, tds.max)?;
        check_range(turbidity.field, reading.turbidity_value, turbidity.min, turbidity.max)?;
        check_range(
            temperature.field,
            reading.temperature,
            temperature.min,
            temperature.max,
        )?;
        check_range(ph.field, reading.ph_level, ph.min, ph.max)?;

        Ok(())
    }

    fn bounds(&self) -> &[ParamBounds] {
        &self.bounds
    }
}
