//! Assessment Request Boundary
//!
//! Deserializes the external assessment payload. Alternate field names
//! (`tds` vs `tds_value`, `ph` vs `ph_level`) and request-level defaults
//! are resolved here, so everything past this module works with one
//! strongly typed, alias-free shape.

use aquaguard_core::constants::who::{
    DEFAULT_PH_LEVEL, DEFAULT_TDS_MG_L, DEFAULT_TEMPERATURE_C, DEFAULT_TURBIDITY_NTU,
};
use aquaguard_core::reading::Reading;
use aquaguard_core::time::Timestamp;
use serde::Deserialize;

/// One assessment request
///
/// Omitted fields take the documented demo-water defaults; values are NOT
/// validated here (the service owns validation so programmatic callers get
/// the same checks as deserialized ones).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct AssessRequest {
    /// Total dissolved solids in mg/L
    #[serde(alias = "tds", default = "default_tds")]
    pub tds_value: f32,
    /// Turbidity in NTU
    #[serde(alias = "turbidity", default = "default_turbidity")]
    pub turbidity_value: f32,
    /// Water temperature in Celsius
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// pH level
    #[serde(alias = "ph", default = "default_ph")]
    pub ph_level: f32,
}

fn default_tds() -> f32 {
    DEFAULT_TDS_MG_L
}

fn default_turbidity() -> f32 {
    DEFAULT_TURBIDITY_NTU
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE_C
}

fn default_ph() -> f32 {
    DEFAULT_PH_LEVEL
}

impl Default for AssessRequest {
    fn default() -> Self {
        Self {
            tds_value: default_tds(),
            turbidity_value: default_turbidity(),
            temperature: default_temperature(),
            ph_level: default_ph(),
        }
    }
}

impl AssessRequest {
    /// Request with explicit sensor values and defaulted context
    pub fn new(tds_value: f32, turbidity_value: f32) -> Self {
        Self {
            tds_value,
            turbidity_value,
            ..Self::default()
        }
    }

    /// Set the water temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the pH level
    pub fn with_ph(mut self, ph_level: f32) -> Self {
        self.ph_level = ph_level;
        self
    }

    /// Materialize the request as a reading stamped at `now`
    pub fn reading_at(&self, now: Timestamp) -> Reading {
        Reading::new(self.tds_value, self.turbidity_value, now)
            .with_temperature(self.temperature)
            .with_ph(self.ph_level)
    }
}
