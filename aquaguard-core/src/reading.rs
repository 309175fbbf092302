//! Water quality data model
//!
//! Plain-data types shared by the rule evaluator and the forecasting crate.
//! A [`Reading`] is immutable once captured; persistence and retrieval are
//! the ingestion layer's concern, the engine only ever borrows slices of
//! them ordered however the store returned them (feature extraction sorts
//! for itself).

use crate::constants::who::{DEFAULT_PH_LEVEL, DEFAULT_TEMPERATURE_C};
use crate::time::Timestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Single water quality reading from the sensor pair
///
/// TDS and turbidity drive potability; temperature and pH are carried for
/// context and model features. The raw ADC channel and probe voltage are
/// optional because not every transport forwards them; consumers fall back
/// to documented approximations when they are absent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Total dissolved solids in mg/L
    pub tds_value: f32,
    /// Turbidity in NTU
    pub turbidity_value: f32,
    /// Water temperature in Celsius
    pub temperature: f32,
    /// pH level
    pub ph_level: f32,
    /// Capture time in milliseconds since epoch
    pub timestamp: Timestamp,
    /// Raw ADC count from the TDS probe, when recorded
    pub analog_value: Option<f32>,
    /// Probe voltage, when recorded
    pub voltage: Option<f32>,
}

impl Reading {
    /// Reading with defaulted temperature and pH and no raw channels
    pub const fn new(tds_value: f32, turbidity_value: f32, timestamp: Timestamp) -> Self {
        Self {
            tds_value,
            turbidity_value,
            temperature: DEFAULT_TEMPERATURE_C,
            ph_level: DEFAULT_PH_LEVEL,
            timestamp,
            analog_value: None,
            voltage: None,
        }
    }

    /// Set the water temperature
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the pH level
    pub const fn with_ph(mut self, ph_level: f32) -> Self {
        self.ph_level = ph_level;
        self
    }

    /// Attach the raw probe channels
    pub const fn with_channels(mut self, analog_value: f32, voltage: f32) -> Self {
        self.analog_value = Some(analog_value);
        self.voltage = Some(voltage);
        self
    }
}

/// Which measured quantity a series or forecast targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TargetQuantity {
    /// Total dissolved solids, mg/L
    Tds,
    /// Turbidity, NTU
    Turbidity,
}

impl TargetQuantity {
    /// Extract this quantity's value from a reading
    pub fn value_of(&self, reading: &Reading) -> f32 {
        match self {
            Self::Tds => reading.tds_value,
            Self::Turbidity => reading.turbidity_value,
        }
    }

    /// Lowercase name used in feature labels and logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tds => "tds",
            Self::Turbidity => "turbidity",
        }
    }
}
