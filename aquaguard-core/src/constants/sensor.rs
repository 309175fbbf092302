//! Sensor channel approximations
//!
//! Linear scalings between the TDS probe's raw channels and the derived
//! value, used to backfill a channel the transport did not forward. They
//! track the probe's calibration curve near drinking-water concentrations
//! and are feature inputs only, never assessment inputs.

// ===== CHANNEL APPROXIMATIONS =====

/// ADC counts per mg/L of TDS
pub const ANALOG_PER_TDS: f32 = 2.5;

/// Probe volts per mg/L of TDS
pub const VOLTAGE_PER_TDS: f32 = 0.01;

/// Probe voltage assumed when neither reading nor scaling is available
pub const DEFAULT_PROBE_VOLTAGE: f32 = 3.5;

// ===== DERIVED FEATURE SCALES =====

/// Conductivity estimate in uS/cm per mg/L of TDS
pub const CONDUCTIVITY_PER_TDS: f32 = 2.0;

/// Denominator guard for the TDS to turbidity ratio feature
pub const TDS_RATIO_EPSILON: f32 = 0.1;

/// TDS normalization scale in the composite quality index feature, mg/L
pub const QUALITY_INDEX_TDS_SCALE: f32 = 500.0;

/// Turbidity normalization scale in the composite quality index feature, NTU
pub const QUALITY_INDEX_TURBIDITY_SCALE: f32 = 1.0;
