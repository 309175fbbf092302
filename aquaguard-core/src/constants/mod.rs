//! Constants for AquaGuard Core
//!
//! Centralized numeric constants with their sources. Values encode the WHO
//! drinking-water guidance this engine enforces plus the sensor-side
//! approximations used when a raw channel is missing, so changing a
//! regulatory threshold is a one-line edit here rather than a hunt through
//! the evaluator.
//!
//! Organization:
//! - **who**: regulatory limits, instrument domains, request defaults
//! - **scoring**: potability score deduction brackets
//! - **quality**: score classification and turbidity display bands
//! - **forecast**: prediction clamps, fallback noise, confidence levels
//! - **sensor**: raw channel approximations and derived feature scales

/// WHO guideline limits, instrument domains, and request defaults.
pub mod who;

/// Potability score deduction brackets.
pub mod scoring;

/// Quality classification bands.
pub mod quality;

/// Forecast clamps, fallback noise, and confidence levels.
pub mod forecast;

/// Sensor channel approximations.
pub mod sensor;

// Re-export commonly used constants for convenience
pub use who::{
    DEFAULT_PH_LEVEL, DEFAULT_TDS_MG_L, DEFAULT_TEMPERATURE_C, DEFAULT_TURBIDITY_NTU,
    TDS_LIMIT_MG_L, TDS_VALID_MAX, TDS_VALID_MIN, TURBIDITY_VALID_MAX, TURBIDITY_VALID_MIN,
    TURBIDITY_WARNING_NTU,
};

pub use forecast::{
    DEFAULT_HORIZON_HOURS, FALLBACK_CONFIDENCE, MAX_HORIZON_HOURS, MIN_HORIZON_HOURS,
    MODEL_CONFIDENCE, TDS_PREDICTION_MAX, TDS_PREDICTION_MIN, TURBIDITY_PREDICTION_MAX,
    TURBIDITY_PREDICTION_MIN,
};
