//! Forecast clamps, fallback noise, and confidence levels
//!
//! The forecaster is two-tier: trained regressors when artifacts are
//! loadable, a stochastic trend heuristic otherwise. Constants here bound
//! both tiers so a misbehaving model or an unlucky noise draw can never
//! produce a physically absurd prediction.

// ===== PREDICTION CLAMPS =====

/// Lowest TDS a model prediction may report, mg/L
pub const TDS_PREDICTION_MIN: f32 = 50.0;

/// Highest TDS a model prediction may report, mg/L
pub const TDS_PREDICTION_MAX: f32 = 1_500.0;

/// Lowest turbidity a model prediction may report, NTU
pub const TURBIDITY_PREDICTION_MIN: f32 = 0.1;

/// Highest turbidity a model prediction may report, NTU
pub const TURBIDITY_PREDICTION_MAX: f32 = 100.0;

// ===== FALLBACK NOISE =====

/// Relative standard deviation of the TDS trend perturbation
pub const TDS_FALLBACK_SIGMA: f32 = 0.02;

/// Relative standard deviation of the turbidity trend perturbation
pub const TURBIDITY_FALLBACK_SIGMA: f32 = 0.03;

// ===== CONFIDENCE LEVELS =====

/// Confidence reported for model-based forecasts
pub const MODEL_CONFIDENCE: f32 = 0.85;

/// Confidence reported for trend-heuristic forecasts
pub const FALLBACK_CONFIDENCE: f32 = 0.70;

/// Confidence reported for rule-based assessments
pub const ASSESSMENT_CONFIDENCE: f32 = 0.85;

// ===== HORIZON =====

/// Shortest accepted forecast horizon, hours
pub const MIN_HORIZON_HOURS: u32 = 1;

/// Longest accepted forecast horizon, hours
pub const MAX_HORIZON_HOURS: u32 = 48;

/// Horizon used when a request's horizon is out of range
pub const DEFAULT_HORIZON_HOURS: u32 = 6;

// ===== OUTLOOK BANDS =====

/// Predicted TDS above this is critical in the outlook, mg/L
pub const OUTLOOK_TDS_CRITICAL_MG_L: f32 = 400.0;

/// Outlook deduction for critical predicted TDS
pub const OUTLOOK_TDS_CRITICAL_DEDUCTION: f32 = 30.0;

/// Predicted TDS above this is elevated in the outlook, mg/L
pub const OUTLOOK_TDS_ELEVATED_MG_L: f32 = 300.0;

/// Outlook deduction for elevated predicted TDS
pub const OUTLOOK_TDS_ELEVATED_DEDUCTION: f32 = 20.0;

/// Predicted TDS above this is noticeable in the outlook, mg/L
pub const OUTLOOK_TDS_NOTICE_MG_L: f32 = 200.0;

/// Outlook deduction for noticeable predicted TDS
pub const OUTLOOK_TDS_NOTICE_DEDUCTION: f32 = 10.0;

/// Predicted turbidity above this is critical in the outlook, NTU
pub const OUTLOOK_TURBIDITY_CRITICAL_NTU: f32 = 5.0;

/// Outlook deduction for critical predicted turbidity
pub const OUTLOOK_TURBIDITY_CRITICAL_DEDUCTION: f32 = 40.0;

/// Predicted turbidity above this is elevated in the outlook, NTU
pub const OUTLOOK_TURBIDITY_ELEVATED_NTU: f32 = 3.0;

/// Outlook deduction for elevated predicted turbidity
pub const OUTLOOK_TURBIDITY_ELEVATED_DEDUCTION: f32 = 25.0;

/// Predicted turbidity above this is noticeable in the outlook, NTU
pub const OUTLOOK_TURBIDITY_NOTICE_NTU: f32 = 1.5;

/// Outlook deduction for noticeable predicted turbidity
pub const OUTLOOK_TURBIDITY_NOTICE_DEDUCTION: f32 = 10.0;

/// Half-width of the TDS confidence interval as a fraction of the prediction
pub const TDS_CONFIDENCE_MARGIN: f32 = 0.10;

/// Half-width of the turbidity confidence interval as a fraction of the prediction
pub const TURBIDITY_CONFIDENCE_MARGIN: f32 = 0.15;

/// Outlook quality score below this raises a critical alert
pub const ALERT_QUALITY_CRITICAL_SCORE: f32 = 40.0;
