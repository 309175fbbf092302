//! WHO guideline limits and input domains
//!
//! The two potability limits are the whole rulebook: every verdict the
//! evaluator produces derives from them. Instrument domains are deliberately
//! wider, they bound what the probes can physically report rather than what
//! is safe to drink.

// ===== POTABILITY LIMITS =====

/// Maximum TDS for potable water in mg/L
///
/// Water above this limit is classified not potable regardless of the other
/// parameters.
///
/// Source: WHO Guidelines for Drinking-water Quality, palatability threshold
pub const TDS_LIMIT_MG_L: f32 = 500.0;

/// Turbidity warning threshold in NTU
///
/// Above this level particulates can shield microorganisms from
/// disinfection, so the water is classified not potable.
///
/// Source: WHO operational guidance for effective chlorination
pub const TURBIDITY_WARNING_NTU: f32 = 5.0;

// ===== INSTRUMENT DOMAINS =====

/// Minimum reportable TDS in mg/L
pub const TDS_VALID_MIN: f32 = 0.0;

/// Maximum reportable TDS in mg/L
///
/// Gravimetric TDS meters saturate near seawater concentration.
pub const TDS_VALID_MAX: f32 = 10_000.0;

/// Minimum reportable turbidity in NTU
pub const TURBIDITY_VALID_MIN: f32 = 0.0;

/// Maximum reportable turbidity in NTU
///
/// Optical turbidity sensors in this class saturate at 100 NTU.
pub const TURBIDITY_VALID_MAX: f32 = 100.0;

/// Minimum reportable water temperature in Celsius
pub const TEMPERATURE_VALID_MIN_C: f32 = -10.0;

/// Maximum reportable water temperature in Celsius
pub const TEMPERATURE_VALID_MAX_C: f32 = 50.0;

/// Minimum pH value
pub const PH_VALID_MIN: f32 = 0.0;

/// Maximum pH value
pub const PH_VALID_MAX: f32 = 14.0;

// ===== REQUEST DEFAULTS =====

/// TDS assumed when a request omits it, mg/L
pub const DEFAULT_TDS_MG_L: f32 = 350.0;

/// Turbidity assumed when a request omits it, NTU
pub const DEFAULT_TURBIDITY_NTU: f32 = 0.8;

/// Water temperature assumed when a request omits it, Celsius
pub const DEFAULT_TEMPERATURE_C: f32 = 25.0;

/// pH assumed when a request omits it
pub const DEFAULT_PH_LEVEL: f32 = 7.0;
