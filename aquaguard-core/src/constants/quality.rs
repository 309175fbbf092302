//! Quality classification bands
//!
//! Display banding for dashboards and alerting. Bands never influence the
//! potability verdict, which comes solely from the rule evaluator.

// ===== SCORE CLASSIFICATION BANDS =====

/// Minimum score for the Excellent band
pub const QUALITY_EXCELLENT_MIN: f32 = 90.0;

/// Minimum score for the Good band
pub const QUALITY_GOOD_MIN: f32 = 75.0;

/// Minimum score for the Fair band
pub const QUALITY_FAIR_MIN: f32 = 60.0;

/// Minimum score for the Poor band; below this is Unsafe
pub const QUALITY_POOR_MIN: f32 = 40.0;

// ===== TURBIDITY DISPLAY BANDS =====

/// Turbidity at or below this displays as good, NTU
///
/// Source: WHO aesthetic target of 1 NTU for chlorinated supplies
pub const TURBIDITY_GOOD_MAX_NTU: f32 = 1.0;

/// Turbidity at or below this displays as warning; above is bad, NTU
pub const TURBIDITY_WARNING_MAX_NTU: f32 = 50.0;
