//! Potability score deduction brackets
//!
//! The score starts at [`MAX_SCORE`] and loses a fixed amount per axis based
//! on which bracket the reading lands in. Brackets are evaluated top down
//! and only the deepest matching one applies per axis; TDS and turbidity
//! deductions are additive across axes.

// ===== SCORE RANGE =====

/// Best possible potability score
pub const MAX_SCORE: f32 = 100.0;

/// Worst possible potability score
pub const MIN_SCORE: f32 = 0.0;

// ===== TDS DEDUCTIONS =====

/// TDS above this is severely contaminated, mg/L
pub const TDS_SEVERE_MG_L: f32 = 1_200.0;

/// Deduction for severe TDS contamination
pub const TDS_SEVERE_DEDUCTION: f32 = 50.0;

/// TDS above this is heavily contaminated, mg/L
pub const TDS_HIGH_MG_L: f32 = 900.0;

/// Deduction for heavy TDS contamination
pub const TDS_HIGH_DEDUCTION: f32 = 45.0;

/// TDS above this is well past the guideline, mg/L
pub const TDS_ELEVATED_MG_L: f32 = 600.0;

/// Deduction for elevated TDS
pub const TDS_ELEVATED_DEDUCTION: f32 = 40.0;

/// Deduction for TDS just over the guideline limit
///
/// Applies between [`crate::constants::who::TDS_LIMIT_MG_L`] exclusive and
/// [`TDS_ELEVATED_MG_L`] inclusive.
pub const TDS_VIOLATION_DEDUCTION: f32 = 35.0;

// ===== TURBIDITY DEDUCTIONS =====

/// Turbidity above this is severely clouded, NTU
pub const TURBIDITY_SEVERE_NTU: f32 = 50.0;

/// Deduction for severe turbidity
pub const TURBIDITY_SEVERE_DEDUCTION: f32 = 50.0;

/// Turbidity above this is heavily clouded, NTU
pub const TURBIDITY_HIGH_NTU: f32 = 10.0;

/// Deduction for heavy turbidity
pub const TURBIDITY_HIGH_DEDUCTION: f32 = 45.0;

/// Deduction for turbidity just over the warning threshold
///
/// Applies between [`crate::constants::who::TURBIDITY_WARNING_NTU`]
/// exclusive and [`TURBIDITY_HIGH_NTU`] inclusive.
pub const TURBIDITY_WARNING_DEDUCTION: f32 = 35.0;
