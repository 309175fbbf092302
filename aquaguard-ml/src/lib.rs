//! Forecasting and Model-Backed Assessment for AquaGuard
//!
//! ## Overview
//!
//! This crate adds the trained-model tier on top of `aquaguard-core`'s rule
//! engine. It owns three things:
//!
//! 1. **Feature engineering**: turning an unordered slice of historical
//!    readings into the fixed-order lag/rolling feature vectors the
//!    regressors were trained on, plus the 11-feature vector the potability
//!    classifier consumes.
//! 2. **Model artifacts**: JSON-serialized decision-tree ensembles with a
//!    single `predict` capability, loaded once at startup and read-only
//!    thereafter.
//! 3. **Orchestration**: the [`AssessmentService`] a serving layer calls,
//!    and the two-tier [`Forecaster`] behind it.
//!
//! ## Degradation Philosophy
//!
//! Models are advisory everywhere. The rule evaluator decides potability on
//! its own, and the forecaster falls back to a trend heuristic when an
//! artifact is missing or misbehaves. Nothing past input validation can
//! fail outward:
//!
//! ```text
//! assess:   rules always answer; models only annotate prediction_method
//! forecast: trained regressors ──(any failure)──► trend heuristic
//! ```
//!
//! Which tier answered is reported in the result metadata
//! (`ml_models_loaded`, `prediction_method`, [`ForecastMethod`]); callers
//! that care about provenance read it there rather than from logs.
//!
//! ## Feature Availability
//!
//! Feature extraction is `no_std`-capable so edge nodes can precompute
//! vectors next to their [`ReadingWindow`]. Model loading, forecasting, and
//! the service layer need `std` (the default).
//!
//! [`AssessmentService`]: service::AssessmentService
//! [`Forecaster`]: forecast::Forecaster
//! [`ForecastMethod`]: forecast::ForecastMethod
//! [`ReadingWindow`]: aquaguard_core::buffer::ReadingWindow

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod features;

#[cfg(feature = "std")]
pub mod forecast;
#[cfg(feature = "std")]
pub mod model;
#[cfg(feature = "std")]
pub mod outlook;
#[cfg(feature = "std")]
pub mod request;
#[cfg(feature = "std")]
pub mod service;

// Public API
pub use features::{
    FeatureBuilder, FeatureVector, ASSESSMENT_FEATURE_COUNT, ASSESSMENT_FEATURE_NAMES,
    FORECAST_FEATURE_COUNT, FORECAST_FEATURE_NAMES,
};

#[cfg(feature = "std")]
pub use forecast::{ForecastMethod, ForecastResult, Forecaster};
#[cfg(feature = "std")]
pub use model::{
    ClassifierModel, MlResult, ModelBundle, ModelError, ModelInfo, RegressionTree, RegressorModel,
    TreeNode,
};
#[cfg(feature = "std")]
pub use outlook::{Alert, AlertLevel, ForecastOutlook, TrendDirection};
#[cfg(feature = "std")]
pub use request::AssessRequest;
#[cfg(feature = "std")]
pub use service::{AssessmentResponse, AssessmentService};

/// Logging shim; compiles to an argument no-op without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ let _ = ($($arg)*,); }};
}

/// Logging shim; compiles to an argument no-op without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{ let _ = ($($arg)*,); }};
}

pub(crate) use log_debug;
pub(crate) use log_warn;

/// Xorshift32 pseudo-random generator
///
/// Drives the trend-heuristic perturbation. Seeding is explicit so a fixed
/// seed reproduces a forecast exactly; the service derives a fresh seed
/// from its clock per call.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Generator seeded with `seed`; zero is remapped (xorshift fixpoint)
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Next raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in `[0, 1]`
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }
}
