//! Two-Tier Short-Horizon Forecaster
//!
//! ## Overview
//!
//! Predicts the next TDS and turbidity values from the current readings
//! plus whatever history the caller has. Tier one runs the trained
//! per-target regressors over freshly built feature vectors and clamps the
//! result into physically plausible ranges. Tier two, taken whenever tier
//! one cannot answer for any reason, perturbs the current value with a
//! small zero-mean multiplicative noise draw.
//!
//! The fallback is deliberately stochastic rather than an extrapolation;
//! it mirrors the deployed behavior and its spread (2% TDS, 3% turbidity)
//! is narrow enough that consumers see a plausible near-term value, never
//! a flat echo that would masquerade as a confident model output. Which
//! tier answered is visible in [`ForecastResult::method`] and the
//! confidence level.
//!
//! ## Example
//!
//! ```
//! use aquaguard_ml::forecast::{ForecastMethod, Forecaster};
//!
//! // No models loaded: the trend heuristic answers
//! let mut forecaster = Forecaster::with_seed(None, 1_700_000_000_000, 42);
//! let result = forecaster.forecast(350.0, 0.8, 6, &[]);
//!
//! assert_eq!(result.method, ForecastMethod::TrendBased);
//! assert_eq!(result.confidence, 0.70);
//! assert_eq!(result.horizon_hours, 6);
//! ```

use aquaguard_core::constants::forecast::{
    DEFAULT_HORIZON_HOURS, FALLBACK_CONFIDENCE, MAX_HORIZON_HOURS, MIN_HORIZON_HOURS,
    MODEL_CONFIDENCE, TDS_FALLBACK_SIGMA, TDS_PREDICTION_MAX, TDS_PREDICTION_MIN,
    TURBIDITY_FALLBACK_SIGMA, TURBIDITY_PREDICTION_MAX, TURBIDITY_PREDICTION_MIN,
};
use aquaguard_core::reading::{Reading, TargetQuantity};
use aquaguard_core::time::Timestamp;
use serde::Serialize;

use crate::features::FeatureBuilder;
use crate::model::{MlResult, ModelBundle, ModelError};
use crate::{log_debug, log_warn, Rng};

/// Which tier produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ForecastMethod {
    /// Trained regression models answered
    #[serde(rename = "ml_models")]
    ModelBased,
    /// The trend heuristic answered
    #[serde(rename = "trend_analysis")]
    TrendBased,
}

impl ForecastMethod {
    /// Wire string used in responses and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModelBased => "ml_models",
            Self::TrendBased => "trend_analysis",
        }
    }
}

/// Outcome of one forecast request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastResult {
    /// Predicted TDS in mg/L
    pub predicted_tds: f32,
    /// Predicted turbidity in NTU
    pub predicted_turbidity: f32,
    /// Confidence in `[0, 1]`, fixed per tier
    pub confidence: f32,
    /// Which tier answered
    pub method: ForecastMethod,
    /// Normalized horizon echoed back to the caller
    pub horizon_hours: u8,
}

/// Two-tier forecaster over an optional model bundle
///
/// Borrows the process-wide bundle; the only state of its own is the
/// fallback RNG, which is why `forecast` takes `&mut self`. The service
/// constructs one per call with a clock-derived seed, tests pin the seed.
#[derive(Debug)]
pub struct Forecaster<'a> {
    models: Option<&'a ModelBundle>,
    rng: Rng,
    now: Timestamp,
}

impl<'a> Forecaster<'a> {
    /// Forecaster with a seed derived from `now`
    pub fn new(models: Option<&'a ModelBundle>, now: Timestamp) -> Self {
        Self::with_seed(models, now, (now as u32) ^ ((now >> 32) as u32))
    }

    /// Forecaster with an explicit RNG seed, for reproducible fallbacks
    pub fn with_seed(models: Option<&'a ModelBundle>, now: Timestamp, seed: u32) -> Self {
        Self {
            models,
            rng: Rng::new(seed),
            now,
        }
    }

    /// Forecast both quantities; never fails
    ///
    /// Any tier-one problem (no bundle, missing regressor, shape mismatch,
    /// corrupt tree) degrades to the trend heuristic. Out-of-range
    /// horizons are normalized to the default and echoed back.
    pub fn forecast(
        &mut self,
        current_tds: f32,
        current_turbidity: f32,
        horizon_hours: u32,
        history: &[Reading],
    ) -> ForecastResult {
        let horizon = normalize_horizon(horizon_hours);

        match self.model_forecast(current_tds, current_turbidity, history) {
            Ok((predicted_tds, predicted_turbidity)) => ForecastResult {
                predicted_tds: predicted_tds.clamp(TDS_PREDICTION_MIN, TDS_PREDICTION_MAX),
                predicted_turbidity: predicted_turbidity
                    .clamp(TURBIDITY_PREDICTION_MIN, TURBIDITY_PREDICTION_MAX),
                confidence: MODEL_CONFIDENCE,
                method: ForecastMethod::ModelBased,
                horizon_hours: horizon,
            },
            Err(ModelError::ArtifactMissing) => {
                // Normal no-model condition, not worth a warning per call
                log_debug!("no forecast models loaded, using trend heuristic");
                self.trend_forecast(current_tds, current_turbidity, horizon)
            }
            Err(err) => {
                log_warn!("model forecast failed ({}), using trend heuristic", err);
                self.trend_forecast(current_tds, current_turbidity, horizon)
            }
        }
    }

    /// Tier one: run both trained regressors
    fn model_forecast(
        &self,
        current_tds: f32,
        current_turbidity: f32,
        history: &[Reading],
    ) -> MlResult<(f32, f32)> {
        let bundle = self.models.ok_or(ModelError::ArtifactMissing)?;
        let tds_model = bundle
            .tds_forecaster
            .as_ref()
            .ok_or(ModelError::ArtifactMissing)?;
        let turbidity_model = bundle
            .turbidity_forecaster
            .as_ref()
            .ok_or(ModelError::ArtifactMissing)?;

        let tds_features =
            FeatureBuilder::forecast_features(history, TargetQuantity::Tds, current_tds, self.now);
        let turbidity_features = FeatureBuilder::forecast_features(
            history,
            TargetQuantity::Turbidity,
            current_turbidity,
            self.now,
        );

        let predicted_tds = tds_model.predict(tds_features.as_slice())?;
        let predicted_turbidity = turbidity_model.predict(turbidity_features.as_slice())?;

        Ok((predicted_tds, predicted_turbidity))
    }

    /// Tier two: zero-mean multiplicative perturbation of the current values
    fn trend_forecast(
        &mut self,
        current_tds: f32,
        current_turbidity: f32,
        horizon: u8,
    ) -> ForecastResult {
        let tds_noise = 1.0 + TDS_FALLBACK_SIGMA * self.sample_normal();
        let turbidity_noise = 1.0 + TURBIDITY_FALLBACK_SIGMA * self.sample_normal();

        ForecastResult {
            predicted_tds: current_tds * tds_noise,
            predicted_turbidity: current_turbidity * turbidity_noise,
            confidence: FALLBACK_CONFIDENCE,
            method: ForecastMethod::TrendBased,
            horizon_hours: horizon,
        }
    }

    /// Standard normal draw via the Box-Muller transform
    fn sample_normal(&mut self) -> f32 {
        // Guard the log argument away from zero
        let u1 = self.rng.next_f32().max(f32::EPSILON);
        let u2 = self.rng.next_f32();

        libm::sqrtf(-2.0 * libm::logf(u1)) * libm::cosf(core::f32::consts::TAU * u2)
    }
}

/// Clamp a requested horizon into the supported range
///
/// Out-of-range values silently become the default; the caller sees the
/// normalized value echoed in the result.
pub fn normalize_horizon(horizon_hours: u32) -> u8 {
    if (MIN_HORIZON_HOURS..=MAX_HORIZON_HOURS).contains(&horizon_hours) {
        horizon_hours as u8
    } else {
        log_debug!(
            "horizon {}h outside supported range, using default",
            horizon_hours
        );
        DEFAULT_HORIZON_HOURS as u8
    }
}
