//! Integration tests for the two-tier forecaster
//!
//! Covers the model path end to end from a JSON artifact and the
//! statistical behavior of the trend fallback across many seeds.

use aquaguard_core::Reading;
use aquaguard_ml::{ForecastMethod, Forecaster, ModelBundle};
use rand::{Rng as _, SeedableRng};

const HOUR_MS: u64 = 3_600_000;

/// Forecast regressor pair parsed from the artifact wire format; the TDS
/// tree splits on rolling_mean_3 (feature index 7)
fn bundle_from_artifact() -> ModelBundle {
    let json = br#"{
        "tds_forecaster": {
            "n_features": 12,
            "trees": [
                { "nodes": [
                    { "feature": 7, "threshold": 450.0, "left": 1, "right": 2 },
                    { "value": 380.0 },
                    { "value": 520.0 }
                ] },
                { "nodes": [ { "value": 400.0 } ] }
            ]
        },
        "turbidity_forecaster": {
            "n_features": 12,
            "trees": [ { "nodes": [ { "value": 1.4 } ] } ]
        }
    }"#;
    ModelBundle::from_json_slice(json).unwrap()
}

fn rising_history(base: f32, step: f32, hours: usize) -> Vec<Reading> {
    (0..hours)
        .map(|h| Reading::new(base + step * h as f32, 1.0, (h as u64 + 1) * HOUR_MS))
        .collect()
}

#[test]
fn test_model_path_from_json_artifact() {
    let bundle = bundle_from_artifact();
    assert!(bundle.has_forecast_models());

    // Calm history keeps rolling_mean_3 under the split threshold
    let calm = rising_history(340.0, 1.0, 8);
    let mut forecaster = Forecaster::with_seed(Some(&bundle), 0, 1);
    let result = forecaster.forecast(350.0, 1.0, 12, &calm);

    assert_eq!(result.method, ForecastMethod::ModelBased);
    assert_eq!(result.confidence, 0.85);
    assert_eq!(result.horizon_hours, 12);
    // Mean over the two trees: (380 + 400) / 2
    assert_eq!(result.predicted_tds, 390.0);
    assert_eq!(result.predicted_turbidity, 1.4);

    // Deteriorating history crosses the threshold and lands on the other leaf
    let deteriorating = rising_history(460.0, 5.0, 8);
    let result = forecaster.forecast(500.0, 1.0, 12, &deteriorating);
    assert_eq!(result.predicted_tds, (520.0 + 400.0) / 2.0);
}

#[test]
fn test_forecast_serializes_wire_method_names() {
    let bundle = bundle_from_artifact();
    let mut forecaster = Forecaster::with_seed(Some(&bundle), 0, 1);

    let modeled = forecaster.forecast(350.0, 1.0, 6, &[]);
    let json = serde_json::to_value(modeled).unwrap();
    assert_eq!(json["method"], "ml_models");
    assert_eq!(json["horizon_hours"], 6);

    let mut bare = Forecaster::with_seed(None, 0, 1);
    let fallback = bare.forecast(350.0, 1.0, 6, &[]);
    let json = serde_json::to_value(fallback).unwrap();
    assert_eq!(json["method"], "trend_analysis");
    assert_eq!(json["confidence"], 0.7);
}

#[test]
fn test_fallback_perturbation_is_small_and_centered() {
    let mut seeds = rand::rngs::StdRng::seed_from_u64(0x5eed);
    let trials = 500;

    let mut within_five_sigma = 0;
    let mut above = 0;
    for _ in 0..trials {
        let mut forecaster = Forecaster::with_seed(None, 0, seeds.gen());
        let result = forecaster.forecast(350.0, 0.8, 6, &[]);

        let tds_ratio = result.predicted_tds / 350.0;
        let turbidity_ratio = result.predicted_turbidity / 0.8;

        // Hard bound: the normal draw cannot exceed ~5.65 sigma, so the
        // multiplicative factor stays well inside these envelopes
        assert!(tds_ratio > 0.88 && tds_ratio < 1.12);
        assert!(turbidity_ratio > 0.82 && turbidity_ratio < 1.18);

        if (tds_ratio - 1.0).abs() <= 0.10 {
            within_five_sigma += 1;
        }
        if tds_ratio > 1.0 {
            above += 1;
        }
    }

    // 10% is five sigmas of the 2% TDS noise; essentially every draw lands
    // inside, and the zero-mean noise goes both ways
    assert!(within_five_sigma >= trials - 5);
    assert!(above > trials / 10 && above < trials * 9 / 10);
}

#[test]
fn test_fallback_scales_with_current_value() {
    // The perturbation is multiplicative: the same seed produces the same
    // relative deviation at any magnitude
    let mut small = Forecaster::with_seed(None, 0, 77);
    let mut large = Forecaster::with_seed(None, 0, 77);

    let a = small.forecast(100.0, 1.0, 6, &[]);
    let b = large.forecast(1_000.0, 10.0, 6, &[]);

    assert!((a.predicted_tds * 10.0 - b.predicted_tds).abs() < 1e-2);
    assert!((a.predicted_turbidity * 10.0 - b.predicted_turbidity).abs() < 1e-3);
}

#[test]
fn test_history_order_does_not_matter() {
    let bundle = bundle_from_artifact();
    let history = rising_history(340.0, 2.0, 10);
    let mut reversed = history.clone();
    reversed.reverse();

    let mut a = Forecaster::with_seed(Some(&bundle), 0, 1);
    let mut b = Forecaster::with_seed(Some(&bundle), 0, 1);

    assert_eq!(
        a.forecast(350.0, 1.0, 6, &history),
        b.forecast(350.0, 1.0, 6, &reversed)
    );
}

#[test]
fn test_malformed_artifact_bytes_are_rejected() {
    assert!(ModelBundle::from_json_slice(b"{\"tds_forecaster\": 42}").is_err());
    assert!(ModelBundle::from_json_slice(b"").is_err());
}
