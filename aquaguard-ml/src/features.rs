//! Time-Series Feature Engineering
//!
//! ## Overview
//!
//! Converts raw reading history into the fixed-order numeric vectors the
//! trained models consume. Two vector shapes exist:
//!
//! - **Forecast vector** (12 features): civil-time components, lagged
//!   values, rolling statistics, and the raw sensor channels, computed
//!   as-of the most recent entry of a series for one target quantity.
//! - **Assessment vector** (11 features): the current reading's parameters
//!   plus derived channel approximations, consumed by the potability
//!   classifier and score regressor.
//!
//! ## Contract
//!
//! The builder is a pure function of its inputs: the same series produces
//! bit-identical vectors on every call. Upstream ordering is not trusted,
//! the series is stable-sorted by timestamp first. Entries whose target
//! value is non-finite are skipped rather than aborting the vector, and
//! missing history is backfilled with the most recent available value so
//! every feature is always finite (rolling standard deviation defaults to
//! 0 below two points).
//!
//! ## Example
//!
//! ```
//! use aquaguard_core::{Reading, TargetQuantity};
//! use aquaguard_ml::FeatureBuilder;
//!
//! let history = [
//!     Reading::new(340.0, 0.9, 1_000),
//!     Reading::new(355.0, 1.1, 2_000),
//!     Reading::new(350.0, 1.0, 3_000),
//! ];
//!
//! let vector = FeatureBuilder::forecast_features(
//!     &history,
//!     TargetQuantity::Tds,
//!     350.0,
//!     3_000,
//! );
//! assert_eq!(vector.get("lag_1"), Some(355.0));
//! ```

use aquaguard_core::constants::sensor::{
    ANALOG_PER_TDS, CONDUCTIVITY_PER_TDS, DEFAULT_PROBE_VOLTAGE, QUALITY_INDEX_TDS_SCALE,
    QUALITY_INDEX_TURBIDITY_SCALE, TDS_RATIO_EPSILON, VOLTAGE_PER_TDS,
};
use aquaguard_core::reading::{Reading, TargetQuantity};
use aquaguard_core::time::Timestamp;
use chrono::{DateTime, Datelike, Timelike};

use crate::log_debug;

#[cfg(not(feature = "std"))]
use heapless::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// Number of features in a forecast vector
pub const FORECAST_FEATURE_COUNT: usize = 12;

/// Number of features in an assessment vector
pub const ASSESSMENT_FEATURE_COUNT: usize = 11;

/// Forecast feature names, in vector order
///
/// This order is the training contract; the regressors index positionally.
pub const FORECAST_FEATURE_NAMES: [&str; FORECAST_FEATURE_COUNT] = [
    "hour",
    "day_of_week",
    "day_of_year",
    "lag_1",
    "lag_3",
    "lag_6",
    "lag_12",
    "rolling_mean_3",
    "rolling_mean_6",
    "rolling_std_6",
    "analog_value",
    "voltage",
];

/// Assessment feature names, in vector order
pub const ASSESSMENT_FEATURE_NAMES: [&str; ASSESSMENT_FEATURE_COUNT] = [
    "tds_value",
    "turbidity_value",
    "hour",
    "day_of_week",
    "day_of_year",
    "temperature",
    "voltage",
    "analog_value",
    "conductivity",
    "tds_turbidity_ratio",
    "quality_index",
];

/// Longest series retained on no-std targets
///
/// Entries past the cap are dropped from the back of the (unsorted) input;
/// on-device callers feed a `ReadingWindow` snapshot, which is already
/// bounded well below this.
#[cfg(not(feature = "std"))]
const MAX_SERIES: usize = 128;

/// Fixed-order numeric feature vector
///
/// `N` is the vector shape ([`FORECAST_FEATURE_COUNT`] or
/// [`ASSESSMENT_FEATURE_COUNT`]); positions follow the matching names
/// array. Invariant: every value is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector<const N: usize> {
    values: [f32; N],
}

impl<const N: usize> FeatureVector<N> {
    /// Vector from raw values in contract order
    pub const fn new(values: [f32; N]) -> Self {
        Self { values }
    }

    /// Values as a slice, for model prediction
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Values as the fixed-size array
    pub const fn values(&self) -> &[f32; N] {
        &self.values
    }

    /// Look a value up by its contract name
    ///
    /// Only meaningful for the two standard shapes; other `N` have no
    /// names and always return `None`.
    pub fn get(&self, name: &str) -> Option<f32> {
        let names: &[&str] = match N {
            FORECAST_FEATURE_COUNT => &FORECAST_FEATURE_NAMES,
            ASSESSMENT_FEATURE_COUNT => &ASSESSMENT_FEATURE_NAMES,
            _ => return None,
        };
        let index = names.iter().position(|n| *n == name)?;
        self.values.get(index).copied()
    }

    /// True when every value is finite
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

/// Feature extraction over reading series
///
/// Stateless; all methods are pure functions. The `now` arguments exist so
/// an empty series still has a reference timestamp for its civil-time
/// features, keeping the builder itself clock-free and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Forecast features as-of the most recent entry of `series`
    ///
    /// `current` and `now` only matter when the series is empty (or all
    /// entries are malformed): lags and rolling statistics backfill with
    /// `current`, and civil time comes from `now`. A non-empty series uses
    /// its own latest entry for both, so the vector depends solely on the
    /// series contents.
    pub fn forecast_features(
        series: &[Reading],
        target: TargetQuantity,
        current: f32,
        now: Timestamp,
    ) -> FeatureVector<FORECAST_FEATURE_COUNT> {
        let sorted = prepare_series(series, target);
        if sorted.is_empty() {
            return backfilled_features(current, now);
        }

        row_features(&sorted, target, sorted.len() - 1)
    }

    /// Supervised (features, next-value) pairs for regressor training
    ///
    /// Row `i` pairs its as-of-`i` features with the target's value at
    /// `i + 1`; the final row has no next value and is dropped. Early rows
    /// keep their backfilled lag and rolling features.
    #[cfg(feature = "std")]
    pub fn training_pairs(
        series: &[Reading],
        target: TargetQuantity,
    ) -> Vec<(FeatureVector<FORECAST_FEATURE_COUNT>, f32)> {
        let sorted = prepare_series(series, target);
        if sorted.len() < 2 {
            return Vec::new();
        }

        (0..sorted.len() - 1)
            .map(|i| {
                let features = row_features(&sorted, target, i);
                let next = target.value_of(&sorted[i + 1]);
                (features, next)
            })
            .collect()
    }

    /// Assessment features for the potability models
    ///
    /// Civil time comes from `now` (assessment describes the request
    /// moment, not a series). Raw channels pass through when the reading
    /// carries finite values; otherwise the documented linear
    /// approximations from the TDS value stand in.
    pub fn assessment_features(
        reading: &Reading,
        now: Timestamp,
    ) -> FeatureVector<ASSESSMENT_FEATURE_COUNT> {
        let (hour, day_of_week, day_of_year) = civil_time(now);
        let tds = reading.tds_value;
        let turbidity = reading.turbidity_value;

        let voltage = reading
            .voltage
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_PROBE_VOLTAGE);
        let analog = reading
            .analog_value
            .filter(|v| v.is_finite())
            .unwrap_or(tds * ANALOG_PER_TDS);

        FeatureVector::new([
            tds,
            turbidity,
            hour,
            day_of_week,
            day_of_year,
            reading.temperature,
            voltage,
            analog,
            tds * CONDUCTIVITY_PER_TDS,
            tds / (turbidity + TDS_RATIO_EPSILON),
            tds / QUALITY_INDEX_TDS_SCALE + turbidity / QUALITY_INDEX_TURBIDITY_SCALE,
        ])
    }
}

/// Hour, weekday (Monday = 0), and ordinal day from a timestamp
///
/// Out-of-range timestamps decompose as the Unix epoch rather than
/// erroring; the engine never rejects history over its clock fields.
fn civil_time(timestamp: Timestamp) -> (f32, f32, f32) {
    let datetime = DateTime::from_timestamp_millis(timestamp as i64)
        .unwrap_or(DateTime::UNIX_EPOCH);

    (
        datetime.hour() as f32,
        datetime.weekday().num_days_from_monday() as f32,
        datetime.ordinal() as f32,
    )
}

#[cfg(feature = "std")]
type Series = Vec<Reading>;
#[cfg(not(feature = "std"))]
type Series = Vec<Reading, MAX_SERIES>;

/// Filter malformed entries and sort ascending by timestamp
fn prepare_series(series: &[Reading], target: TargetQuantity) -> Series {
    let mut out = Series::new();
    let mut skipped = 0usize;

    for reading in series {
        if !target.value_of(reading).is_finite() {
            skipped += 1;
            continue;
        }

        #[cfg(feature = "std")]
        out.push(*reading);
        #[cfg(not(feature = "std"))]
        if out.push(*reading).is_err() {
            break;
        }
    }

    if skipped > 0 {
        log_debug!("feature builder skipped {} malformed history entries", skipped);
    }

    sort_by_timestamp(&mut out);
    out
}

/// Stable in-place sort by timestamp
///
/// Insertion sort: series are short (bounded by the retention window), and
/// core's stable sort needs an allocator this crate cannot assume.
fn sort_by_timestamp(series: &mut [Reading]) {
    for i in 1..series.len() {
        let mut j = i;
        while j > 0 && series[j - 1].timestamp > series[j].timestamp {
            series.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Forecast features as-of index `idx` of a sorted, filtered series
fn row_features(
    sorted: &[Reading],
    target: TargetQuantity,
    idx: usize,
) -> FeatureVector<FORECAST_FEATURE_COUNT> {
    let (hour, day_of_week, day_of_year) = civil_time(sorted[idx].timestamp);
    let value = target.value_of(&sorted[idx]);

    let voltage = sorted[idx]
        .voltage
        .filter(|v| v.is_finite())
        .unwrap_or(value * VOLTAGE_PER_TDS);
    let analog = sorted[idx]
        .analog_value
        .filter(|v| v.is_finite())
        .unwrap_or(value * ANALOG_PER_TDS);

    FeatureVector::new([
        hour,
        day_of_week,
        day_of_year,
        lag(sorted, target, idx, 1),
        lag(sorted, target, idx, 3),
        lag(sorted, target, idx, 6),
        lag(sorted, target, idx, 12),
        rolling_mean(sorted, target, idx, 3),
        rolling_mean(sorted, target, idx, 6),
        rolling_std(sorted, target, idx, 6),
        analog,
        voltage,
    ])
}

/// Fully backfilled vector for an empty (or all-malformed) series
///
/// Both targets backfill identically: every lag and mean takes the current
/// value, the deviation is zero, and the channels fall back to their
/// linear approximations.
fn backfilled_features(current: f32, now: Timestamp) -> FeatureVector<FORECAST_FEATURE_COUNT> {
    let (hour, day_of_week, day_of_year) = civil_time(now);

    FeatureVector::new([
        hour,
        day_of_week,
        day_of_year,
        current,
        current,
        current,
        current,
        current,
        current,
        0.0,
        current * ANALOG_PER_TDS,
        current * VOLTAGE_PER_TDS,
    ])
}

/// Target value `k` steps before `idx`, backfilled with the row's own value
fn lag(sorted: &[Reading], target: TargetQuantity, idx: usize, k: usize) -> f32 {
    let source = if idx >= k { idx - k } else { idx };
    target.value_of(&sorted[source])
}

/// Mean of the up-to-`window` most recent values ending at `idx`
fn rolling_mean(sorted: &[Reading], target: TargetQuantity, idx: usize, window: usize) -> f32 {
    let start = (idx + 1).saturating_sub(window);
    let slice = &sorted[start..=idx];

    let sum: f32 = slice.iter().map(|r| target.value_of(r)).sum();
    sum / slice.len() as f32
}

/// Sample standard deviation of the up-to-`window` most recent values
///
/// Zero below two points; sample variance is undefined there and the
/// models expect a calm signal for fresh deployments, not a NaN.
fn rolling_std(sorted: &[Reading], target: TargetQuantity, idx: usize, window: usize) -> f32 {
    let start = (idx + 1).saturating_sub(window);
    let slice = &sorted[start..=idx];
    if slice.len() < 2 {
        return 0.0;
    }

    let mean = rolling_mean(sorted, target, idx, window);
    let sum_sq: f32 = slice
        .iter()
        .map(|r| {
            let d = target.value_of(r) - mean;
            d * d
        })
        .sum();

    libm::sqrtf(sum_sq / (slice.len() - 1) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HOUR_MS: u64 = 3_600_000;

    fn series_of(values: &[f32]) -> std::vec::Vec<Reading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Reading::new(v, 1.0, (i as u64 + 1) * HOUR_MS))
            .collect()
    }

    #[test]
    fn test_feature_order_matches_names() {
        assert_eq!(FORECAST_FEATURE_NAMES.len(), FORECAST_FEATURE_COUNT);
        assert_eq!(ASSESSMENT_FEATURE_NAMES.len(), ASSESSMENT_FEATURE_COUNT);
        assert_eq!(FORECAST_FEATURE_NAMES[3], "lag_1");
        assert_eq!(FORECAST_FEATURE_NAMES[9], "rolling_std_6");
    }

    #[test]
    fn test_empty_series_backfills_with_current() {
        let vector =
            FeatureBuilder::forecast_features(&[], TargetQuantity::Tds, 350.0, 1_700_000_000_000);

        assert!(vector.is_finite());
        for lag_name in ["lag_1", "lag_3", "lag_6", "lag_12"] {
            assert_eq!(vector.get(lag_name), Some(350.0));
        }
        assert_eq!(vector.get("rolling_mean_3"), Some(350.0));
        assert_eq!(vector.get("rolling_mean_6"), Some(350.0));
        assert_eq!(vector.get("rolling_std_6"), Some(0.0));
        assert_eq!(vector.get("analog_value"), Some(350.0 * 2.5));
        assert_eq!(vector.get("voltage"), Some(3.5));
    }

    #[test]
    fn test_single_element_series() {
        let series = series_of(&[420.0]);
        let vector = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 999.0, 0);

        // The series value wins over the caller-supplied current
        assert_eq!(vector.get("lag_1"), Some(420.0));
        assert_eq!(vector.get("lag_12"), Some(420.0));
        assert_eq!(vector.get("rolling_mean_6"), Some(420.0));
        assert_eq!(vector.get("rolling_std_6"), Some(0.0));
    }

    #[test]
    fn test_lags_step_backwards() {
        let values: std::vec::Vec<f32> = (1..=14).map(|i| i as f32 * 10.0).collect();
        let series = series_of(&values);
        let vector = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 0.0, 0);

        // Latest value is 140; lag_k walks back k entries
        assert_eq!(vector.get("lag_1"), Some(130.0));
        assert_eq!(vector.get("lag_3"), Some(110.0));
        assert_eq!(vector.get("lag_6"), Some(80.0));
        assert_eq!(vector.get("lag_12"), Some(20.0));
    }

    #[test]
    fn test_short_series_backfills_per_lag() {
        let series = series_of(&[100.0, 200.0, 300.0, 400.0]);
        let vector = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 0.0, 0);

        // Three steps back exist; six and twelve do not
        assert_eq!(vector.get("lag_1"), Some(300.0));
        assert_eq!(vector.get("lag_3"), Some(100.0));
        assert_eq!(vector.get("lag_6"), Some(400.0));
        assert_eq!(vector.get("lag_12"), Some(400.0));
    }

    #[test]
    fn test_rolling_statistics() {
        let series = series_of(&[10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
        let vector = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 0.0, 0);

        assert_eq!(vector.get("rolling_mean_3"), Some(60.0)); // 50, 60, 70
        assert_eq!(vector.get("rolling_mean_6"), Some(45.0)); // 20..=70

        // Sample std of {20,30,40,50,60,70}: variance 350
        let std = vector.get("rolling_std_6").unwrap();
        assert!((std - 350.0f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn test_shuffled_series_matches_sorted() {
        let sorted = series_of(&[100.0, 110.0, 120.0, 130.0, 140.0]);
        let mut shuffled = sorted.clone();
        shuffled.swap(0, 4);
        shuffled.swap(1, 3);

        let a = FeatureBuilder::forecast_features(&sorted, TargetQuantity::Tds, 0.0, 0);
        let b = FeatureBuilder::forecast_features(&shuffled, TargetQuantity::Tds, 0.0, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_finite_entries_are_skipped() {
        let mut series = series_of(&[100.0, 110.0, 120.0]);
        series.insert(1, Reading::new(f32::NAN, 1.0, 90 * HOUR_MS));
        series.insert(3, Reading::new(f32::INFINITY, 1.0, 91 * HOUR_MS));

        let clean = series_of(&[100.0, 110.0, 120.0]);
        let a = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 0.0, 0);
        let b = FeatureBuilder::forecast_features(&clean, TargetQuantity::Tds, 0.0, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_malformed_series_behaves_as_empty() {
        let series = vec![
            Reading::new(f32::NAN, 1.0, HOUR_MS),
            Reading::new(f32::NEG_INFINITY, 1.0, 2 * HOUR_MS),
        ];

        let a = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 275.0, 42);
        let b = FeatureBuilder::forecast_features(&[], TargetQuantity::Tds, 275.0, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_turbidity_target_selects_other_channel() {
        let series = vec![
            Reading::new(340.0, 0.8, HOUR_MS),
            Reading::new(350.0, 1.2, 2 * HOUR_MS),
        ];
        let vector = FeatureBuilder::forecast_features(&series, TargetQuantity::Turbidity, 0.0, 0);

        assert_eq!(vector.get("lag_1"), Some(0.8));
        assert_eq!(vector.get("rolling_mean_3"), Some(1.0));
    }

    #[test]
    fn test_channel_passthrough() {
        let series = vec![
            Reading::new(340.0, 0.8, HOUR_MS),
            Reading::new(350.0, 1.2, 2 * HOUR_MS).with_channels(880.0, 3.6),
        ];
        let vector = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 0.0, 0);

        assert_eq!(vector.get("analog_value"), Some(880.0));
        assert_eq!(vector.get("voltage"), Some(3.6));
    }

    #[test]
    fn test_civil_time_decomposition() {
        // 2024-01-01 00:00:00 UTC was a Monday
        let (hour, dow, doy) = civil_time(1_704_067_200_000);
        assert_eq!(hour, 0.0);
        assert_eq!(dow, 0.0);
        assert_eq!(doy, 1.0);

        // Six hours later, same day
        let (hour, dow, doy) = civil_time(1_704_067_200_000 + 6 * HOUR_MS);
        assert_eq!(hour, 6.0);
        assert_eq!(dow, 0.0);
        assert_eq!(doy, 1.0);
    }

    #[test]
    fn test_training_pairs_drop_final_row() {
        let series = series_of(&[100.0, 110.0, 120.0, 130.0]);
        let pairs = FeatureBuilder::training_pairs(&series, TargetQuantity::Tds);

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].1, 110.0);
        assert_eq!(pairs[1].1, 120.0);
        assert_eq!(pairs[2].1, 130.0);

        // First row backfills its lags with its own value
        assert_eq!(pairs[0].0.get("lag_1"), Some(100.0));
        // Later rows see real history
        assert_eq!(pairs[2].0.get("lag_1"), Some(110.0));
    }

    #[test]
    fn test_training_pairs_need_two_rows() {
        assert!(FeatureBuilder::training_pairs(&[], TargetQuantity::Tds).is_empty());
        let single = series_of(&[100.0]);
        assert!(FeatureBuilder::training_pairs(&single, TargetQuantity::Tds).is_empty());
    }

    #[test]
    fn test_assessment_features() {
        let reading = Reading::new(350.0, 0.8, 0).with_temperature(22.0);
        let vector = FeatureBuilder::assessment_features(&reading, 1_704_067_200_000);

        assert_eq!(vector.get("tds_value"), Some(350.0));
        assert_eq!(vector.get("turbidity_value"), Some(0.8));
        assert_eq!(vector.get("temperature"), Some(22.0));
        assert_eq!(vector.get("voltage"), Some(3.5));
        assert_eq!(vector.get("analog_value"), Some(875.0));
        assert_eq!(vector.get("conductivity"), Some(700.0));

        let ratio = vector.get("tds_turbidity_ratio").unwrap();
        assert!((ratio - 350.0 / 0.9).abs() < 1e-3);

        let quality = vector.get("quality_index").unwrap();
        assert!((quality - (350.0 / 500.0 + 0.8)).abs() < 1e-5);
    }

    #[test]
    fn test_assessment_channel_passthrough() {
        let reading = Reading::new(350.0, 0.8, 0).with_channels(900.0, 3.7);
        let vector = FeatureBuilder::assessment_features(&reading, 0);

        assert_eq!(vector.get("voltage"), Some(3.7));
        assert_eq!(vector.get("analog_value"), Some(900.0));
    }

    proptest! {
        #[test]
        fn test_vectors_always_finite(
            values in prop::collection::vec(0.0f32..2_000.0, 0..30),
            current in 0.0f32..2_000.0,
        ) {
            let series = series_of(&values);
            let vector = FeatureBuilder::forecast_features(
                &series, TargetQuantity::Tds, current, 1_700_000_000_000,
            );
            prop_assert!(vector.is_finite());
        }

        #[test]
        fn test_builder_is_deterministic(
            values in prop::collection::vec(0.0f32..2_000.0, 0..30),
        ) {
            let series = series_of(&values);
            let a = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 1.0, 7);
            let b = FeatureBuilder::forecast_features(&series, TargetQuantity::Tds, 1.0, 7);
            prop_assert_eq!(a, b);
        }
    }
}
