//! Forecast Outlook and Alerting
//!
//! Presentation layer over a [`ForecastResult`]: per-quantity trend
//! direction and confidence interval, a predicted quality score with its
//! display band, and the alert list dashboards render. The outlook never
//! feeds back into assessment or forecasting; its bracket table is
//! deliberately stricter than the potability limits because it watches for
//! deterioration *toward* a violation, not just past one.

use aquaguard_core::constants::forecast::{
    ALERT_QUALITY_CRITICAL_SCORE, OUTLOOK_TDS_CRITICAL_DEDUCTION, OUTLOOK_TDS_CRITICAL_MG_L,
    OUTLOOK_TDS_ELEVATED_DEDUCTION, OUTLOOK_TDS_ELEVATED_MG_L, OUTLOOK_TDS_NOTICE_DEDUCTION,
    OUTLOOK_TDS_NOTICE_MG_L, OUTLOOK_TURBIDITY_CRITICAL_DEDUCTION, OUTLOOK_TURBIDITY_CRITICAL_NTU,
    OUTLOOK_TURBIDITY_ELEVATED_DEDUCTION, OUTLOOK_TURBIDITY_ELEVATED_NTU,
    OUTLOOK_TURBIDITY_NOTICE_DEDUCTION, OUTLOOK_TURBIDITY_NOTICE_NTU, TDS_CONFIDENCE_MARGIN,
    TURBIDITY_CONFIDENCE_MARGIN,
};
use aquaguard_core::quality::{risk_score, QualityBand};
use serde::Serialize;

use crate::forecast::ForecastResult;

/// Alert text for critical predicted TDS
pub const TDS_CRITICAL_ALERT: &str =
    "High TDS levels detected. Water may be unsafe for consumption.";

/// Alert text for elevated predicted TDS
pub const TDS_WARNING_ALERT: &str = "Elevated TDS levels. Monitor water quality closely.";

/// Alert text for critical predicted turbidity
pub const TURBIDITY_CRITICAL_ALERT: &str =
    "High turbidity detected. Water treatment may be required.";

/// Alert text for elevated predicted turbidity
pub const TURBIDITY_WARNING_ALERT: &str = "Elevated turbidity levels. Consider water treatment.";

/// Alert text for a predicted quality score below safe standards
pub const QUALITY_CRITICAL_ALERT: &str =
    "Water quality is below safe standards. Immediate action required.";

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Worth watching
    Warning,
    /// Needs action
    Critical,
}

/// One outlook alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Severity of the alert
    #[serde(rename = "type")]
    pub level: AlertLevel,
    /// Fixed display text
    pub message: &'static str,
}

/// Direction of predicted change for one quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Predicted above current
    Increasing,
    /// Predicted below current
    Decreasing,
    /// Predicted equal to current
    Stable,
}

impl TrendDirection {
    fn compare(current: f32, predicted: f32) -> Self {
        if predicted > current {
            Self::Increasing
        } else if predicted < current {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }
}

/// Outlook for a single quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityOutlook {
    /// Current value
    pub current: f32,
    /// Predicted value
    pub predicted: f32,
    /// Direction of predicted change
    pub trend: TrendDirection,
    /// Lower edge of the confidence interval
    pub confidence_lower: f32,
    /// Upper edge of the confidence interval
    pub confidence_upper: f32,
    /// Horizon the prediction covers, hours
    pub horizon_hours: u8,
}

impl QuantityOutlook {
    fn build(current: f32, predicted: f32, margin: f32, horizon_hours: u8) -> Self {
        let half_width = predicted * margin;
        Self {
            current,
            predicted,
            trend: TrendDirection::compare(current, predicted),
            confidence_lower: predicted - half_width,
            confidence_upper: predicted + half_width,
            horizon_hours,
        }
    }
}

/// Predicted quality classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityOutlook {
    /// Display band for the predicted score
    pub predicted_quality: QualityBand,
    /// Predicted quality score on the 0-100 scale
    pub quality_score: f32,
    /// Inverse of the quality score
    pub risk_score: f32,
    /// Confidence inherited from the forecast tier
    pub confidence: f32,
}

/// Complete dashboard outlook for one forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutlook {
    /// TDS outlook
    pub tds: QuantityOutlook,
    /// Turbidity outlook
    pub turbidity: QuantityOutlook,
    /// Predicted quality classification
    pub quality: QualityOutlook,
    /// Alerts raised by the predicted values, TDS first
    pub alerts: Vec<Alert>,
}

impl ForecastOutlook {
    /// Assemble the outlook from current values and a forecast
    pub fn build(current_tds: f32, current_turbidity: f32, forecast: &ForecastResult) -> Self {
        let quality_score =
            outlook_quality_score(forecast.predicted_tds, forecast.predicted_turbidity);

        Self {
            tds: QuantityOutlook::build(
                current_tds,
                forecast.predicted_tds,
                TDS_CONFIDENCE_MARGIN,
                forecast.horizon_hours,
            ),
            turbidity: QuantityOutlook::build(
                current_turbidity,
                forecast.predicted_turbidity,
                TURBIDITY_CONFIDENCE_MARGIN,
                forecast.horizon_hours,
            ),
            quality: QualityOutlook {
                predicted_quality: QualityBand::from_score(quality_score),
                quality_score,
                risk_score: risk_score(quality_score),
                confidence: forecast.confidence,
            },
            alerts: build_alerts(
                forecast.predicted_tds,
                forecast.predicted_turbidity,
                quality_score,
            ),
        }
    }
}

/// Predicted quality score from the outlook bracket table
///
/// Stricter brackets than the potability score: a source can be fully
/// compliant today and still deserve a degraded outlook.
pub fn outlook_quality_score(predicted_tds: f32, predicted_turbidity: f32) -> f32 {
    let mut score = 100.0;

    if predicted_tds > OUTLOOK_TDS_CRITICAL_MG_L {
        score -= OUTLOOK_TDS_CRITICAL_DEDUCTION;
    } else if predicted_tds > OUTLOOK_TDS_ELEVATED_MG_L {
        score -= OUTLOOK_TDS_ELEVATED_DEDUCTION;
    } else if predicted_tds > OUTLOOK_TDS_NOTICE_MG_L {
        score -= OUTLOOK_TDS_NOTICE_DEDUCTION;
    }

    if predicted_turbidity > OUTLOOK_TURBIDITY_CRITICAL_NTU {
        score -= OUTLOOK_TURBIDITY_CRITICAL_DEDUCTION;
    } else if predicted_turbidity > OUTLOOK_TURBIDITY_ELEVATED_NTU {
        score -= OUTLOOK_TURBIDITY_ELEVATED_DEDUCTION;
    } else if predicted_turbidity > OUTLOOK_TURBIDITY_NOTICE_NTU {
        score -= OUTLOOK_TURBIDITY_NOTICE_DEDUCTION;
    }

    score.clamp(0.0, 100.0)
}

fn build_alerts(predicted_tds: f32, predicted_turbidity: f32, quality_score: f32) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if predicted_tds > OUTLOOK_TDS_CRITICAL_MG_L {
        alerts.push(Alert {
            level: AlertLevel::Critical,
            message: TDS_CRITICAL_ALERT,
        });
    } else if predicted_tds > OUTLOOK_TDS_ELEVATED_MG_L {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            message: TDS_WARNING_ALERT,
        });
    }

    if predicted_turbidity > OUTLOOK_TURBIDITY_CRITICAL_NTU {
        alerts.push(Alert {
            level: AlertLevel::Critical,
            message: TURBIDITY_CRITICAL_ALERT,
        });
    } else if predicted_turbidity > OUTLOOK_TURBIDITY_ELEVATED_NTU {
        alerts.push(Alert {
            level: AlertLevel::Warning,
            message: TURBIDITY_WARNING_ALERT,
        });
    }

    if quality_score < ALERT_QUALITY_CRITICAL_SCORE {
        alerts.push(Alert {
            level: AlertLevel::Critical,
            message: QUALITY_CRITICAL_ALERT,
        });
    }

    alerts
}
