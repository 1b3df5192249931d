//! Rolling-window outlier detection over the current reporting window.
//!
//! This is a simple moving-window heuristic, not a rigorous statistical
//! test: there is no seasonality adjustment, so a sustained trend change
//! inside the trailing window will be flagged, and a flat trailing window
//! (zero standard deviation) suppresses flagging entirely.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::series::{round2, DailyMetricRecord};

/// Metrics screened for outliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackedMetric {
    Spend,
    Clicks,
    Conversions,
    Impressions,
}

impl TrackedMetric {
    pub const ALL: [TrackedMetric; 4] = [
        TrackedMetric::Spend,
        TrackedMetric::Clicks,
        TrackedMetric::Conversions,
        TrackedMetric::Impressions,
    ];

    fn value(&self, record: &DailyMetricRecord) -> f64 {
        match self {
            Self::Spend => record.spend,
            Self::Clicks => record.clicks as f64,
            Self::Conversions => record.conversions as f64,
            Self::Impressions => record.impressions as f64,
        }
    }
}

/// A day whose value deviated from the trailing-window mean by more than
/// the configured number of standard deviations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub metric: TrackedMetric,
    pub observed: f64,
    /// Trailing-window mean at the flagged day.
    pub expected: f64,
    pub std_dev: f64,
}

/// Scan each tracked metric with a trailing window of `lookback` days.
/// The first checked index is `lookback` itself, so fewer than
/// `lookback + 1` records can never flag anything.
pub fn detect_anomalies(
    window: &[DailyMetricRecord],
    lookback: usize,
    threshold: f64,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();
    if lookback == 0 || window.len() <= lookback {
        return anomalies;
    }

    for metric in TrackedMetric::ALL {
        let values: Vec<f64> = window.iter().map(|r| metric.value(r)).collect();
        for i in lookback..values.len() {
            let trailing = &values[i - lookback..i];
            let mean = trailing.iter().sum::<f64>() / lookback as f64;
            let variance =
                trailing.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / lookback as f64;
            let std_dev = variance.sqrt();

            if std_dev > 0.0 && (values[i] - mean).abs() > threshold * std_dev {
                anomalies.push(Anomaly {
                    date: window[i].date,
                    metric,
                    observed: round2(values[i]),
                    expected: round2(mean),
                    std_dev: round2(std_dev),
                });
            }
        }
    }
    anomalies
}
