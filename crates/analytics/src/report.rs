//! Trend-report pipeline: adapt, merge, window, compare, screen anomalies.

use serde::{Deserialize, Serialize};
use tracing::debug;

use marketpulse_core::config::AnalyticsConfig;

use crate::anomaly::{detect_anomalies, Anomaly};
use crate::merge::{merge_sources, SourceBatch};
use crate::series::DailyMetricRecord;
use crate::window::{split_windows, Period, PeriodComparison, PeriodSummary};

/// Full output of one trend analysis run. `series` is the complete merged
/// daily series, of which the summaries cover the trailing windows;
/// `previous` and `comparison` are `None` when the series is too short to
/// supply a full prior window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub series: Vec<DailyMetricRecord>,
    pub current: PeriodSummary,
    pub previous: Option<PeriodSummary>,
    pub comparison: Option<PeriodComparison>,
    pub anomalies: Vec<Anomaly>,
}

/// Runs the aggregation pipeline. Pure computation over already-fetched
/// rows; recomputes from scratch on every call.
pub struct TrendAnalyzer {
    config: AnalyticsConfig,
}

impl TrendAnalyzer {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, batches: &[SourceBatch<'_>], period: Period) -> TrendReport {
        let series = merge_sources(batches);
        let (current_slice, previous_slice) = split_windows(&series, period);

        let current = PeriodSummary::from_slice(current_slice);
        let previous = previous_slice.map(PeriodSummary::from_slice);
        let comparison = previous
            .as_ref()
            .map(|prev| PeriodComparison::between(&current, prev));

        let anomalies = detect_anomalies(
            current_slice,
            self.config.anomaly_window,
            self.config.anomaly_threshold,
        );

        debug!(
            days = series.len(),
            period = period.days(),
            anomalies = anomalies.len(),
            has_baseline = previous.is_some(),
            "Trend analysis complete"
        );

        TrendReport {
            series,
            current,
            previous,
            comparison,
            anomalies,
        }
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MetaAdsAdapter;
    use serde_json::{json, Value};

    fn meta_rows(days: u64, clicks_per_day: u64) -> Vec<Value> {
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..days)
            .map(|i| {
                json!({
                    "date_start": (start + chrono::Days::new(i)).to_string(),
                    "impressions": 1000,
                    "clicks": clicks_per_day,
                    "spend": 10.0
                })
            })
            .collect()
    }

    #[test]
    fn test_report_with_full_baseline() {
        let rows = meta_rows(14, 50);
        let report = TrendAnalyzer::default()
            .analyze(&[SourceBatch::new(&MetaAdsAdapter, &rows)], Period::Days7);

        // The report carries the full merged series; the summaries cover
        // the trailing windows.
        assert_eq!(report.series.len(), 14);
        assert_eq!(report.current.days, 7);
        assert_eq!(report.current.clicks, 350);
        let previous = report.previous.unwrap();
        assert_eq!(previous.clicks, 350);
        // Flat week over week: every delta is 0.
        let cmp = report.comparison.unwrap();
        assert_eq!(cmp.clicks, 0.0);
        assert_eq!(cmp.spend, 0.0);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_report_degrades_without_prior_data() {
        let rows = meta_rows(5, 50);
        let report = TrendAnalyzer::default()
            .analyze(&[SourceBatch::new(&MetaAdsAdapter, &rows)], Period::Days7);

        assert_eq!(report.current.days, 5);
        assert!(report.previous.is_none());
        assert!(report.comparison.is_none());
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_report_on_empty_input() {
        let report = TrendAnalyzer::default().analyze(&[], Period::Days30);
        assert!(report.series.is_empty());
        assert_eq!(report.current.days, 0);
        assert_eq!(report.current.ctr, 0.0);
        assert!(report.previous.is_none());
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_anomalies_screen_current_window_only() {
        // 14 flat days, then a varied week ending in a spike. With a 14-day
        // period the spike sits inside the current window and flags.
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let clicks = [
            50, 50, 50, 50, 50, 50, 50, 48, 52, 49, 51, 50, 49, 400,
        ];
        let rows: Vec<Value> = clicks
            .iter()
            .enumerate()
            .map(|(i, c)| {
                json!({
                    "date_start": (start + chrono::Days::new(i as u64)).to_string(),
                    "clicks": c
                })
            })
            .collect();

        let report = TrendAnalyzer::default()
            .analyze(&[SourceBatch::new(&MetaAdsAdapter, &rows)], Period::Days14);
        assert!(report
            .anomalies
            .iter()
            .any(|a| a.observed == 400.0));
    }
}
