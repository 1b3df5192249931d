//! Period windowing and period-over-period comparison.

use serde::{Deserialize, Serialize};

use crate::series::{ratio, round2, DailyMetricRecord};

/// Selectable reporting period length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Days7,
    Days14,
    Days30,
    Days90,
}

impl Period {
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(Self::Days7),
            14 => Some(Self::Days14),
            30 => Some(Self::Days30),
            90 => Some(Self::Days90),
            _ => None,
        }
    }

    pub fn days(&self) -> usize {
        match self {
            Self::Days7 => 7,
            Self::Days14 => 14,
            Self::Days30 => 30,
            Self::Days90 => 90,
        }
    }
}

/// Aggregate of a contiguous slice of daily records: volume sums plus rate
/// metrics derived from those sums. Rates and currency amounts carry the
/// central two-decimal rounding policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub days: usize,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: u64,
    pub revenue: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub cpa: f64,
    pub conversion_rate: f64,
    pub roas: f64,
    pub roi: f64,
}

impl PeriodSummary {
    pub fn from_slice(records: &[DailyMetricRecord]) -> Self {
        let impressions: u64 = records.iter().map(|r| r.impressions).sum();
        let clicks: u64 = records.iter().map(|r| r.clicks).sum();
        let spend: f64 = records.iter().map(|r| r.spend).sum();
        let conversions: u64 = records.iter().map(|r| r.conversions).sum();
        let revenue: f64 = records.iter().map(|r| r.revenue).sum();

        Self {
            days: records.len(),
            impressions,
            clicks,
            spend: round2(spend),
            conversions,
            revenue: round2(revenue),
            ctr: round2(ratio(clicks as f64 * 100.0, impressions as f64)),
            cpc: round2(ratio(spend, clicks as f64)),
            cpm: round2(ratio(spend * 1000.0, impressions as f64)),
            cpa: round2(ratio(spend, conversions as f64)),
            conversion_rate: round2(ratio(conversions as f64 * 100.0, clicks as f64)),
            roas: round2(ratio(revenue, spend)),
            roi: round2(ratio((revenue - spend) * 100.0, spend)),
        }
    }
}

/// Percent change of each summary metric between the current window and the
/// preceding window of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub impressions: f64,
    pub clicks: f64,
    pub spend: f64,
    pub conversions: f64,
    pub revenue: f64,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
    pub cpa: f64,
    pub conversion_rate: f64,
    pub roas: f64,
    pub roi: f64,
}

impl PeriodComparison {
    pub fn between(current: &PeriodSummary, previous: &PeriodSummary) -> Self {
        Self {
            impressions: percent_change(previous.impressions as f64, current.impressions as f64),
            clicks: percent_change(previous.clicks as f64, current.clicks as f64),
            spend: percent_change(previous.spend, current.spend),
            conversions: percent_change(previous.conversions as f64, current.conversions as f64),
            revenue: percent_change(previous.revenue, current.revenue),
            ctr: percent_change(previous.ctr, current.ctr),
            cpc: percent_change(previous.cpc, current.cpc),
            cpm: percent_change(previous.cpm, current.cpm),
            cpa: percent_change(previous.cpa, current.cpa),
            conversion_rate: percent_change(previous.conversion_rate, current.conversion_rate),
            roas: percent_change(previous.roas, current.roas),
            roi: percent_change(previous.roi, current.roi),
        }
    }
}

/// Percent change with the dashboard convention for an empty baseline:
/// previous 0 and current > 0 reads as +100%, both zero as 0%.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        round2((current - previous) / previous * 100.0)
    }
}

/// Split a merged series into the current window (last P records) and the
/// full-length window immediately before it. A shorter or missing prior
/// window reads as no prior data, not a zero baseline.
pub fn split_windows(
    series: &[DailyMetricRecord],
    period: Period,
) -> (&[DailyMetricRecord], Option<&[DailyMetricRecord]>) {
    let p = period.days();
    let len = series.len();
    let current_start = len.saturating_sub(p);
    let current = &series[current_start..];

    let previous = if current_start >= p {
        Some(&series[current_start - p..current_start])
    } else {
        None
    };
    (current, previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_series(n: usize) -> Vec<DailyMetricRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let mut r = DailyMetricRecord::new(start + chrono::Days::new(i as u64));
                r.clicks = i as u64;
                r
            })
            .collect()
    }

    #[test]
    fn test_percent_change_conventions() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(0.0, 50.0), 100.0);
        assert_eq!(percent_change(100.0, 150.0), 50.0);
        assert_eq!(percent_change(100.0, 50.0), -50.0);
    }

    #[test]
    fn test_comparison_covers_every_rate() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let previous = PeriodSummary::from_slice(&[DailyMetricRecord {
            date: start,
            impressions: 1000,
            clicks: 40,
            spend: 20.0,
            conversions: 4,
            revenue: 40.0,
        }]);
        let current = PeriodSummary::from_slice(&[DailyMetricRecord {
            date: start + chrono::Days::new(7),
            impressions: 1000,
            clicks: 50,
            spend: 30.0,
            conversions: 5,
            revenue: 90.0,
        }]);

        let cmp = PeriodComparison::between(&current, &previous);
        // CPC 0.50 -> 0.60, CPM 20 -> 30, ROI 100% -> 200%.
        assert!((cmp.cpc - 20.0).abs() < 1e-9);
        assert!((cmp.cpm - 50.0).abs() < 1e-9);
        assert!((cmp.roi - 100.0).abs() < 1e-9);
        // Conversion rate holds at 10% in both windows.
        assert_eq!(cmp.conversion_rate, 0.0);
    }

    #[test]
    fn test_split_full_windows() {
        let series = make_series(20);
        let (current, previous) = split_windows(&series, Period::Days7);
        assert_eq!(current.len(), 7);
        let previous = previous.unwrap();
        assert_eq!(previous.len(), 7);
        assert_eq!(current[0].clicks, 13);
        assert_eq!(previous[0].clicks, 6);
    }

    #[test]
    fn test_split_without_prior_data() {
        let series = make_series(10);
        let (current, previous) = split_windows(&series, Period::Days7);
        assert_eq!(current.len(), 7);
        // Only 3 records precede the current window: no prior baseline.
        assert!(previous.is_none());
    }

    #[test]
    fn test_split_short_series() {
        let series = make_series(4);
        let (current, previous) = split_windows(&series, Period::Days7);
        assert_eq!(current.len(), 4);
        assert!(previous.is_none());
    }

    #[test]
    fn test_summary_rates_from_summed_volumes() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = vec![
            DailyMetricRecord {
                date: start,
                impressions: 1000,
                clicks: 30,
                spend: 50.0,
                conversions: 3,
                revenue: 150.0,
            },
            DailyMetricRecord {
                date: start + chrono::Days::new(1),
                impressions: 500,
                clicks: 30,
                spend: 25.0,
                conversions: 3,
                revenue: 75.0,
            },
        ];
        let summary = PeriodSummary::from_slice(&records);
        assert_eq!(summary.days, 2);
        assert_eq!(summary.impressions, 1500);
        assert_eq!(summary.clicks, 60);
        assert!((summary.ctr - 4.0).abs() < 1e-9);
        assert!((summary.cpc - 1.25).abs() < 1e-9);
        assert!((summary.roas - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = PeriodSummary::from_slice(&[]);
        assert_eq!(summary.days, 0);
        assert_eq!(summary.ctr, 0.0);
        assert_eq!(summary.cpa, 0.0);
        assert!(summary.roas.is_finite());
    }

    #[test]
    fn test_period_selector() {
        assert_eq!(Period::from_days(7), Some(Period::Days7));
        assert_eq!(Period::from_days(90), Some(Period::Days90));
        assert_eq!(Period::from_days(13), None);
        assert_eq!(Period::Days30.days(), 30);
    }
}
