//! Canonical daily metric records and derived-ratio arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One merged calendar day of cross-platform performance. Series built by
/// the merge step are sorted ascending with one record per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetricRecord {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: u64,
    pub revenue: f64,
}

impl DailyMetricRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            impressions: 0,
            clicks: 0,
            spend: 0.0,
            conversions: 0,
            revenue: 0.0,
        }
    }

    /// Click-through rate as a percentage.
    pub fn ctr(&self) -> f64 {
        ratio(self.clicks as f64 * 100.0, self.impressions as f64)
    }

    /// Cost per click.
    pub fn cpc(&self) -> f64 {
        ratio(self.spend, self.clicks as f64)
    }

    /// Cost per thousand impressions.
    pub fn cpm(&self) -> f64 {
        ratio(self.spend * 1000.0, self.impressions as f64)
    }

    /// Cost per conversion.
    pub fn cpa(&self) -> f64 {
        ratio(self.spend, self.conversions as f64)
    }

    /// Conversions per click as a percentage.
    pub fn conversion_rate(&self) -> f64 {
        ratio(self.conversions as f64 * 100.0, self.clicks as f64)
    }

    /// Return on ad spend (revenue / spend).
    pub fn roas(&self) -> f64 {
        ratio(self.revenue, self.spend)
    }

    /// Return on investment as a percentage.
    pub fn roi(&self) -> f64 {
        ratio((self.revenue - self.spend) * 100.0, self.spend)
    }
}

/// Safe division: a zero (or non-finite) denominator yields exactly 0.0,
/// never NaN or infinity.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        0.0
    } else {
        numerator / denominator
    }
}

/// Central decimal-precision policy: rates and currency amounts are rounded
/// to two places at the report boundary. Views must not re-round.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
