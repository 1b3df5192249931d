//! Per-source adapters that map each platform's raw daily rows into the
//! canonical shape. Field names differ per platform (`date` vs `date_start`,
//! `spend` vs `costInLocalCurrency`); each adapter resolves its own mapping
//! once at this boundary so the merge step never inspects raw payloads.

use chrono::NaiveDate;
use serde_json::Value;

/// A normalized single-day contribution from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyContribution {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub spend: f64,
    pub conversions: u64,
    pub revenue: f64,
}

/// Strategy trait for one data source. Implementations translate that
/// source's raw JSON row into a [`DailyContribution`].
pub trait SourceAdapter: Send + Sync {
    /// Stable source identifier used in logs.
    fn source(&self) -> &'static str;

    /// Normalize one raw row. Returns `None` only when the row carries no
    /// parseable date; missing or non-numeric metric fields contribute 0.
    fn normalize(&self, row: &Value) -> Option<DailyContribution>;

    /// Authoritative sources (the financial feed) override platform-summed
    /// spend and revenue for a date rather than adding to them.
    fn is_authoritative(&self) -> bool {
        false
    }
}

/// Meta Ads Insights rows: `date_start`, `spend`, `actions` rolled up into
/// a `conversions` count upstream.
pub struct MetaAdsAdapter;

impl SourceAdapter for MetaAdsAdapter {
    fn source(&self) -> &'static str {
        "meta_ads"
    }

    fn normalize(&self, row: &Value) -> Option<DailyContribution> {
        let date = parse_day(row.get("date_start").or_else(|| row.get("date"))?)?;
        Some(DailyContribution {
            date,
            impressions: num(row, "impressions") as u64,
            clicks: num(row, "clicks") as u64,
            spend: num(row, "spend"),
            conversions: num(row, "conversions") as u64,
            revenue: num(row, "revenue"),
        })
    }
}

/// Google Ads rows: `date`, `cost`, `conversions`.
pub struct GoogleAdsAdapter;

impl SourceAdapter for GoogleAdsAdapter {
    fn source(&self) -> &'static str {
        "google_ads"
    }

    fn normalize(&self, row: &Value) -> Option<DailyContribution> {
        let date = parse_day(row.get("date")?)?;
        Some(DailyContribution {
            date,
            impressions: num(row, "impressions") as u64,
            clicks: num(row, "clicks") as u64,
            spend: num(row, "cost"),
            conversions: num(row, "conversions") as u64,
            revenue: num(row, "conversionValue"),
        })
    }
}

/// LinkedIn Ads rows: `date`, `costInLocalCurrency`,
/// `externalWebsiteConversions`.
pub struct LinkedInAdsAdapter;

impl SourceAdapter for LinkedInAdsAdapter {
    fn source(&self) -> &'static str {
        "linkedin_ads"
    }

    fn normalize(&self, row: &Value) -> Option<DailyContribution> {
        let date = parse_day(row.get("date")?)?;
        Some(DailyContribution {
            date,
            impressions: num(row, "impressions") as u64,
            clicks: num(row, "clicks") as u64,
            spend: num(row, "costInLocalCurrency"),
            conversions: num(row, "externalWebsiteConversions") as u64,
            revenue: 0.0,
        })
    }
}

/// Rows already stored in the canonical performance shape (`date`, `spend`,
/// `revenue`, ...), e.g. the dashboard's own performance store.
pub struct PerformanceStoreAdapter;

impl SourceAdapter for PerformanceStoreAdapter {
    fn source(&self) -> &'static str {
        "performance_store"
    }

    fn normalize(&self, row: &Value) -> Option<DailyContribution> {
        let date = parse_day(row.get("date")?)?;
        Some(DailyContribution {
            date,
            impressions: num(row, "impressions") as u64,
            clicks: num(row, "clicks") as u64,
            spend: num(row, "spend"),
            conversions: num(row, "conversions") as u64,
            revenue: num(row, "revenue"),
        })
    }
}

/// Canonical daily financials: authoritative `spend` and `revenue` per date.
pub struct FinancialFeedAdapter;

impl SourceAdapter for FinancialFeedAdapter {
    fn source(&self) -> &'static str {
        "financials"
    }

    fn normalize(&self, row: &Value) -> Option<DailyContribution> {
        let date = parse_day(row.get("date")?)?;
        Some(DailyContribution {
            date,
            impressions: 0,
            clicks: 0,
            spend: num(row, "spend"),
            conversions: 0,
            revenue: num(row, "revenue"),
        })
    }

    fn is_authoritative(&self) -> bool {
        true
    }
}

/// Parse a calendar day out of a date value, truncating any time-of-day
/// component ("2024-01-01T08:30:00Z" and "2024-01-01 08:30:00" both map to
/// 2024-01-01).
fn parse_day(value: &Value) -> Option<NaiveDate> {
    let raw = value.as_str()?;
    let day = raw
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(raw);
    day.parse().ok()
}

/// Numeric field access: accepts JSON numbers and numeric strings, anything
/// else (missing, null, garbage) counts as 0.
fn num(row: &Value, key: &str) -> f64 {
    match row.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
