//! Merge step: fold normalized per-source rows into one date-keyed series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::series::DailyMetricRecord;
use crate::sources::SourceAdapter;

/// Raw rows from one source, paired with the adapter that understands them.
pub struct SourceBatch<'a> {
    pub adapter: &'a dyn SourceAdapter,
    pub rows: &'a [Value],
}

impl<'a> SourceBatch<'a> {
    pub fn new(adapter: &'a dyn SourceAdapter, rows: &'a [Value]) -> Self {
        Self { adapter, rows }
    }
}

#[derive(Debug, Default)]
struct DayAccumulator {
    impressions: u64,
    clicks: u64,
    platform_spend: f64,
    conversions: u64,
    platform_revenue: f64,
    // Authoritative figures, when the financial feed reported this day.
    financial_spend: Option<f64>,
    financial_revenue: Option<f64>,
}

/// Merge all source batches into a date-sorted series with one record per
/// calendar day. Platform metrics sum across sources; financial-feed spend
/// and revenue take precedence over the platform-reported sums for any date
/// the feed covers. Empty input yields an empty series.
pub fn merge_sources(batches: &[SourceBatch<'_>]) -> Vec<DailyMetricRecord> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for batch in batches {
        let mut skipped = 0usize;
        for row in batch.rows {
            let Some(contribution) = batch.adapter.normalize(row) else {
                skipped += 1;
                continue;
            };
            let entry = days.entry(contribution.date).or_default();
            if batch.adapter.is_authoritative() {
                *entry.financial_spend.get_or_insert(0.0) += contribution.spend;
                *entry.financial_revenue.get_or_insert(0.0) += contribution.revenue;
            } else {
                entry.impressions += contribution.impressions;
                entry.clicks += contribution.clicks;
                entry.platform_spend += contribution.spend;
                entry.conversions += contribution.conversions;
                entry.platform_revenue += contribution.revenue;
            }
        }
        if skipped > 0 {
            debug!(
                source = batch.adapter.source(),
                skipped, "Dropped rows without a parseable date"
            );
        }
    }

    days.into_iter()
        .map(|(date, acc)| DailyMetricRecord {
            date,
            impressions: acc.impressions,
            clicks: acc.clicks,
            spend: acc.financial_spend.unwrap_or(acc.platform_spend),
            conversions: acc.conversions,
            revenue: acc.financial_revenue.unwrap_or(acc.platform_revenue),
        })
        .collect()
}
