//! Cross-platform metrics aggregation — source adapters, date-keyed merge,
//! derived KPIs, period comparison, and rolling-window anomaly screening.

pub mod anomaly;
pub mod merge;
pub mod report;
pub mod series;
pub mod sources;
pub mod window;

pub use anomaly::{Anomaly, TrackedMetric};
pub use merge::{merge_sources, SourceBatch};
pub use report::{TrendAnalyzer, TrendReport};
pub use series::DailyMetricRecord;
pub use sources::{
    FinancialFeedAdapter, GoogleAdsAdapter, LinkedInAdsAdapter, MetaAdsAdapter,
    PerformanceStoreAdapter, SourceAdapter,
};
pub use window::{Period, PeriodComparison, PeriodSummary};
