use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ad campaign tracked by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    /// Objective, e.g. "conversions" or "awareness".
    pub campaign_type: String,
    pub platform: String,
    pub impressions: u64,
    pub clicks: u64,
    /// Decimal amount as a string, two fractional digits max.
    pub spend: String,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
    Draft,
}

/// A third-party platform connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub id: Uuid,
    pub platform: String,
    pub status: IntegrationStatus,
    pub api_key: Option<String>,
    pub account_id: Option<String>,
    pub last_sync: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Connected,
    Disconnected,
    Error,
}

/// One day of reported performance for a single platform. This is the raw
/// input row the trend pipeline aggregates across platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub id: Uuid,
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
    pub platform: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A pre-formatted dashboard headline card ("Total Clicks", "+8.3%").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlineMetric {
    pub id: Uuid,
    pub name: String,
    pub value: String,
    pub change: String,
    pub period: String,
    pub created_at: DateTime<Utc>,
}

// ─── Request payloads ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub campaign_type: String,
    pub platform: String,
    pub spend: String,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub campaign_type: Option<String>,
    pub platform: Option<String>,
    pub spend: Option<String>,
    pub impressions: Option<u64>,
    pub clicks: Option<u64>,
    pub status: Option<CampaignStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIntegrationRequest {
    pub platform: String,
    pub api_key: String,
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIntegrationRequest {
    pub status: Option<IntegrationStatus>,
    pub api_key: Option<String>,
    pub account_id: Option<String>,
}
