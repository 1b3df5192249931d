//! In-memory dashboard store. Persistence is out of scope by design; every
//! collection lives in a `DashMap` and list order is reconstructed on read.

use chrono::Utc;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use marketpulse_core::types::{
    Campaign, CreateCampaignRequest, CreateIntegrationRequest, HeadlineMetric, Integration,
    IntegrationStatus, PerformanceRow, UpdateCampaignRequest, UpdateIntegrationRequest,
};
use marketpulse_core::{MarketPulseError, MarketPulseResult};

pub struct DashboardStore {
    campaigns: DashMap<Uuid, Campaign>,
    integrations: DashMap<Uuid, Integration>,
    performance: DashMap<Uuid, PerformanceRow>,
    headline_metrics: DashMap<Uuid, HeadlineMetric>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            integrations: DashMap::new(),
            performance: DashMap::new(),
            headline_metrics: DashMap::new(),
        }
    }

    // ─── Campaigns ──────────────────────────────────────────────────────

    /// All campaigns, oldest first.
    pub fn list_campaigns(&self) -> Vec<Campaign> {
        let mut all: Vec<Campaign> = self.campaigns.iter().map(|c| c.value().clone()).collect();
        all.sort_by_key(|c| c.created_at);
        all
    }

    pub fn get_campaign(&self, id: &Uuid) -> Option<Campaign> {
        self.campaigns.get(id).map(|c| c.clone())
    }

    pub fn create_campaign(&self, request: CreateCampaignRequest) -> Campaign {
        let campaign = Campaign {
            id: Uuid::new_v4(),
            name: request.name,
            campaign_type: request.campaign_type,
            platform: request.platform,
            impressions: request.impressions,
            clicks: request.clicks,
            spend: request.spend,
            status: marketpulse_core::types::CampaignStatus::Active,
            created_at: Utc::now(),
            updated_at: Some(Utc::now()),
        };
        info!(campaign_id = %campaign.id, name = %campaign.name, "Campaign created");
        self.campaigns.insert(campaign.id, campaign.clone());
        campaign
    }

    pub fn update_campaign(
        &self,
        id: &Uuid,
        updates: UpdateCampaignRequest,
    ) -> MarketPulseResult<Campaign> {
        let mut entry = self
            .campaigns
            .get_mut(id)
            .ok_or_else(|| MarketPulseError::NotFound(format!("campaign {id}")))?;

        if let Some(name) = updates.name {
            entry.name = name;
        }
        if let Some(campaign_type) = updates.campaign_type {
            entry.campaign_type = campaign_type;
        }
        if let Some(platform) = updates.platform {
            entry.platform = platform;
        }
        if let Some(spend) = updates.spend {
            entry.spend = spend;
        }
        if let Some(impressions) = updates.impressions {
            entry.impressions = impressions;
        }
        if let Some(clicks) = updates.clicks {
            entry.clicks = clicks;
        }
        if let Some(status) = updates.status {
            entry.status = status;
        }
        entry.updated_at = Some(Utc::now());
        Ok(entry.clone())
    }

    /// Insert a fully-formed campaign (seed/import path).
    pub fn put_seed_campaign(&self, campaign: Campaign) {
        self.campaigns.insert(campaign.id, campaign);
    }

    pub fn delete_campaign(&self, id: &Uuid) -> MarketPulseResult<()> {
        self.campaigns
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MarketPulseError::NotFound(format!("campaign {id}")))
    }

    // ─── Headline metrics ───────────────────────────────────────────────

    pub fn list_headline_metrics(&self) -> Vec<HeadlineMetric> {
        let mut all: Vec<HeadlineMetric> = self
            .headline_metrics
            .iter()
            .map(|m| m.value().clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn put_headline_metric(&self, metric: HeadlineMetric) {
        self.headline_metrics.insert(metric.id, metric);
    }

    // ─── Performance rows ───────────────────────────────────────────────

    /// All per-day platform rows, date ascending.
    pub fn list_performance(&self) -> Vec<PerformanceRow> {
        let mut all: Vec<PerformanceRow> =
            self.performance.iter().map(|p| p.value().clone()).collect();
        all.sort_by_key(|p| p.date);
        all
    }

    /// Rows for one platform, date ascending.
    pub fn list_performance_for_platform(&self, platform: &str) -> Vec<PerformanceRow> {
        let mut rows: Vec<PerformanceRow> = self
            .performance
            .iter()
            .filter(|p| p.platform.as_deref() == Some(platform))
            .map(|p| p.value().clone())
            .collect();
        rows.sort_by_key(|p| p.date);
        rows
    }

    pub fn add_performance_row(&self, row: PerformanceRow) {
        self.performance.insert(row.id, row);
    }

    // ─── Integrations ───────────────────────────────────────────────────

    pub fn list_integrations(&self) -> Vec<Integration> {
        let mut all: Vec<Integration> = self
            .integrations
            .iter()
            .map(|i| i.value().clone())
            .collect();
        all.sort_by_key(|i| i.created_at);
        all
    }

    pub fn create_integration(&self, request: CreateIntegrationRequest) -> Integration {
        let integration = Integration {
            id: Uuid::new_v4(),
            platform: request.platform,
            status: IntegrationStatus::Disconnected,
            api_key: Some(request.api_key),
            account_id: request.account_id,
            last_sync: None,
            created_at: Utc::now(),
        };
        info!(integration_id = %integration.id, platform = %integration.platform, "Integration created");
        self.integrations.insert(integration.id, integration.clone());
        integration
    }

    pub fn update_integration(
        &self,
        id: &Uuid,
        updates: UpdateIntegrationRequest,
    ) -> MarketPulseResult<Integration> {
        let mut entry = self
            .integrations
            .get_mut(id)
            .ok_or_else(|| MarketPulseError::NotFound(format!("integration {id}")))?;

        if let Some(status) = updates.status {
            entry.status = status;
            // A freshly connected integration counts as synced now.
            if status == IntegrationStatus::Connected {
                entry.last_sync = Some(Utc::now());
            }
        }
        if let Some(api_key) = updates.api_key {
            entry.api_key = Some(api_key);
        }
        if let Some(account_id) = updates.account_id {
            entry.account_id = Some(account_id);
        }
        Ok(entry.clone())
    }

    /// Insert a fully-formed integration (seed/import path).
    pub fn put_seed_integration(&self, integration: Integration) {
        self.integrations.insert(integration.id, integration);
    }

    pub fn delete_integration(&self, id: &Uuid) -> MarketPulseResult<()> {
        self.integrations
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MarketPulseError::NotFound(format!("integration {id}")))
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketpulse_core::types::CampaignStatus;

    fn create_request(name: &str) -> CreateCampaignRequest {
        CreateCampaignRequest {
            name: name.to_string(),
            campaign_type: "conversions".to_string(),
            platform: "Facebook".to_string(),
            spend: "456.78".to_string(),
            impressions: 15420,
            clicks: 892,
        }
    }

    #[test]
    fn test_campaign_crud() {
        let store = DashboardStore::new();
        let created = store.create_campaign(create_request("Summer Sale"));
        assert_eq!(created.status, CampaignStatus::Active);
        assert_eq!(store.list_campaigns().len(), 1);

        let updated = store
            .update_campaign(
                &created.id,
                UpdateCampaignRequest {
                    status: Some(CampaignStatus::Paused),
                    clicks: Some(1000),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, CampaignStatus::Paused);
        assert_eq!(updated.clicks, 1000);
        // Untouched fields survive the partial update.
        assert_eq!(updated.name, "Summer Sale");
        assert_eq!(updated.spend, "456.78");

        store.delete_campaign(&created.id).unwrap();
        assert!(store.list_campaigns().is_empty());
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let store = DashboardStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.update_campaign(&id, UpdateCampaignRequest::default()),
            Err(MarketPulseError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_campaign(&id),
            Err(MarketPulseError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_integration(&id),
            Err(MarketPulseError::NotFound(_))
        ));
    }

    #[test]
    fn test_connecting_integration_stamps_last_sync() {
        let store = DashboardStore::new();
        let integration = store.create_integration(CreateIntegrationRequest {
            platform: "Google Ads".to_string(),
            api_key: "key-123".to_string(),
            account_id: None,
        });
        assert_eq!(integration.status, IntegrationStatus::Disconnected);
        assert!(integration.last_sync.is_none());

        let updated = store
            .update_integration(
                &integration.id,
                UpdateIntegrationRequest {
                    status: Some(IntegrationStatus::Connected),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, IntegrationStatus::Connected);
        assert!(updated.last_sync.is_some());
    }

    #[test]
    fn test_performance_rows_sorted_by_date() {
        let store = DashboardStore::new();
        for (date, platform) in [
            ("2024-01-03", "LinkedIn"),
            ("2024-01-01", "Facebook"),
            ("2024-01-02", "Google Ads"),
        ] {
            store.add_performance_row(PerformanceRow {
                id: Uuid::new_v4(),
                date: date.parse().unwrap(),
                impressions: 1000,
                clicks: 50,
                conversions: 5,
                spend: 100.0,
                revenue: 400.0,
                platform: Some(platform.to_string()),
                created_at: Utc::now(),
            });
        }

        let rows = store.list_performance();
        assert_eq!(rows.len(), 3);
        assert!(rows.windows(2).all(|p| p[0].date <= p[1].date));

        let fb = store.list_performance_for_platform("Facebook");
        assert_eq!(fb.len(), 1);
        assert_eq!(fb[0].date, "2024-01-01".parse().unwrap());
    }
}
