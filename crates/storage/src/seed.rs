//! Demo seed data for development and the out-of-the-box dashboard.

use chrono::Utc;
use uuid::Uuid;

use marketpulse_core::types::{
    Campaign, CampaignStatus, HeadlineMetric, Integration, IntegrationStatus, PerformanceRow,
};

use crate::store::DashboardStore;

/// Populate a fresh store with representative campaigns, headline cards,
/// performance rows, and integrations.
pub fn seed(store: &DashboardStore) {
    for (name, campaign_type, platform, impressions, clicks, spend, status) in [
        (
            "Summer Sale Campaign",
            "conversions",
            "Facebook",
            15_420,
            892,
            "456.78",
            CampaignStatus::Active,
        ),
        (
            "Brand Awareness Push",
            "awareness",
            "Google Ads",
            28_900,
            1_245,
            "789.50",
            CampaignStatus::Active,
        ),
        (
            "Retargeting Campaign",
            "conversions",
            "LinkedIn",
            8_750,
            425,
            "234.25",
            CampaignStatus::Paused,
        ),
    ] {
        store.put_seed_campaign(Campaign {
            id: Uuid::new_v4(),
            name: name.to_string(),
            campaign_type: campaign_type.to_string(),
            platform: platform.to_string(),
            impressions,
            clicks,
            spend: spend.to_string(),
            status,
            created_at: Utc::now(),
            updated_at: None,
        });
    }

    for (name, value, change) in [
        ("Total Impressions", "324,567", "+12.5%"),
        ("Total Clicks", "18,923", "+8.3%"),
        ("Conversion Rate", "4.2%", "-2.1%"),
        ("Cost Per Click", "$2.34", "-5.8%"),
    ] {
        store.put_headline_metric(HeadlineMetric {
            id: Uuid::new_v4(),
            name: name.to_string(),
            value: value.to_string(),
            change: change.to_string(),
            period: "30d".to_string(),
            created_at: Utc::now(),
        });
    }

    for (date, impressions, clicks, conversions, spend, revenue, platform) in [
        ("2024-01-01", 45_000, 2_200, 180, 1_200.0, 5_400.0, "Facebook"),
        ("2024-01-02", 52_000, 2_800, 220, 1_450.0, 6_200.0, "Google Ads"),
        ("2024-01-03", 48_000, 2_500, 195, 1_300.0, 5_850.0, "LinkedIn"),
    ] {
        store.add_performance_row(PerformanceRow {
            id: Uuid::new_v4(),
            date: date.parse().expect("seed dates are valid"),
            impressions,
            clicks,
            conversions,
            spend,
            revenue,
            platform: Some(platform.to_string()),
            created_at: Utc::now(),
        });
    }

    for (platform, status, account_id) in [
        ("Facebook", IntegrationStatus::Connected, Some("fb_account_123")),
        ("Google Ads", IntegrationStatus::Connected, Some("ga_account_456")),
        ("LinkedIn", IntegrationStatus::Disconnected, None),
        ("Twitter", IntegrationStatus::Error, None),
    ] {
        store.put_seed_integration(Integration {
            id: Uuid::new_v4(),
            platform: platform.to_string(),
            status,
            api_key: None,
            account_id: account_id.map(|s| s.to_string()),
            last_sync: matches!(status, IntegrationStatus::Connected).then(Utc::now),
            created_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_populates_all_collections() {
        let store = DashboardStore::new();
        seed(&store);
        assert_eq!(store.list_campaigns().len(), 3);
        assert_eq!(store.list_headline_metrics().len(), 4);
        assert_eq!(store.list_performance().len(), 3);
        assert_eq!(store.list_integrations().len(), 4);
    }

    #[test]
    fn test_seed_connected_integrations_have_sync_time() {
        let store = DashboardStore::new();
        seed(&store);
        for integration in store.list_integrations() {
            match integration.status {
                IntegrationStatus::Connected => assert!(integration.last_sync.is_some()),
                _ => assert!(integration.last_sync.is_none()),
            }
        }
    }
}
