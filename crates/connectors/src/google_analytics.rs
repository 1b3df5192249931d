//! Google Analytics connector — OAuth consent URL, token-exchange payload,
//! and Reporting API v4 response parsing.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use marketpulse_core::config::GoogleOauthConfig;
use marketpulse_core::{MarketPulseError, MarketPulseResult};

use crate::connector::PlatformConnector;

const OAUTH_BASE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const ACCOUNT_SUMMARIES_URL: &str =
    "https://www.googleapis.com/analytics/v3/management/accountSummaries";
const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/analytics.readonly",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// Traffic for one campaign row returned by the Reporting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignTraffic {
    pub name: String,
    pub source: String,
    pub medium: String,
    pub sessions: u64,
    pub users: u64,
    pub pageviews: u64,
    pub bounce_rate: f64,
    pub avg_session_duration: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficTotals {
    pub sessions: u64,
    pub users: u64,
    pub pageviews: u64,
}

/// Parsed campaign-traffic report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficReport {
    pub campaigns: Vec<CampaignTraffic>,
    pub totals: TrafficTotals,
}

pub struct GoogleAnalyticsConnector {
    config: GoogleOauthConfig,
}

impl GoogleAnalyticsConnector {
    pub fn new(config: GoogleOauthConfig) -> Self {
        Self { config }
    }

    /// Build the OAuth consent URL: readonly analytics + email scopes,
    /// offline access, and the account picker forced on.
    pub fn oauth_url(&self, state: Option<&str>) -> MarketPulseResult<Url> {
        let client_id = self.config.client_id.as_deref().ok_or_else(|| {
            MarketPulseError::Connector(
                "Google OAuth not configured: missing client_id".to_string(),
            )
        })?;

        let mut url = Url::parse(OAUTH_BASE_URL)
            .map_err(|e| MarketPulseError::Connector(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", client_id)
                .append_pair(
                    "redirect_uri",
                    self.config.redirect_uri.as_deref().unwrap_or(""),
                )
                .append_pair("scope", &SCOPES.join(" "))
                .append_pair("response_type", "code")
                .append_pair("access_type", "offline")
                .append_pair("prompt", "select_account")
                .append_pair("include_granted_scopes", "true");
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }
        Ok(url)
    }

    /// Form fields for exchanging an authorization code for tokens, POSTed
    /// to [`Self::token_url`].
    pub fn token_exchange_form(&self, auth_code: &str) -> MarketPulseResult<Vec<(String, String)>> {
        let (Some(client_id), Some(client_secret)) = (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
        ) else {
            return Err(MarketPulseError::Connector(
                "Google OAuth credentials not configured".to_string(),
            ));
        };

        Ok(vec![
            ("client_id".to_string(), client_id.to_string()),
            ("client_secret".to_string(), client_secret.to_string()),
            ("code".to_string(), auth_code.to_string()),
            ("grant_type".to_string(), "authorization_code".to_string()),
            (
                "redirect_uri".to_string(),
                self.config.redirect_uri.clone().unwrap_or_default(),
            ),
        ])
    }

    pub fn token_url(&self) -> &'static str {
        TOKEN_URL
    }

    /// Management API endpoint listing the Analytics accounts visible to
    /// an access token, used to pick a view after the OAuth exchange.
    pub fn account_summaries_url(&self) -> &'static str {
        ACCOUNT_SUMMARIES_URL
    }

    /// Header pairs for the authenticated account-summaries GET.
    pub fn bearer_headers(&self, access_token: &str) -> Vec<(String, String)> {
        vec![
            (
                "Authorization".to_string(),
                format!("Bearer {access_token}"),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }

    /// Extract the account list from an account-summaries response. A
    /// missing or malformed `items` array reads as no accounts.
    pub fn parse_account_summaries(&self, response: &Value) -> Vec<Value> {
        response
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// Reporting API v4 `batchGet` body for campaign performance over the
    /// given range; defaults to the trailing 30 days.
    pub fn report_request_body(
        &self,
        view_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Value {
        let end = end_date.unwrap_or_else(|| Utc::now().date_naive());
        let start = start_date.unwrap_or(end - Duration::days(30));

        json!({
            "reportRequests": [{
                "viewId": view_id,
                "dateRanges": [{
                    "startDate": start.to_string(),
                    "endDate": end.to_string()
                }],
                "metrics": [
                    {"expression": "ga:sessions"},
                    {"expression": "ga:users"},
                    {"expression": "ga:pageviews"},
                    {"expression": "ga:bounceRate"},
                    {"expression": "ga:avgSessionDuration"}
                ],
                "dimensions": [
                    {"name": "ga:source"},
                    {"name": "ga:medium"},
                    {"name": "ga:campaign"}
                ],
                "orderBys": [{
                    "fieldName": "ga:sessions",
                    "sortOrder": "DESCENDING"
                }]
            }]
        })
    }

    /// Parse a `batchGet` response into per-campaign rows plus totals.
    /// Rows with missing dimensions or metrics are skipped; malformed
    /// numeric strings count as 0.
    pub fn parse_report(&self, response: &Value) -> TrafficReport {
        let Some(report) = response
            .get("reports")
            .and_then(Value::as_array)
            .and_then(|r| r.first())
        else {
            return TrafficReport::default();
        };

        let rows = report
            .pointer("/data/rows")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let mut campaigns = Vec::new();
        let mut totals = TrafficTotals::default();

        for row in &rows {
            let dimensions: Vec<&str> = row
                .get("dimensions")
                .and_then(Value::as_array)
                .map(|d| d.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let values: Vec<&str> = row
                .pointer("/metrics/0/values")
                .and_then(Value::as_array)
                .map(|v| v.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            if dimensions.len() < 3 || values.len() < 5 {
                debug!(?dimensions, "Skipping malformed GA report row");
                continue;
            }

            let traffic = CampaignTraffic {
                name: dimensions[2].to_string(),
                source: dimensions[0].to_string(),
                medium: dimensions[1].to_string(),
                sessions: parse_count(values[0]),
                users: parse_count(values[1]),
                pageviews: parse_count(values[2]),
                bounce_rate: parse_decimal(values[3]),
                avg_session_duration: parse_decimal(values[4]),
            };

            totals.sessions += traffic.sessions;
            totals.users += traffic.users;
            totals.pageviews += traffic.pageviews;
            campaigns.push(traffic);
        }

        TrafficReport { campaigns, totals }
    }
}

impl PlatformConnector for GoogleAnalyticsConnector {
    fn platform(&self) -> &'static str {
        "google_analytics"
    }

    fn is_configured(&self) -> bool {
        self.config.client_id.is_some() && self.config.client_secret.is_some()
    }
}

fn parse_count(raw: &str) -> u64 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_decimal(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}
