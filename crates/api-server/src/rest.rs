//! REST API handlers for the dashboard endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;
use uuid::Uuid;

use marketpulse_analytics::{
    Period, PerformanceStoreAdapter, SourceBatch, TrendAnalyzer, TrendReport,
};
use marketpulse_connectors::GoogleAnalyticsConnector;
use marketpulse_core::types::{
    Campaign, CreateCampaignRequest, CreateIntegrationRequest, HeadlineMetric, Integration,
    PerformanceRow, UpdateCampaignRequest, UpdateIntegrationRequest,
};
use marketpulse_core::MarketPulseError;
use marketpulse_storage::DashboardStore;

/// Maximum campaign name length.
const MAX_NAME_LEN: usize = 200;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DashboardStore>,
    pub analyzer: Arc<TrendAnalyzer>,
    pub google: Arc<GoogleAnalyticsConnector>,
    pub node_id: String,
    pub default_period_days: u32,
    pub start_time: Instant,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

fn bad_request(message: impl Into<String>) -> ApiError {
    metrics::counter!("api.validation_errors").increment(1);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_request".to_string(),
            message: message.into(),
        }),
    )
}

fn map_error(err: MarketPulseError) -> ApiError {
    match err {
        MarketPulseError::NotFound(what) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "not_found".to_string(),
                message: what,
            }),
        ),
        MarketPulseError::Validation(msg) => bad_request(msg),
        MarketPulseError::Connector(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "connector_error".to_string(),
                message: msg,
            }),
        ),
        other => {
            warn!(error = %other, "Request failed");
            metrics::counter!("api.errors").increment(1);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Internal processing error".to_string(),
                }),
            )
        }
    }
}

/// Decimal money string: digits, optionally a dot and one or two digits.
fn is_money_format(raw: &str) -> bool {
    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (raw, None),
    };
    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match frac {
        None => true,
        Some(f) => (1..=2).contains(&f.len()) && f.chars().all(|c| c.is_ascii_digit()),
    }
}

fn validate_create_campaign(request: &CreateCampaignRequest) -> Result<(), &'static str> {
    if request.name.is_empty() {
        return Err("campaign 'name' must not be empty");
    }
    if request.name.len() > MAX_NAME_LEN {
        return Err("campaign 'name' exceeds maximum length");
    }
    if request.campaign_type.is_empty() {
        return Err("campaign 'campaign_type' must not be empty");
    }
    if request.platform.is_empty() {
        return Err("campaign 'platform' must not be empty");
    }
    if !is_money_format(&request.spend) {
        return Err("campaign 'spend' must be a decimal amount with at most two fractional digits");
    }
    Ok(())
}

fn validate_update_campaign(updates: &UpdateCampaignRequest) -> Result<(), &'static str> {
    if let Some(name) = &updates.name {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err("campaign 'name' must be non-empty and within maximum length");
        }
    }
    if let Some(spend) = &updates.spend {
        if !is_money_format(spend) {
            return Err("campaign 'spend' must be a decimal amount with at most two fractional digits");
        }
    }
    Ok(())
}

// ─── Campaigns ──────────────────────────────────────────────────────────────

/// GET /api/campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<Campaign>> {
    Json(state.store.list_campaigns())
}

/// POST /api/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    if let Err(msg) = validate_create_campaign(&request) {
        warn!(error = msg, "Campaign creation rejected");
        return Err(bad_request(msg));
    }
    metrics::counter!("api.campaigns_created").increment(1);
    Ok((StatusCode::CREATED, Json(state.store.create_campaign(request))))
}

/// PATCH /api/campaigns/{id}
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(updates): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, ApiError> {
    if let Err(msg) = validate_update_campaign(&updates) {
        return Err(bad_request(msg));
    }
    state
        .store
        .update_campaign(&id, updates)
        .map(Json)
        .map_err(map_error)
}

/// DELETE /api/campaigns/{id}
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_campaign(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(map_error)
}

// ─── Metrics / performance ──────────────────────────────────────────────────

/// GET /api/metrics
pub async fn list_metrics(State(state): State<AppState>) -> Json<Vec<HeadlineMetric>> {
    Json(state.store.list_headline_metrics())
}

/// GET /api/performance
pub async fn list_performance(State(state): State<AppState>) -> Json<Vec<PerformanceRow>> {
    Json(state.store.list_performance())
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub period: Option<u32>,
    pub platform: Option<String>,
}

/// GET /api/performance/trends — run the aggregation pipeline over stored
/// performance rows.
pub async fn trend_report(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<TrendReport>, ApiError> {
    let days = query.period.unwrap_or(state.default_period_days);
    let Some(period) = Period::from_days(days) else {
        return Err(bad_request("'period' must be one of 7, 14, 30, 90"));
    };

    let rows = match &query.platform {
        Some(platform) => state.store.list_performance_for_platform(platform),
        None => state.store.list_performance(),
    };
    let raw: Vec<serde_json::Value> = rows
        .iter()
        .filter_map(|row| serde_json::to_value(row).ok())
        .collect();

    metrics::counter!("api.trend_reports").increment(1);
    let report = state
        .analyzer
        .analyze(&[SourceBatch::new(&PerformanceStoreAdapter, &raw)], period);
    Ok(Json(report))
}

// ─── Integrations ───────────────────────────────────────────────────────────

/// GET /api/integrations
pub async fn list_integrations(State(state): State<AppState>) -> Json<Vec<Integration>> {
    Json(state.store.list_integrations())
}

/// POST /api/integrations
pub async fn create_integration(
    State(state): State<AppState>,
    Json(request): Json<CreateIntegrationRequest>,
) -> Result<(StatusCode, Json<Integration>), ApiError> {
    if request.platform.is_empty() {
        return Err(bad_request("integration 'platform' must not be empty"));
    }
    if request.api_key.is_empty() {
        return Err(bad_request("integration 'api_key' must not be empty"));
    }
    Ok((
        StatusCode::CREATED,
        Json(state.store.create_integration(request)),
    ))
}

/// PATCH /api/integrations/{id}
pub async fn update_integration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(updates): Json<UpdateIntegrationRequest>,
) -> Result<Json<Integration>, ApiError> {
    state
        .store
        .update_integration(&id, updates)
        .map(Json)
        .map_err(map_error)
}

/// DELETE /api/integrations/{id}
pub async fn delete_integration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_integration(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(map_error)
}

#[derive(Debug, Deserialize)]
pub struct OauthUrlQuery {
    /// CSRF state threaded back through the OAuth redirect.
    pub state: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OauthUrlResponse {
    pub url: String,
}

/// GET /api/integrations/google/oauth-url — consent URL for connecting a
/// Google Analytics account. 400 when OAuth credentials are not configured.
pub async fn google_oauth_url(
    State(state): State<AppState>,
    Query(query): Query<OauthUrlQuery>,
) -> Result<Json<OauthUrlResponse>, ApiError> {
    state
        .google
        .oauth_url(query.state.as_deref())
        .map(|url| {
            Json(OauthUrlResponse {
                url: url.to_string(),
            })
        })
        .map_err(map_error)
}

// ─── Health ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub timestamp: String,
    pub uptime_secs: u64,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        timestamp: Utc::now().to_rfc3339(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
