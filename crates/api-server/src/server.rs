//! API server — router assembly and HTTP/metrics startup.

use crate::rest::{self, AppState};
use axum::routing::{get, patch};
use axum::Router;
use marketpulse_analytics::TrendAnalyzer;
use marketpulse_connectors::GoogleAnalyticsConnector;
use marketpulse_core::config::AppConfig;
use marketpulse_storage::DashboardStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ApiServer {
    config: AppConfig,
    store: Arc<DashboardStore>,
}

impl ApiServer {
    pub fn new(config: AppConfig, store: Arc<DashboardStore>) -> Self {
        Self { config, store }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            store: self.store.clone(),
            analyzer: Arc::new(TrendAnalyzer::new(self.config.analytics.clone())),
            google: Arc::new(GoogleAnalyticsConnector::new(self.config.google.clone())),
            node_id: self.config.node_id.clone(),
            default_period_days: self.config.analytics.default_period_days,
            start_time: Instant::now(),
        };

        Router::new()
            .route(
                "/api/campaigns",
                get(rest::list_campaigns).post(rest::create_campaign),
            )
            .route(
                "/api/campaigns/:id",
                patch(rest::update_campaign).delete(rest::delete_campaign),
            )
            .route("/api/metrics", get(rest::list_metrics))
            .route("/api/performance", get(rest::list_performance))
            .route("/api/performance/trends", get(rest::trend_report))
            .route(
                "/api/integrations",
                get(rest::list_integrations).post(rest::create_integration),
            )
            .route(
                "/api/integrations/:id",
                patch(rest::update_integration).delete(rest::delete_integration),
            )
            .route(
                "/api/integrations/google/oauth-url",
                get(rest::google_oauth_url),
            )
            .route("/api/health", get(rest::health_check))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);
        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus metrics exporter on its own port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_builds() {
        let server = ApiServer::new(AppConfig::default(), Arc::new(DashboardStore::new()));
        let _router = server.router();
    }
}
