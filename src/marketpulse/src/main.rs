//! MarketPulse — marketing-analytics dashboard backend.
//!
//! Main entry point that initializes the store, seeds demo data, and starts
//! the API server.

use clap::Parser;
use marketpulse_api::ApiServer;
use marketpulse_core::config::AppConfig;
use marketpulse_storage::{seed, DashboardStore};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "marketpulse")]
#[command(about = "Marketing-analytics dashboard backend")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "MARKETPULSE__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "MARKETPULSE__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Metrics port (overrides config)
    #[arg(long, env = "MARKETPULSE__METRICS__PORT")]
    metrics_port: Option<u16>,

    /// Start with an empty store instead of demo seed data
    #[arg(long, default_value_t = false)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketpulse=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("MarketPulse starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(port) = cli.metrics_port {
        config.metrics.port = port;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        metrics_port = config.metrics.port,
        default_period_days = config.analytics.default_period_days,
        "Configuration loaded"
    );

    let store = Arc::new(DashboardStore::new());
    if !cli.no_seed {
        seed::seed(&store);
        info!("Demo data seeded");
    }

    let server = ApiServer::new(config, store);

    if let Err(e) = server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    server.start_http().await
}
