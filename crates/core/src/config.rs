use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `MARKETPULSE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub google: GoogleOauthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Tuning knobs for the trend-analysis pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    /// Default reporting period in days when the request omits one.
    #[serde(default = "default_period_days")]
    pub default_period_days: u32,
    /// Trailing window length for the rolling anomaly check.
    #[serde(default = "default_anomaly_window")]
    pub anomaly_window: usize,
    /// Deviation threshold in standard deviations.
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
}

/// OAuth credentials for the Google Analytics connector.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleOauthConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

// Default functions
fn default_node_id() -> String {
    "node-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    5000
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_period_days() -> u32 {
    30
}
fn default_anomaly_window() -> usize {
    7
}
fn default_anomaly_threshold() -> f64 {
    2.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_period_days: default_period_days(),
            anomaly_window: default_anomaly_window(),
            anomaly_threshold: default_anomaly_threshold(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            analytics: AnalyticsConfig::default(),
            google: GoogleOauthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("MARKETPULSE")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
