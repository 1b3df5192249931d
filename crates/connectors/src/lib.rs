//! Platform connectors — request/response shapes for external marketing
//! platforms. Transport is owned by the caller.

pub mod connector;
pub mod google_analytics;

pub use connector::PlatformConnector;
pub use google_analytics::{GoogleAnalyticsConnector, TrafficReport};
