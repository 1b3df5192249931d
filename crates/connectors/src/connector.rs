//! Base trait for platform connectors.

/// A connection to one external marketing platform. Connectors own the
/// request/response shapes of their platform; transport lives with the
/// caller.
pub trait PlatformConnector: Send + Sync {
    /// Stable platform identifier used in logs and the integrations list.
    fn platform(&self) -> &'static str;

    /// Whether the connector has the credentials it needs to operate.
    fn is_configured(&self) -> bool;
}
