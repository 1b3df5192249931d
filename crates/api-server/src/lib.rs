//! REST API surface for the MarketPulse dashboard.

pub mod rest;
pub mod server;

pub use server::ApiServer;
