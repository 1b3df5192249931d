//! In-memory store for campaigns, integrations, performance rows, and
//! headline dashboard cards.

pub mod seed;
pub mod store;

pub use store::DashboardStore;
