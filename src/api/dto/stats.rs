//! DTO for the stats endpoint.

use serde::Serialize;

/// Aggregate service statistics.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Number of live mappings.
    pub urls: u64,
}
