use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DatabaseHealthStatus {
    pub database: String,
    pub healthy: bool,
    /// Round trip of the probe query, in milliseconds.
    pub latency_ms: u64,
}
