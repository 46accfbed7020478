//! DTOs for health check endpoint.

use serde::Serialize;

use crate::infrastructure::cache::CacheStats;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub cache: CacheCheck,
}

/// Cache backend reachability and operation counters.
#[derive(Debug, Serialize)]
pub struct CacheCheck {
    pub status: String,
    pub backend: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub stats: CacheStats,
}
