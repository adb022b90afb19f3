//! DTOs for the health check endpoint.

use serde::Serialize;

/// Health check response with cache backend status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Seconds since process start.
    pub uptime: u64,
    pub cache: CacheHealth,
    pub timestamp: String,
}

/// Cache backend status.
#[derive(Debug, Serialize)]
pub struct CacheHealth {
    pub backend: &'static str,
    pub healthy: bool,

    /// Live entry count; only reported by the in-process backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}
