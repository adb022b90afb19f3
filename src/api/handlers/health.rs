//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::health::{CacheHealth, HealthResponse};
use crate::state::AppState;

/// Returns process status and cache backend health.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always 200: a degraded cache fails open, the service keeps serving via
/// direct provider calls, so it is reported rather than treated as an
/// outage.
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "service": "geocode-proxy",
///   "version": "0.2.0",
///   "uptime": 42,
///   "cache": { "backend": "memory", "healthy": true, "size": 17 },
///   "timestamp": "2026-08-07T09:30:00+00:00"
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let healthy = state.cache.health_check().await;

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        cache: CacheHealth {
            backend: state.cache.backend_name(),
            healthy,
            size: state.cache.entry_count().await,
        },
        timestamp: Utc::now().to_rfc3339(),
    })
}
