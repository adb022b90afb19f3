//! Handler for IP geolocation.

use axum::{
    Json,
    extract::{Query, State},
};
use std::time::Instant;

use crate::api::dto::ip::{IpParams, IpResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Geolocates an IP address.
///
/// # Endpoint
///
/// `GET /ip?ip=<address>` — without `ip`, the provider geolocates the
/// service's own public address.
///
/// Cache key `ip:<ip or "current">`, TTL 1h.
///
/// # Errors
///
/// Returns 500 Internal Server Error if the provider call fails.
pub async fn ip_handler(
    State(state): State<AppState>,
    Query(params): Query<IpParams>,
) -> Result<Json<IpResponse>, AppError> {
    let started = Instant::now();

    let lookup = state.lookup_service.ip_lookup(params.ip.as_deref()).await?;

    Ok(Json(IpResponse {
        success: true,
        ip: params.ip.unwrap_or_else(|| "current".to_string()),
        result: lookup.value,
        cached: lookup.cached,
        response_time: started.elapsed().as_millis() as u64,
    }))
}
