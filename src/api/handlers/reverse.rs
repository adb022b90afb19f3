//! Handler for reverse geocoding.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;
use std::time::Instant;

use crate::api::dto::reverse::{ReverseParams, ReverseResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Reverse-geocodes a coordinate pair.
///
/// # Endpoint
///
/// `GET /reverse?lat=<number>&lon=<number>&zoom=<0-18>`
///
/// Cache key `reverse:<lat>:<lon>:<zoom or "default">`, derived from the
/// raw parameter text, TTL 24h — reverse results for a fixed coordinate
/// are far more stable than forward search results.
///
/// # Errors
///
/// Returns 400 Bad Request if `lat` or `lon` is missing or non-numeric,
/// or if `zoom` is not an integer in 0-18.
/// Returns 500 Internal Server Error if the provider call fails.
pub async fn reverse_handler(
    State(state): State<AppState>,
    Query(params): Query<ReverseParams>,
) -> Result<Json<ReverseResponse>, AppError> {
    let started = Instant::now();

    let (Some(lat), Some(lon)) = (params.lat, params.lon) else {
        return Err(AppError::bad_request(
            "Missing required parameters: lat and lon",
            json!({ "example": "/reverse?lat=48.8584&lon=2.2945" }),
        ));
    };

    let (coordinates, lookup) = state
        .lookup_service
        .reverse(&lat, &lon, params.zoom.as_deref())
        .await?;

    Ok(Json(ReverseResponse {
        success: true,
        coordinates,
        result: lookup.value,
        cached: lookup.cached,
        response_time: started.elapsed().as_millis() as u64,
    }))
}
