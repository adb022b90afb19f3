//! Handler for single-result geocoding.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;
use std::time::Instant;

use crate::api::dto::geocode::{GeocodeParams, GeocodeResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Geocodes a place query to its best match.
///
/// # Endpoint
///
/// `GET /geocode?query=<place>`
///
/// # Request Flow
///
/// 1. Validate that `query` is present
/// 2. Read-through lookup via [`crate::application::services::LookupService`]
///    (cache key `geocode:<urlencoded query>`, TTL 1h)
/// 3. Wrap the match with `cached` and `responseTime`
///
/// # Errors
///
/// Returns 400 Bad Request if `query` is missing — neither the store nor
/// the provider is touched.
/// Returns 404 Not Found if the provider has no match (never cached).
/// Returns 500 Internal Server Error if the provider call fails.
pub async fn geocode_handler(
    State(state): State<AppState>,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let started = Instant::now();

    let Some(query) = params.query else {
        return Err(AppError::bad_request(
            "Missing required parameter: query",
            json!({ "example": "/geocode?query=Sydney, Australia" }),
        ));
    };

    let lookup = state.lookup_service.geocode(&query).await?;

    Ok(Json(GeocodeResponse {
        success: true,
        query,
        result: lookup.value,
        cached: lookup.cached,
        response_time: started.elapsed().as_millis() as u64,
    }))
}
