//! Handler for multi-result geocoding.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;
use std::time::Instant;

use crate::api::dto::search::{SearchParams, SearchResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Geocodes a place query to its full match list.
///
/// # Endpoint
///
/// `GET /geocode/search?query=<place>&limit=<number>`
///
/// Cache key `search:<urlencoded query>:<limit or "5">`, TTL 1h. Unlike
/// `/geocode`, an empty match list is a 200 response and is cached.
///
/// # Errors
///
/// Returns 400 Bad Request if `query` is missing or `limit` is not a
/// positive integer.
/// Returns 500 Internal Server Error if the provider call fails.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let started = Instant::now();

    let Some(query) = params.query else {
        return Err(AppError::bad_request(
            "Missing required parameter: query",
            json!({ "example": "/geocode/search?query=Sydney, Australia" }),
        ));
    };

    let lookup = state
        .lookup_service
        .search(&query, params.limit.as_deref())
        .await?;

    Ok(Json(SearchResponse {
        success: true,
        query,
        count: lookup.value.len(),
        results: lookup.value,
        cached: lookup.cached,
        response_time: started.elapsed().as_millis() as u64,
    }))
}
