//! API documentation index and 404 fallback.

use axum::{Json, http::StatusCode};
use serde_json::{Value, json};

/// Endpoints listed by the index and the 404 fallback.
const ENDPOINTS: [&str; 5] = ["/health", "/geocode", "/geocode/search", "/reverse", "/ip"];

/// Self-describing API index.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Caching proxy for geocoding and IP geolocation",
        "endpoints": {
            "GET /health": "Health check with cache status",
            "GET /geocode?query=<place>": "Geocode a place (single result, cached 1h)",
            "GET /geocode/search?query=<place>&limit=<number>": "Geocode a place (multiple results, cached 1h)",
            "GET /reverse?lat=<number>&lon=<number>": "Reverse geocode coordinates (cached 24h)",
            "GET /ip?ip=<ip_address>": "IP geolocation lookup (cached 1h)",
        },
        "examples": {
            "geocode": "/geocode?query=Sydney, Australia",
            "reverse": "/reverse?lat=48.8584&lon=2.2945",
            "ip": "/ip?ip=8.8.8.8",
        },
    }))
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "availableEndpoints": ENDPOINTS,
        })),
    )
}
