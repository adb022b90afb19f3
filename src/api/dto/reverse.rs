//! DTOs for the reverse geocode endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Coordinates, GeocodeResult};

/// Query parameters for `GET /reverse`.
///
/// `lat`/`lon`/`zoom` stay raw strings here: the cache key is derived from
/// the request text byte-for-byte, parsing happens downstream.
#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub zoom: Option<String>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
}

/// Response envelope for `GET /reverse`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseResponse {
    pub success: bool,
    pub coordinates: Coordinates,
    pub result: GeocodeResult,
    pub cached: bool,
    pub response_time: u64,
}
