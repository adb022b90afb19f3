//! DTOs for the single-result geocode endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::GeocodeResult;

/// Query parameters for `GET /geocode`.
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    pub query: Option<String>,
    /// Accepted for wire compatibility; upstream identity is server
    /// configuration, so the value is ignored.
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
}

/// Response envelope for `GET /geocode`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResponse {
    pub success: bool,
    pub query: String,
    pub result: GeocodeResult,
    pub cached: bool,
    /// Elapsed handler time in milliseconds.
    pub response_time: u64,
}
