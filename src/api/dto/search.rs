//! DTOs for the multi-result geocode search endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::GeocodeResult;

/// Query parameters for `GET /geocode/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
}

/// Response envelope for `GET /geocode/search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    pub count: usize,
    pub results: Vec<GeocodeResult>,
    pub cached: bool,
    pub response_time: u64,
}
