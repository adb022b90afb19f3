//! DTOs for the IP geolocation endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::IpLookupResult;

/// Query parameters for `GET /ip`.
#[derive(Debug, Deserialize)]
pub struct IpParams {
    pub ip: Option<String>,
}

/// Response envelope for `GET /ip`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpResponse {
    pub success: bool,
    /// The looked-up address, or `"current"` for the caller's own IP.
    pub ip: String,
    pub result: IpLookupResult,
    pub cached: bool,
    pub response_time: u64,
}
