//! Geocoding result entities.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair echoed back to callers of `/reverse`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Bounding box of a geocoded place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

/// A single forward or reverse geocoding match.
///
/// Serialized camelCase; this is both the wire format returned to clients
/// and the payload stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub lat: f64,
    pub lon: f64,
    /// Human-readable place label, e.g. `"Sydney, New South Wales, Australia"`.
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}
