//! Core domain entities.
//!
//! Provider results are opaque to the cache layer: it stores and returns
//! them as serialized JSON without interpreting any field.

mod geocode;
mod ip;

pub use geocode::{BoundingBox, Coordinates, GeocodeResult};
pub use ip::IpLookupResult;
