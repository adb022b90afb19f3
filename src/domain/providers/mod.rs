//! Provider façade traits.
//!
//! The upstream geocoding and IP-geolocation services are consumed through
//! these seams only. Implementations live in
//! [`crate::infrastructure::providers`]; they carry no retry or backoff
//! logic of their own.
//!
//! Mock implementations are auto-generated via `mockall` for testing.

mod geocoding_provider;
mod ip_lookup_provider;

pub use geocoding_provider::GeocodingProvider;
pub use ip_lookup_provider::IpLookupProvider;

#[cfg(test)]
pub use geocoding_provider::MockGeocodingProvider;
#[cfg(test)]
pub use ip_lookup_provider::MockIpLookupProvider;

use thiserror::Error;

/// Failure of an upstream provider call.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("provider returned status {status}")]
    Status { status: u16 },

    /// The provider answered 2xx but the body could not be decoded.
    #[error("provider response could not be decoded: {0}")]
    Decode(String),
}
