//! Façade trait for forward and reverse geocoding.

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::entities::GeocodeResult;

/// Upstream geocoding service.
///
/// # Implementations
///
/// - [`crate::infrastructure::providers::NominatimClient`] - OSM Nominatim client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodingProvider: Send + Sync {
    /// Forward-geocodes a free-text place query.
    ///
    /// Returns the provider's matches, best first. An empty vector is a
    /// successful call with no results, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport failure, non-success status,
    /// or an undecodable response body.
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>, ProviderError>;

    /// Reverse-geocodes a coordinate pair.
    ///
    /// `zoom` selects the level of address detail (0-18 for Nominatim).
    ///
    /// # Errors
    ///
    /// See [`Self::search`].
    async fn reverse(
        &self,
        lat: f64,
        lon: f64,
        zoom: Option<u8>,
    ) -> Result<GeocodeResult, ProviderError>;
}
