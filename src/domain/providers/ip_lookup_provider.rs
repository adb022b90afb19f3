//! Façade trait for IP geolocation.

use async_trait::async_trait;

use super::ProviderError;
use crate::domain::entities::IpLookupResult;

/// Upstream IP geolocation service.
///
/// # Implementations
///
/// - [`crate::infrastructure::providers::IpApiClient`] - ipapi.co client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IpLookupProvider: Send + Sync {
    /// Looks up geolocation data for an IP address.
    ///
    /// `None` asks the provider to geolocate the caller's own public IP.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport failure, non-success status,
    /// or an undecodable response body.
    async fn lookup<'a>(&'a self, ip: Option<&'a str>) -> Result<IpLookupResult, ProviderError>;
}
