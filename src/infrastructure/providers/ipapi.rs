//! ipapi.co IP geolocation client.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::domain::entities::IpLookupResult;
use crate::domain::providers::{IpLookupProvider, ProviderError};

/// Client for the ipapi.co JSON endpoint.
///
/// Looks up `/{ip}/json/` for an explicit address, `/json/` for the
/// caller's own public IP.
pub struct IpApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IpApiClient {
    /// Builds a client against `base_url` (e.g. `https://ipapi.co`).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, user_agent: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl IpLookupProvider for IpApiClient {
    async fn lookup<'a>(&'a self, ip: Option<&'a str>) -> Result<IpLookupResult, ProviderError> {
        let mut url = self.base_url.clone();
        match ip {
            // Url::set_path percent-encodes anything unsafe in the address.
            Some(ip) => url.set_path(&format!("{}/json/", ip)),
            None => url.set_path("json/"),
        }

        let response = self.http.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(body.into_result())
    }
}

/// Subset of the ipapi.co response the service exposes.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country_name: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    postal: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    asn: Option<String>,
    #[serde(default)]
    org: Option<String>,
}

impl IpApiResponse {
    fn into_result(self) -> IpLookupResult {
        IpLookupResult {
            lat: self.latitude,
            lon: self.longitude,
            city: self.city,
            region: self.region,
            // ipapi.co reports both; the full name is the useful one.
            country: self.country_name.or(self.country),
            postal: self.postal,
            timezone: self.timezone,
            asn: self.asn,
            org: self.org,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_name_is_preferred_over_country_code() {
        let body = IpApiResponse {
            latitude: -33.86,
            longitude: 151.2,
            city: Some("Sydney".to_string()),
            region: None,
            country_name: Some("Australia".to_string()),
            country: Some("AU".to_string()),
            postal: None,
            timezone: Some("Australia/Sydney".to_string()),
            asn: None,
            org: None,
        };

        let result = body.into_result();
        assert_eq!(result.country.as_deref(), Some("Australia"));
        assert_eq!(result.lat, -33.86);
    }

    #[test]
    fn country_code_is_the_fallback() {
        let body = IpApiResponse {
            latitude: 0.0,
            longitude: 0.0,
            city: None,
            region: None,
            country_name: None,
            country: Some("AU".to_string()),
            postal: None,
            timezone: None,
            asn: None,
            org: None,
        };

        assert_eq!(body.into_result().country.as_deref(), Some("AU"));
    }
}
