//! OSM Nominatim geocoding client.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::domain::entities::{BoundingBox, GeocodeResult};
use crate::domain::providers::{GeocodingProvider, ProviderError};

/// How many matches Nominatim is asked for per search.
const SEARCH_LIMIT: &str = "5";

/// Client for the Nominatim `/search` and `/reverse` endpoints.
///
/// Nominatim's usage policy requires an identifying User-Agent; it is set
/// once on the underlying HTTP client. No retry or backoff is performed.
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NominatimClient {
    /// Builds a client against `base_url` (e.g. `https://nominatim.openstreetmap.org`).
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

    async fn fetch(&self, url: Url) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl GeocodingProvider for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
        let mut url = self.base_url.clone();
        url.set_path("search");
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("limit", SEARCH_LIMIT);

        let places: Vec<NominatimPlace> = self
            .fetch(url)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        places.into_iter().map(NominatimPlace::try_into_result).collect()
    }

    async fn reverse(
        &self,
        lat: f64,
        lon: f64,
        zoom: Option<u8>,
    ) -> Result<GeocodeResult, ProviderError> {
        let mut url = self.base_url.clone();
        url.set_path("reverse");
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("lat", &lat.to_string())
                .append_pair("lon", &lon.to_string())
                .append_pair("format", "jsonv2");
            if let Some(zoom) = zoom {
                pairs.append_pair("zoom", &zoom.to_string());
            }
        }

        let place: NominatimPlace = self
            .fetch(url)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        place.try_into_result()
    }
}

/// A place record in Nominatim's `jsonv2` format.
///
/// Coordinates arrive as strings; `boundingbox` is
/// `[south, north, west, east]`.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    boundingbox: Option<[String; 4]>,
}

impl NominatimPlace {
    fn try_into_result(self) -> Result<GeocodeResult, ProviderError> {
        let bounding_box = match &self.boundingbox {
            Some([south, north, west, east]) => Some(BoundingBox {
                north: parse_coord(north, "boundingbox north")?,
                south: parse_coord(south, "boundingbox south")?,
                east: parse_coord(east, "boundingbox east")?,
                west: parse_coord(west, "boundingbox west")?,
            }),
            None => None,
        };

        Ok(GeocodeResult {
            lat: parse_coord(&self.lat, "lat")?,
            lon: parse_coord(&self.lon, "lon")?,
            label: self.display_name,
            bounding_box,
        })
    }
}

fn parse_coord(raw: &str, field: &str) -> Result<f64, ProviderError> {
    raw.parse()
        .map_err(|_| ProviderError::Decode(format!("non-numeric {}: {:?}", field, raw)))
}
