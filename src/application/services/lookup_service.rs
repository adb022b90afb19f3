//! Read-through/write-through orchestration over the cache and providers.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::warn;

use crate::domain::RouteCategory;
use crate::domain::cache_key;
use crate::domain::entities::{Coordinates, GeocodeResult, IpLookupResult};
use crate::domain::metrics::MetricsSink;
use crate::domain::providers::{GeocodingProvider, IpLookupProvider, ProviderError};
use crate::error::AppError;
use crate::infrastructure::cache::CacheStore;

/// A lookup result plus whether it was served from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<T> {
    pub value: T,
    pub cached: bool,
}

/// Orchestrates every cacheable lookup route.
///
/// Owns both halves of the flow: derive key → store read → on miss, provider
/// call → write-through. Store failures are recovered here and degrade the
/// request to a direct provider call; they never reach the caller.
///
/// Concurrent misses for the same key each call the provider and each write
/// the (idempotent) result — there is no in-flight deduplication.
pub struct LookupService {
    cache: Arc<dyn CacheStore>,
    geocoder: Arc<dyn GeocodingProvider>,
    ip_provider: Arc<dyn IpLookupProvider>,
    metrics: Arc<dyn MetricsSink>,
}

impl LookupService {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        geocoder: Arc<dyn GeocodingProvider>,
        ip_provider: Arc<dyn IpLookupProvider>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            cache,
            geocoder,
            ip_provider,
            metrics,
        }
    }

    /// Single best geocoding match for a place query.
    ///
    /// # Errors
    ///
    /// [`AppError::NotFound`] when the provider has no match — never cached,
    /// since absence of a result may be transient. [`AppError::Provider`]
    /// when the upstream call fails.
    pub async fn geocode(&self, query: &str) -> Result<Cached<GeocodeResult>, AppError> {
        let route = RouteCategory::Geocode;
        let key = cache_key::geocode(query);

        if let Some(value) = self.read_cache::<GeocodeResult>(&key).await {
            self.metrics.cache_hit(route);
            return Ok(Cached {
                value,
                cached: true,
            });
        }
        self.metrics.cache_miss(route);

        let results = self
            .geocoder
            .search(query)
            .await
            .map_err(|e| self.provider_failure(route, e))?;

        let Some(value) = results.into_iter().next() else {
            return Err(AppError::not_found(
                "No results found",
                json!({ "query": query }),
            ));
        };

        self.write_through(route, &key, &value).await;
        Ok(Cached {
            value,
            cached: false,
        })
    }

    /// All geocoding matches for a place query, optionally truncated.
    ///
    /// An empty match list is a success and is cached like any other result.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] for a non-numeric `limit`;
    /// [`AppError::Provider`] when the upstream call fails.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<&str>,
    ) -> Result<Cached<Vec<GeocodeResult>>, AppError> {
        let route = RouteCategory::Search;
        let limit_count = limit
            .map(|raw| raw.parse::<usize>())
            .transpose()
            .map_err(|_| {
                AppError::bad_request(
                    "Invalid parameter: limit must be a positive integer",
                    json!({ "example": "/geocode/search?query=Sydney, Australia&limit=3" }),
                )
            })?;
        let key = cache_key::search(query, limit);

        if let Some(value) = self.read_cache::<Vec<GeocodeResult>>(&key).await {
            self.metrics.cache_hit(route);
            return Ok(Cached {
                value,
                cached: true,
            });
        }
        self.metrics.cache_miss(route);

        let mut value = self
            .geocoder
            .search(query)
            .await
            .map_err(|e| self.provider_failure(route, e))?;
        if let Some(limit) = limit_count {
            value.truncate(limit);
        }

        self.write_through(route, &key, &value).await;
        Ok(Cached {
            value,
            cached: false,
        })
    }

    /// Reverse-geocodes a coordinate pair given as raw request text.
    ///
    /// The cache key is derived from the raw text (no normalization), while
    /// the provider receives the parsed numbers. Returns the parsed
    /// coordinates alongside the result so callers can echo them.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] for non-numeric coordinates or an
    /// out-of-range `zoom`; [`AppError::Provider`] when the upstream call
    /// fails.
    pub async fn reverse(
        &self,
        lat: &str,
        lon: &str,
        zoom: Option<&str>,
    ) -> Result<(Coordinates, Cached<GeocodeResult>), AppError> {
        let route = RouteCategory::Reverse;
        let coordinates = Coordinates {
            lat: parse_coordinate(lat, "lat")?,
            lon: parse_coordinate(lon, "lon")?,
        };
        let zoom_level = match zoom {
            Some(raw) => match raw.parse::<u8>() {
                Ok(level) if level <= 18 => Some(level),
                _ => {
                    return Err(AppError::bad_request(
                        "Invalid parameter: zoom must be an integer between 0 and 18",
                        json!({ "example": "/reverse?lat=48.8584&lon=2.2945&zoom=10" }),
                    ));
                }
            },
            None => None,
        };
        let key = cache_key::reverse(lat, lon, zoom);

        if let Some(value) = self.read_cache::<GeocodeResult>(&key).await {
            self.metrics.cache_hit(route);
            return Ok((
                coordinates,
                Cached {
                    value,
                    cached: true,
                },
            ));
        }
        self.metrics.cache_miss(route);

        let value = self
            .geocoder
            .reverse(coordinates.lat, coordinates.lon, zoom_level)
            .await
            .map_err(|e| self.provider_failure(route, e))?;

        self.write_through(route, &key, &value).await;
        Ok((
            coordinates,
            Cached {
                value,
                cached: false,
            },
        ))
    }

    /// Geolocates an IP address, or the caller's own when `ip` is `None`.
    ///
    /// # Errors
    ///
    /// [`AppError::Provider`] when the upstream call fails.
    pub async fn ip_lookup(&self, ip: Option<&str>) -> Result<Cached<IpLookupResult>, AppError> {
        let route = RouteCategory::IpLookup;
        let key = cache_key::ip(ip);

        if let Some(value) = self.read_cache::<IpLookupResult>(&key).await {
            self.metrics.cache_hit(route);
            return Ok(Cached {
                value,
                cached: true,
            });
        }
        self.metrics.cache_miss(route);

        let value = self
            .ip_provider
            .lookup(ip)
            .await
            .map_err(|e| self.provider_failure(route, e))?;

        self.write_through(route, &key, &value).await;
        Ok(Cached {
            value,
            cached: false,
        })
    }

    /// Store read plus payload decode. Fail-open: store errors and
    /// undecodable payloads both read as a miss.
    async fn read_cache<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache GET failed for {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undecodable cache entry {}: {}", key, e);
                None
            }
        }
    }

    /// Writes a fresh provider result with the route's TTL.
    ///
    /// The write runs on a detached task so an aborted request cannot cancel
    /// it; awaiting the handle means a completed response has always
    /// observed the write. Failures are logged and swallowed — the response
    /// was already computed successfully.
    async fn write_through<T: Serialize>(&self, route: RouteCategory, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize cache payload for {}: {}", key, e);
                return;
            }
        };

        let cache = Arc::clone(&self.cache);
        let key = key.to_string();
        let ttl = route.ttl();
        let write = tokio::spawn(async move {
            if let Err(e) = cache.set(&key, &payload, ttl).await {
                warn!("Cache SET failed for {}: {}", key, e);
            }
        });
        let _ = write.await;
    }

    fn provider_failure(&self, route: RouteCategory, err: ProviderError) -> AppError {
        self.metrics.provider_error(route);
        AppError::from(err)
    }
}

fn parse_coordinate(raw: &str, name: &str) -> Result<f64, AppError> {
    raw.parse().map_err(|_| {
        AppError::bad_request(
            format!("Invalid parameter: {} must be a number", name),
            json!({ "example": "/reverse?lat=48.8584&lon=2.2945" }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::MockMetricsSink;
    use crate::domain::providers::{MockGeocodingProvider, MockIpLookupProvider};
    use crate::infrastructure::cache::{CacheError, MemoryCache, MockCacheStore};
    use mockall::predicate::eq;

    fn sydney() -> GeocodeResult {
        GeocodeResult {
            lat: -33.8698439,
            lon: 151.2082848,
            label: "Sydney, New South Wales, Australia".to_string(),
            bounding_box: None,
        }
    }

    fn relaxed_metrics() -> MockMetricsSink {
        let mut metrics = MockMetricsSink::new();
        metrics.expect_cache_hit().returning(|_| ());
        metrics.expect_cache_miss().returning(|_| ());
        metrics.expect_provider_error().returning(|_| ());
        metrics
    }

    fn service_with(
        cache: Arc<dyn CacheStore>,
        geocoder: MockGeocodingProvider,
        ip_provider: MockIpLookupProvider,
        metrics: MockMetricsSink,
    ) -> LookupService {
        LookupService::new(
            cache,
            Arc::new(geocoder),
            Arc::new(ip_provider),
            Arc::new(metrics),
        )
    }

    #[tokio::test]
    async fn geocode_miss_then_hit_calls_provider_once() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder
            .expect_search()
            .with(eq("Sydney, Australia"))
            .times(1)
            .returning(|_| Ok(vec![sydney()]));

        let mut metrics = MockMetricsSink::new();
        metrics
            .expect_cache_miss()
            .with(eq(RouteCategory::Geocode))
            .times(1)
            .returning(|_| ());
        metrics
            .expect_cache_hit()
            .with(eq(RouteCategory::Geocode))
            .times(1)
            .returning(|_| ());

        let service = service_with(
            Arc::new(MemoryCache::new()),
            geocoder,
            MockIpLookupProvider::new(),
            metrics,
        );

        let first = service.geocode("Sydney, Australia").await.unwrap();
        assert!(!first.cached);

        let second = service.geocode("Sydney, Australia").await.unwrap();
        assert!(second.cached);
        assert_eq!(first.value, second.value);
    }

    #[tokio::test]
    async fn geocode_no_results_is_not_found_and_not_cached() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder.expect_search().times(2).returning(|_| Ok(vec![]));

        let cache = Arc::new(MemoryCache::new());
        let service = service_with(
            cache.clone(),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        for _ in 0..2 {
            let err = service.geocode("xyzzy").await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }));
        }
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn search_caches_empty_result_lists() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder.expect_search().times(1).returning(|_| Ok(vec![]));

        let service = service_with(
            Arc::new(MemoryCache::new()),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        let first = service.search("xyzzy", None).await.unwrap();
        assert!(!first.cached);
        assert!(first.value.is_empty());

        let second = service.search("xyzzy", None).await.unwrap();
        assert!(second.cached, "empty search results must be served from cache");
    }

    #[tokio::test]
    async fn search_truncates_to_the_requested_limit() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![sydney(), sydney(), sydney()]));

        let service = service_with(
            Arc::new(MemoryCache::new()),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        let result = service.search("Sydney", Some("2")).await.unwrap();
        assert_eq!(result.value.len(), 2);
    }

    #[tokio::test]
    async fn search_rejects_a_malformed_limit_before_any_lookup() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder.expect_search().never();

        let service = service_with(
            Arc::new(MemoryCache::new()),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        let err = service.search("Sydney", Some("lots")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn reverse_passes_parsed_coordinates_to_the_provider() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder
            .expect_reverse()
            .with(eq(48.8584), eq(2.2945), eq(Some(10)))
            .times(1)
            .returning(|lat, lon, _| {
                Ok(GeocodeResult {
                    lat,
                    lon,
                    label: "Tour Eiffel, Paris, France".to_string(),
                    bounding_box: None,
                })
            });

        let service = service_with(
            Arc::new(MemoryCache::new()),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        let (coordinates, lookup) = service
            .reverse("48.8584", "2.2945", Some("10"))
            .await
            .unwrap();
        assert_eq!(coordinates.lat, 48.8584);
        assert_eq!(coordinates.lon, 2.2945);
        assert!(!lookup.cached);
    }

    #[tokio::test]
    async fn reverse_rejects_non_numeric_coordinates() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder.expect_reverse().never();

        let service = service_with(
            Arc::new(MemoryCache::new()),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        let err = service.reverse("north", "2.2945", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn ip_lookup_defaults_to_the_current_address_key() {
        let mut ip_provider = MockIpLookupProvider::new();
        ip_provider.expect_lookup().times(1).returning(|_| {
            Ok(IpLookupResult {
                lat: -33.86,
                lon: 151.2,
                city: Some("Sydney".to_string()),
                region: None,
                country: Some("Australia".to_string()),
                postal: None,
                timezone: None,
                asn: None,
                org: None,
            })
        });

        let cache = Arc::new(MemoryCache::new());
        let service = service_with(
            cache.clone(),
            MockGeocodingProvider::new(),
            ip_provider,
            relaxed_metrics(),
        );

        let first = service.ip_lookup(None).await.unwrap();
        assert!(!first.cached);
        assert!(cache.get("ip:current").await.unwrap().is_some());

        let second = service.ip_lookup(None).await.unwrap();
        assert!(second.cached);
    }

    #[tokio::test]
    async fn store_failures_fail_open_to_direct_provider_calls() {
        let mut store = MockCacheStore::new();
        store
            .expect_get()
            .times(2)
            .returning(|_| Err(CacheError::OperationError("boom".to_string())));
        store
            .expect_set()
            .times(2)
            .returning(|_, _, _| Err(CacheError::OperationError("boom".to_string())));

        let mut geocoder = MockGeocodingProvider::new();
        geocoder
            .expect_search()
            .times(2)
            .returning(|_| Ok(vec![sydney()]));

        let service = service_with(
            Arc::new(store),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        for _ in 0..2 {
            let lookup = service.geocode("Sydney, Australia").await.unwrap();
            assert!(!lookup.cached);
        }
    }

    #[tokio::test]
    async fn provider_failure_reports_an_error_metric_and_writes_nothing() {
        let mut geocoder = MockGeocodingProvider::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Err(ProviderError::Status { status: 502 }));

        let mut metrics = MockMetricsSink::new();
        metrics.expect_cache_miss().times(1).returning(|_| ());
        metrics
            .expect_provider_error()
            .with(eq(RouteCategory::Geocode))
            .times(1)
            .returning(|_| ());

        let cache = Arc::new(MemoryCache::new());
        let service = service_with(
            cache.clone(),
            geocoder,
            MockIpLookupProvider::new(),
            metrics,
        );

        let err = service.geocode("Sydney").await.unwrap_err();
        assert!(matches!(err, AppError::Provider(_)));
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test]
    async fn undecodable_cache_payloads_read_as_a_miss() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .set("geocode:Sydney", "not json", RouteCategory::Geocode.ttl())
            .await
            .unwrap();

        let mut geocoder = MockGeocodingProvider::new();
        geocoder
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![sydney()]));

        let service = service_with(
            cache.clone(),
            geocoder,
            MockIpLookupProvider::new(),
            relaxed_metrics(),
        );

        let lookup = service.geocode("Sydney").await.unwrap();
        assert!(!lookup.cached);
    }
}
