#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use geocode_proxy::application::services::LookupService;
use geocode_proxy::domain::RouteCategory;
use geocode_proxy::domain::entities::{GeocodeResult, IpLookupResult};
use geocode_proxy::domain::metrics::MetricsSink;
use geocode_proxy::domain::providers::{GeocodingProvider, IpLookupProvider, ProviderError};
use geocode_proxy::infrastructure::cache::{CacheError, CacheResult, CacheStore, MemoryCache};
use geocode_proxy::state::AppState;

pub fn sydney() -> GeocodeResult {
    GeocodeResult {
        lat: -33.8698439,
        lon: 151.2082848,
        label: "Sydney, Council of the City of Sydney, New South Wales, Australia".to_string(),
        bounding_box: None,
    }
}

/// Geocoding stub returning a fixed result set, counting calls.
pub struct FakeGeocoder {
    results: Vec<GeocodeResult>,
    pub search_calls: AtomicUsize,
    pub reverse_calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn with_results(results: Vec<GeocodeResult>) -> Self {
        Self {
            results,
            search_calls: AtomicUsize::new(0),
            reverse_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::with_results(Vec::new())
    }
}

#[async_trait]
impl GeocodingProvider for FakeGeocoder {
    async fn search(&self, _query: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }

    async fn reverse(
        &self,
        lat: f64,
        lon: f64,
        _zoom: Option<u8>,
    ) -> Result<GeocodeResult, ProviderError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        Ok(GeocodeResult {
            lat,
            lon,
            label: "Tour Eiffel, Avenue Gustave Eiffel, Paris, France".to_string(),
            bounding_box: None,
        })
    }
}

/// IP lookup stub returning a fixed result, counting calls.
#[derive(Default)]
pub struct FakeIpProvider {
    pub calls: AtomicUsize,
}

#[async_trait]
impl IpLookupProvider for FakeIpProvider {
    async fn lookup<'a>(&'a self, _ip: Option<&'a str>) -> Result<IpLookupResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(IpLookupResult {
            lat: 37.751,
            lon: -97.822,
            city: Some("Wichita".to_string()),
            region: Some("Kansas".to_string()),
            country: Some("United States".to_string()),
            postal: None,
            timezone: Some("America/Chicago".to_string()),
            asn: Some("AS15169".to_string()),
            org: Some("Google LLC".to_string()),
        })
    }
}

/// IP lookup stub that always fails upstream.
pub struct FailingIpProvider;

#[async_trait]
impl IpLookupProvider for FailingIpProvider {
    async fn lookup<'a>(&'a self, _ip: Option<&'a str>) -> Result<IpLookupResult, ProviderError> {
        Err(ProviderError::Status { status: 502 })
    }
}

/// Metrics sink that drops every event.
pub struct NullMetrics;

impl MetricsSink for NullMetrics {
    fn cache_hit(&self, _route: RouteCategory) {}
    fn cache_miss(&self, _route: RouteCategory) {}
    fn provider_error(&self, _route: RouteCategory) {}
}

/// Store whose every operation fails, for fail-open coverage.
pub struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::OperationError("injected failure".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::OperationError("injected failure".to_string()))
    }

    async fn entry_count(&self) -> Option<usize> {
        None
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

pub struct TestContext {
    pub state: AppState,
    pub geocoder: Arc<FakeGeocoder>,
    pub ip_provider: Arc<FakeIpProvider>,
    pub cache: Arc<MemoryCache>,
}

/// Builds an [`AppState`] over an in-process cache and counting stubs.
pub fn create_test_state(results: Vec<GeocodeResult>) -> TestContext {
    let cache = Arc::new(MemoryCache::new());
    let geocoder = Arc::new(FakeGeocoder::with_results(results));
    let ip_provider = Arc::new(FakeIpProvider::default());

    let lookup_service = Arc::new(LookupService::new(
        cache.clone() as Arc<dyn CacheStore>,
        geocoder.clone() as Arc<dyn GeocodingProvider>,
        ip_provider.clone() as Arc<dyn IpLookupProvider>,
        Arc::new(NullMetrics),
    ));
    let state = AppState::new(lookup_service, cache.clone() as Arc<dyn CacheStore>);

    TestContext {
        state,
        geocoder,
        ip_provider,
        cache,
    }
}

/// Builds an [`AppState`] whose store fails every operation.
pub fn create_failing_store_state(results: Vec<GeocodeResult>) -> (AppState, Arc<FakeGeocoder>) {
    let cache: Arc<dyn CacheStore> = Arc::new(FailingStore);
    let geocoder = Arc::new(FakeGeocoder::with_results(results));

    let lookup_service = Arc::new(LookupService::new(
        cache.clone(),
        geocoder.clone() as Arc<dyn GeocodingProvider>,
        Arc::new(FakeIpProvider::default()),
        Arc::new(NullMetrics),
    ));
    let state = AppState::new(lookup_service, cache);

    (state, geocoder)
}

/// Builds an [`AppState`] whose IP provider always fails upstream.
pub fn create_failing_ip_state() -> (AppState, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new());

    let lookup_service = Arc::new(LookupService::new(
        cache.clone() as Arc<dyn CacheStore>,
        Arc::new(FakeGeocoder::empty()) as Arc<dyn GeocodingProvider>,
        Arc::new(FailingIpProvider),
        Arc::new(NullMetrics),
    ));
    let state = AppState::new(lookup_service, cache.clone() as Arc<dyn CacheStore>);

    (state, cache)
}
