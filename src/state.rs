use std::sync::Arc;
use std::time::Instant;

use crate::application::services::LookupService;
use crate::infrastructure::cache::CacheStore;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub lookup_service: Arc<LookupService>,
    pub cache: Arc<dyn CacheStore>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(lookup_service: Arc<LookupService>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            lookup_service,
            cache,
            started_at: Instant::now(),
        }
    }
}
