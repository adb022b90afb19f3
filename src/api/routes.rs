//! Route configuration.
//!
//! # Route Structure
//!
//! - `GET /`               - API documentation index
//! - `GET /health`         - Health check: process + cache backend
//! - `GET /geocode`        - Single-result geocoding (cached 1h)
//! - `GET /geocode/search` - Multi-result geocoding (cached 1h)
//! - `GET /reverse`        - Reverse geocoding (cached 24h)
//! - `GET /ip`             - IP geolocation (cached 1h)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (proxy-aware when configured)
//! - **CORS** - Wildcard or an explicit origin list
//! - **Compression** - gzip response bodies
//! - **Path normalization** - Trailing slash handling

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{
    geocode_handler, health_handler, index_handler, ip_handler, not_found_handler,
    reverse_handler, search_handler,
};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/geocode", get(geocode_handler))
        .route("/geocode/search", get(search_handler))
        .route("/reverse", get(reverse_handler))
        .route("/ip", get(ip_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let router = if config.behind_proxy {
        router.layer(rate_limit::proxied_layer(config.rate_limit_burst))
    } else {
        router.layer(rate_limit::layer(config.rate_limit_burst))
    };

    let router = router
        .layer(cors_layer(&config.allowed_origins))
        .layer(CompressionLayer::new())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Wildcard CORS by default; an explicit origin list enables credentials.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let wildcard = allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*");

    if wildcard {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET])
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET])
            .allow_credentials(true)
    }
}
