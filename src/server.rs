//! HTTP server initialization and runtime setup.
//!
//! Handles provider client construction, cache backend selection, sweeper
//! spawning, and Axum server lifecycle.

use crate::api::routes::app_router;
use crate::application::services::LookupService;
use crate::config::Config;
use crate::domain::metrics::MetricsSink;
use crate::domain::providers::{GeocodingProvider, IpLookupProvider};
use crate::infrastructure::cache::{CacheStore, CacheSweeper, MemoryCache, RedisCache};
use crate::infrastructure::metrics::RecorderMetrics;
use crate::infrastructure::providers::{IpApiClient, NominatimClient};
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Provider HTTP clients (Nominatim, ipapi.co)
/// - Cache backend selected by configuration: Redis when configured
///   (falling back to the in-process cache if the connection fails),
///   in-process otherwise
/// - Expiry sweeper for the in-process backend
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - A provider base URL is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let timeout = Duration::from_secs(config.provider_timeout_seconds);

    let nominatim_base = Url::parse(&config.nominatim_url)?;
    let geocoder: Arc<dyn GeocodingProvider> = Arc::new(NominatimClient::new(
        nominatim_base,
        &config.user_agent,
        timeout,
    )?);

    let ipapi_base = Url::parse(&config.ipapi_url)?;
    let ip_provider: Arc<dyn IpLookupProvider> =
        Arc::new(IpApiClient::new(ipapi_base, &config.user_agent, timeout)?);

    let (cache, sweeper) = build_cache(&config).await;

    let metrics: Arc<dyn MetricsSink> = Arc::new(RecorderMetrics::new());
    let lookup_service = Arc::new(LookupService::new(
        Arc::clone(&cache),
        geocoder,
        ip_provider,
        metrics,
    ));

    let state = AppState::new(lookup_service, cache);
    let app = app_router(state, &config);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    if let Some(sweeper) = sweeper {
        sweeper.stop();
        tracing::info!("Cache sweeper stopped");
    }

    Ok(())
}

/// Selects the cache backend from configuration.
///
/// Redis connection failures fall back to the in-process cache rather than
/// refusing to start: the service is usable without any cache at all, so a
/// degraded local one is strictly better than an outage.
async fn build_cache(config: &Config) -> (Arc<dyn CacheStore>, Option<CacheSweeper>) {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Cache backend: Redis");
                return (Arc::new(redis), None);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-process cache.", e);
            }
        }
    } else {
        tracing::info!("Cache backend: in-process");
    }

    let memory = Arc::new(MemoryCache::new());
    let sweeper = CacheSweeper::spawn(
        Arc::clone(&memory),
        Duration::from_secs(config.sweep_interval_seconds),
    );
    (memory, Some(sweeper))
}

/// Resolves when SIGINT or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, shutting down gracefully");
}
