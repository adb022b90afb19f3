//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Sustained refill rate in requests per second per client IP.
const PER_SECOND: u64 = 2;

/// Creates a per-IP rate limiter keyed on the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. `burst`
/// controls the bucket size (`RATE_LIMIT_MAX`).
pub fn layer(
    burst: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(PER_SECOND)
            .burst_size(burst)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter for deployments behind a trusted reverse proxy.
///
/// Reads the client IP from `X-Forwarded-For` / `X-Real-IP` instead of the
/// peer socket address; enable only when those headers are trustworthy.
pub fn proxied_layer(
    burst: u32,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(PER_SECOND)
            .burst_size(burst)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
