//! Consumed interface for cache observability counters.

use super::route_category::RouteCategory;

/// Receives cache hit/miss and provider error signals.
///
/// Fire-and-forget: implementations must be synchronous, cheap, and must
/// never fail the request path. No response shaping depends on this sink.
///
/// # Implementations
///
/// - [`crate::infrastructure::metrics::RecorderMetrics`] - forwards to the
///   `metrics` crate facade
#[cfg_attr(test, mockall::automock)]
pub trait MetricsSink: Send + Sync {
    fn cache_hit(&self, route: RouteCategory);
    fn cache_miss(&self, route: RouteCategory);
    fn provider_error(&self, route: RouteCategory);
}
