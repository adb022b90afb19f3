//! Metrics sink backed by the `metrics` crate facade.

use crate::domain::RouteCategory;
use crate::domain::metrics::MetricsSink;

/// Forwards cache events to whatever recorder the process has installed.
///
/// Without an installed recorder the macros are no-ops, which keeps the
/// sink fire-and-forget in every deployment.
pub struct RecorderMetrics;

impl RecorderMetrics {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RecorderMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for RecorderMetrics {
    fn cache_hit(&self, route: RouteCategory) {
        metrics::counter!("cache_hits_total", "route" => route.as_str()).increment(1);
    }

    fn cache_miss(&self, route: RouteCategory) {
        metrics::counter!("cache_misses_total", "route" => route.as_str()).increment(1);
    }

    fn provider_error(&self, route: RouteCategory) {
        metrics::counter!("provider_errors_total", "route" => route.as_str()).increment(1);
    }
}
