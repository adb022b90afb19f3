//! Closed set of cacheable route categories and their TTL policy.

use std::time::Duration;

/// Route category a cache entry belongs to.
///
/// The set is fixed at compile time; each category determines both the
/// cache-key prefix and the TTL applied at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteCategory {
    Geocode,
    Search,
    Reverse,
    IpLookup,
}

impl RouteCategory {
    /// TTL applied to entries written for this category.
    ///
    /// Reverse geocoding results for a fixed coordinate are far more stable
    /// over time than forward search results, hence the 24h TTL.
    pub fn ttl(self) -> Duration {
        match self {
            Self::Geocode | Self::Search | Self::IpLookup => Duration::from_secs(3600),
            Self::Reverse => Duration::from_secs(86400),
        }
    }

    /// Stable name used as the cache-key prefix and as the metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Geocode => "geocode",
            Self::Search => "search",
            Self::Reverse => "reverse",
            Self::IpLookup => "ip",
        }
    }
}
