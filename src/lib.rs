//! # geocode-proxy
//!
//! A caching HTTP proxy for geocoding and IP-geolocation providers,
//! built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, cache-key derivation, TTL
//!   policy, and provider façade traits
//! - **Application Layer** ([`application`]) - Read-through/write-through
//!   orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Cache backends,
//!   provider HTTP clients, metrics
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Deterministic per-route cache keys over raw request parameters
//! - Per-route TTLs (1h forward/IP lookups, 24h reverse geocoding)
//! - Pluggable backing store: in-process map or Redis, selected by
//!   configuration
//! - Fail-open caching: a broken store degrades to direct provider calls
//! - Rate limiting, CORS, compression, and structured request tracing
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: enable the Redis backend
//! export REDIS_URL="redis://localhost:6379"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Cached, LookupService};
    pub use crate::domain::RouteCategory;
    pub use crate::domain::entities::{BoundingBox, Coordinates, GeocodeResult, IpLookupResult};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheStore, MemoryCache};
    pub use crate::state::AppState;
}
