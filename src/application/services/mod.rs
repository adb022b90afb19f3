//! Application services.

mod lookup_service;

pub use lookup_service::{Cached, LookupService};
