//! HTTP request handlers.

mod geocode;
mod health;
mod index;
mod ip;
mod reverse;
mod search;

pub use geocode::geocode_handler;
pub use health::health_handler;
pub use index::{index_handler, not_found_handler};
pub use ip::ip_handler;
pub use reverse::reverse_handler;
pub use search::search_handler;
