//! HTTP clients for the upstream geocoding and IP-geolocation providers.

mod ipapi;
mod nominatim;

pub use ipapi::IpApiClient;
pub use nominatim::NominatimClient;
