//! Deterministic cache-key derivation.
//!
//! Keys are pure functions of the route category and the raw request
//! parameters, in the order the route helpers fix them. No normalization is
//! applied: queries differing in case or whitespace produce different keys.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::route_category::RouteCategory;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded,
/// matching the encoding the upstream API contract was defined with.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Joins a category prefix and an ordered parameter list into a key.
///
/// Pure and infallible; callers supply already-validated parameters.
pub fn derive(category: RouteCategory, params: &[&str]) -> String {
    let mut key = String::from(category.as_str());
    for param in params {
        key.push(':');
        key.push_str(param);
    }
    key
}

/// `geocode:<urlencoded query>`
pub fn geocode(query: &str) -> String {
    derive(RouteCategory::Geocode, &[&encode(query)])
}

/// `search:<urlencoded query>:<limit or "5">`
pub fn search(query: &str, limit: Option<&str>) -> String {
    derive(RouteCategory::Search, &[&encode(query), limit.unwrap_or("5")])
}

/// `reverse:<lat>:<lon>:<zoom or "default">`
///
/// Coordinates are keyed on their raw request text, not the parsed numbers.
pub fn reverse(lat: &str, lon: &str, zoom: Option<&str>) -> String {
    derive(RouteCategory::Reverse, &[lat, lon, zoom.unwrap_or("default")])
}

/// `ip:<ip or "current">`
pub fn ip(ip: Option<&str>) -> String {
    derive(RouteCategory::IpLookup, &[ip.unwrap_or("current")])
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(geocode("Sydney, Australia"), geocode("Sydney, Australia"));
        assert_eq!(
            reverse("48.8584", "2.2945", Some("10")),
            reverse("48.8584", "2.2945", Some("10"))
        );
    }

    #[test]
    fn query_is_percent_encoded() {
        assert_eq!(geocode("Sydney, Australia"), "geocode:Sydney%2C%20Australia");
    }

    #[test]
    fn differing_parameters_produce_differing_keys() {
        assert_ne!(geocode("Sydney"), geocode("sydney"));
        assert_ne!(geocode("Sydney"), geocode("Sydney "));
        assert_ne!(search("Sydney", None), search("Sydney", Some("3")));
        assert_ne!(
            reverse("48.8584", "2.2945", None),
            reverse("48.8584", "2.2946", None)
        );
    }

    #[test]
    fn optional_parameters_fall_back_to_placeholders() {
        assert_eq!(search("Paris", None), "search:Paris:5");
        assert_eq!(reverse("1.0", "2.0", None), "reverse:1.0:2.0:default");
        assert_eq!(ip(None), "ip:current");
        assert_eq!(ip(Some("8.8.8.8")), "ip:8.8.8.8");
    }

    #[test]
    fn raw_coordinate_text_is_preserved() {
        // "1.0" and "1.00" name the same point but are distinct keys.
        assert_ne!(reverse("1.0", "2.0", None), reverse("1.00", "2.0", None));
    }
}
