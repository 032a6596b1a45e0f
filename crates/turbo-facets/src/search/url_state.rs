//! Address-bar codec for the shareable part of the predicate set.
//!
//! Only the price range and the sort key travel in the URL. Rating, brand
//! and stock selections stay with the page session and are never written
//! here, so a shared link reproduces price and order but not the other
//! facets.

use crate::search::predicate::parse_price;
use crate::search::{FilterPredicates, PriceRange, SortKey};

/// Query parameter for the lower price bound.
pub const MIN_PRICE_PARAM: &str = "min_price";
/// Query parameter for the upper price bound.
pub const MAX_PRICE_PARAM: &str = "max_price";
/// Query parameter for the sort key.
pub const SORT_PARAM: &str = "sort";

/// The persisted subset of a predicate set. `None` fields are defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UrlState {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort: Option<SortKey>,
}

impl UrlState {
    /// Extract the persisted subset, dropping fields at their defaults.
    pub fn from_predicates(predicates: &FilterPredicates) -> Self {
        let range = predicates.price_range();
        Self {
            min_price: range.has_min().then(|| range.min()),
            max_price: range.has_max().then(|| range.max()),
            sort: (predicates.sort() != SortKey::None).then(|| predicates.sort()),
        }
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// Unknown parameters and malformed values are ignored. When a parameter
    /// repeats, the first occurrence wins.
    ///
    /// `max_price=0` is kept as an upper bound of zero, so it hides every
    /// priced product. This differs from a typed `0` in the price input,
    /// which [`PriceRange::from_inputs`] reads as unbounded: the URL carries
    /// exactly what [`encode`](Self::encode) wrote for a programmatic range.
    pub fn decode(query: &str) -> Self {
        let mut state = UrlState::default();
        let (mut seen_min, mut seen_max, mut seen_sort) = (false, false, false);

        for (key, value) in parse_query(query) {
            match key.as_str() {
                MIN_PRICE_PARAM if !seen_min => {
                    seen_min = true;
                    state.min_price = parse_price(&value).filter(|v| *v > 0.0);
                }
                MAX_PRICE_PARAM if !seen_max => {
                    seen_max = true;
                    state.max_price = parse_price(&value);
                }
                SORT_PARAM if !seen_sort => {
                    seen_sort = true;
                    state.sort = value.parse::<SortKey>().ok().filter(|k| *k != SortKey::None);
                }
                _ => {}
            }
        }

        if state.is_empty() && !query.trim_start_matches('?').is_empty() {
            tracing::debug!(query, "no usable filter parameters in query");
        }

        state
    }

    /// Serialize to a minimal query string (no leading `?`).
    ///
    /// Empty when every field is at its default.
    pub fn encode(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(min) = self.min_price {
            pairs.push((MIN_PRICE_PARAM, format_number(min)));
        }
        if let Some(max) = self.max_price {
            pairs.push((MAX_PRICE_PARAM, format_number(max)));
        }
        if let Some(sort) = self.sort {
            pairs.push((SORT_PARAM, sort.as_str().to_string()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Check if every field is at its default.
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none() && self.sort.is_none()
    }

    /// Overlay onto a predicate set. Only the persisted fields change.
    pub fn apply_to(&self, predicates: FilterPredicates) -> FilterPredicates {
        let range = PriceRange::new(
            self.min_price.unwrap_or(0.0),
            self.max_price.unwrap_or(f64::INFINITY),
        );
        predicates
            .with_price_range(range)
            .with_sort(self.sort.unwrap_or_default())
    }
}

/// Encode the persisted subset of a predicate set.
pub fn encode(predicates: &FilterPredicates) -> String {
    UrlState::from_predicates(predicates).encode()
}

/// Decode a query string into its persisted subset.
pub fn decode(query: &str) -> UrlState {
    UrlState::decode(query)
}

/// Join a path and a query string into an address-bar URL.
pub fn build_url(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

pub(crate) fn format_number(value: f64) -> String {
    // Display gives the shortest text that parses back to the same value.
    format!("{}", value)
}

fn parse_query(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = parts.next().unwrap_or("");
            (urlencoding_decode(key), urlencoding_decode(value))
        })
}

fn urlencoding_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char)
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{:02X}", byte)),
        }
    }
    result
}

fn urlencoding_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                match std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                {
                    Some(byte) => {
                        decoded.push(byte);
                        i += 3;
                    }
                    None => {
                        decoded.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            other => {
                decoded.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_encodes_to_empty() {
        assert_eq!(encode(&FilterPredicates::new()), "");
    }

    #[test]
    fn test_encode_minimal() {
        let p = FilterPredicates::new()
            .with_price_range(PriceRange::new(10.0, f64::INFINITY))
            .with_sort(SortKey::PriceDesc);
        assert_eq!(encode(&p), "min_price=10&sort=price-desc");

        let p = FilterPredicates::new().with_price_range(PriceRange::new(0.0, 99.5));
        assert_eq!(encode(&p), "max_price=99.5");
    }

    #[test]
    fn test_session_facets_not_persisted() {
        let p = FilterPredicates::new()
            .with_brand("Acme", true)
            .with_stock_only(true)
            .with_rating(4, true)
            .unwrap();
        assert_eq!(encode(&p), "");
    }

    #[test]
    fn test_decode_empty_is_default() {
        assert!(decode("").is_empty());
        assert!(decode("?").is_empty());
        assert_eq!(decode("").apply_to(FilterPredicates::new()), FilterPredicates::new());
    }

    #[test]
    fn test_decode_full() {
        let state = decode("?min_price=5&max_price=20.25&sort=newest");
        assert_eq!(state.min_price, Some(5.0));
        assert_eq!(state.max_price, Some(20.25));
        assert_eq!(state.sort, Some(SortKey::Newest));
    }

    #[test]
    fn test_decode_ignores_malformed() {
        let state = decode("min_price=abc&max_price=-3&sort=cheapest&page=2&%ZZ=1");
        assert!(state.is_empty());

        let state = decode("min_price=inf&max_price=NaN");
        assert!(state.is_empty());
    }

    #[test]
    fn test_decode_first_occurrence_wins() {
        let state = decode("sort=newest&sort=price-asc&min_price=1&min_price=2");
        assert_eq!(state.sort, Some(SortKey::Newest));
        assert_eq!(state.min_price, Some(1.0));
    }

    #[test]
    fn test_decode_percent_encoded() {
        let state = decode("sort=price%2Ddesc&min%5Fprice=7");
        assert_eq!(state.sort, Some(SortKey::PriceDesc));
        assert_eq!(state.min_price, Some(7.0));
    }

    #[test]
    fn test_round_trip_keeps_session_facets() {
        let original = FilterPredicates::new()
            .with_price_range(PriceRange::new(12.5, 80.0))
            .with_sort(SortKey::Bestseller)
            .with_brand("Acme", true);

        let restored = decode(&encode(&original)).apply_to(original.clone());
        assert_eq!(restored, original);
    }

    #[test]
    fn test_zero_max_round_trips() {
        let original = FilterPredicates::new().with_price_range(PriceRange::new(0.0, 0.0));
        assert_eq!(encode(&original), "max_price=0");
        let restored = decode(&encode(&original)).apply_to(FilterPredicates::new());
        assert_eq!(restored, original);
    }

    #[test]
    fn test_build_url() {
        assert_eq!(build_url("/category/shoes", ""), "/category/shoes");
        assert_eq!(build_url("/category/shoes", "sort=newest"), "/category/shoes?sort=newest");
    }

    #[test]
    fn test_urlencoding() {
        assert_eq!(urlencoding_encode("a b/c"), "a+b%2Fc");
        assert_eq!(urlencoding_decode("a+b%2Fc"), "a b/c");
        assert_eq!(urlencoding_decode("100%"), "100%");
        assert_eq!(urlencoding_decode("%C3%A9"), "é");
    }
}
