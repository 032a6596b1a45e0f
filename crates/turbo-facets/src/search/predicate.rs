//! Filter predicate set.

use std::collections::BTreeSet;
use std::fmt;

use crate::search::SortKey;
use crate::FacetError;

/// Rating thresholds a shopper can select.
pub const RATING_THRESHOLDS: std::ops::RangeInclusive<u8> = 1..=5;

/// One independently filterable dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Price,
    Rating,
    Brand,
    Stock,
}

impl Facet {
    /// All facets, cheapest check first.
    pub const ALL: [Facet; 4] = [Facet::Price, Facet::Stock, Facet::Rating, Facet::Brand];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Price => "price",
            Facet::Rating => "rating",
            Facet::Brand => "brand",
            Facet::Stock => "stock",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive price bounds.
///
/// `min` is finite and non-negative, `max` is non-negative or infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }
}

impl PriceRange {
    /// Create a range, pulling out-of-domain bounds back to their defaults.
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() && min > 0.0 { min } else { 0.0 };
        let max = if max.is_nan() { f64::INFINITY } else { max.max(0.0) };
        Self { min, max }
    }

    /// Parse the raw text of the price inputs.
    ///
    /// A min that isn't a positive number means 0; a max that isn't a
    /// positive number means unbounded.
    pub fn from_inputs(min: &str, max: &str) -> Self {
        let min = parse_price(min).unwrap_or(0.0);
        let max = parse_price(max)
            .filter(|m| *m > 0.0)
            .unwrap_or(f64::INFINITY);
        Self::new(min, max)
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound, `f64::INFINITY` when unbounded.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Check if a price falls inside the range.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Check if the range has a lower bound.
    pub fn has_min(&self) -> bool {
        self.min > 0.0
    }

    /// Check if the range has an upper bound.
    pub fn has_max(&self) -> bool {
        self.max < f64::INFINITY
    }

    /// Check if both bounds are defaults.
    pub fn is_default(&self) -> bool {
        !self.has_min() && !self.has_max()
    }

    /// Text for the "from" and "to" price inputs. Default bounds are blank.
    pub fn input_text(&self) -> (String, String) {
        let from = if self.has_min() {
            crate::search::url_state::format_number(self.min)
        } else {
            String::new()
        };
        let to = if self.has_max() {
            crate::search::url_state::format_number(self.max)
        } else {
            String::new()
        };
        (from, to)
    }
}

/// Parse a finite, non-negative price from user or URL text.
pub(crate) fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// The combined selection across all facets.
///
/// A value object: every update returns a new set. The default set shows
/// every product and applies no sort.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPredicates {
    price_range: PriceRange,
    min_ratings: BTreeSet<u8>,
    brands: BTreeSet<String>,
    in_stock_only: bool,
    sort: SortKey,
}

impl FilterPredicates {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price_range(&self) -> PriceRange {
        self.price_range
    }

    /// Selected rating thresholds. Empty means unconstrained.
    pub fn min_ratings(&self) -> &BTreeSet<u8> {
        &self.min_ratings
    }

    /// Selected brands. Empty means unconstrained.
    pub fn brands(&self) -> &BTreeSet<String> {
        &self.brands
    }

    pub fn in_stock_only(&self) -> bool {
        self.in_stock_only
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Replace the price range.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Select or deselect a rating threshold.
    pub fn with_rating(mut self, threshold: u8, selected: bool) -> Result<Self, FacetError> {
        if !RATING_THRESHOLDS.contains(&threshold) {
            return Err(FacetError::InvalidRatingThreshold(threshold));
        }
        if selected {
            self.min_ratings.insert(threshold);
        } else {
            self.min_ratings.remove(&threshold);
        }
        Ok(self)
    }

    /// Flip a rating threshold's selection.
    pub fn toggling_rating(self, threshold: u8) -> Result<Self, FacetError> {
        let selected = !self.min_ratings.contains(&threshold);
        self.with_rating(threshold, selected)
    }

    /// Select or deselect a brand.
    pub fn with_brand(mut self, brand: impl Into<String>, selected: bool) -> Self {
        let brand = brand.into();
        if selected {
            self.brands.insert(brand);
        } else {
            self.brands.remove(&brand);
        }
        self
    }

    /// Flip a brand's selection.
    pub fn toggling_brand(self, brand: impl Into<String>) -> Self {
        let brand = brand.into();
        let selected = !self.brands.contains(&brand);
        self.with_brand(brand, selected)
    }

    /// Restrict to in-stock products or lift the restriction.
    pub fn with_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    /// Replace the sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Check if a facet's selection differs from its default.
    pub fn is_facet_active(&self, facet: Facet) -> bool {
        match facet {
            Facet::Price => !self.price_range.is_default(),
            Facet::Rating => !self.min_ratings.is_empty(),
            Facet::Brand => !self.brands.is_empty(),
            Facet::Stock => self.in_stock_only,
        }
    }

    /// Check if any facet narrows the listing. The sort key doesn't count.
    pub fn has_active_facets(&self) -> bool {
        Facet::ALL.iter().any(|f| self.is_facet_active(*f))
    }

    /// Check if every field, sort key included, is at its default.
    pub fn is_default(&self) -> bool {
        !self.has_active_facets() && self.sort == SortKey::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconstrained() {
        let p = FilterPredicates::new();
        assert!(p.is_default());
        assert!(!p.has_active_facets());
        assert_eq!(p.price_range().min(), 0.0);
        assert_eq!(p.price_range().max(), f64::INFINITY);
    }

    #[test]
    fn test_price_inputs_parsing() {
        let r = PriceRange::from_inputs("10", "20.5");
        assert_eq!((r.min(), r.max()), (10.0, 20.5));

        let r = PriceRange::from_inputs("abc", "");
        assert!(r.is_default());

        // An entered max of 0 means no upper bound
        let r = PriceRange::from_inputs("", "0");
        assert!(!r.has_max());

        let r = PriceRange::from_inputs("-5", "inf");
        assert!(r.is_default());
    }

    #[test]
    fn test_price_range_normalizes() {
        let r = PriceRange::new(f64::NAN, f64::NAN);
        assert!(r.is_default());
        let r = PriceRange::new(-1.0, -4.0);
        assert_eq!((r.min(), r.max()), (0.0, 0.0));
    }

    #[test]
    fn test_price_input_text() {
        assert_eq!(
            PriceRange::new(20.0, 49.5).input_text(),
            ("20".to_string(), "49.5".to_string())
        );
        assert_eq!(
            PriceRange::default().input_text(),
            (String::new(), String::new())
        );

        let (from, to) = PriceRange::new(15.0, f64::INFINITY).input_text();
        assert_eq!(PriceRange::from_inputs(&from, &to), PriceRange::new(15.0, f64::INFINITY));
    }

    #[test]
    fn test_rating_selection() {
        let p = FilterPredicates::new().with_rating(3, true).unwrap();
        assert!(p.is_facet_active(Facet::Rating));

        let p = p.toggling_rating(3).unwrap();
        assert!(p.min_ratings().is_empty());
        assert!(p.is_default());
    }

    #[test]
    fn test_rating_out_of_range() {
        assert!(matches!(
            FilterPredicates::new().with_rating(0, true),
            Err(FacetError::InvalidRatingThreshold(0))
        ));
        assert!(FilterPredicates::new().with_rating(6, true).is_err());
    }

    #[test]
    fn test_brand_toggle() {
        let p = FilterPredicates::new().toggling_brand("Acme");
        assert!(p.brands().contains("Acme"));
        let p = p.toggling_brand("Acme");
        assert!(p.brands().is_empty());
    }

    #[test]
    fn test_sort_is_not_a_facet() {
        let p = FilterPredicates::new().with_sort(SortKey::PriceDesc);
        assert!(!p.has_active_facets());
        assert!(!p.is_default());
    }
}
