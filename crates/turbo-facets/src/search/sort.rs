//! Sort keys and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{ProductAttributes, ProductIndex};
use crate::FacetError;

/// Sort options for the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Keep the current on-page order.
    #[default]
    None,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    RatingDesc,
    /// Sort by newest first (highest numeric id).
    Newest,
    /// Sort by best selling.
    Bestseller,
}

impl SortKey {
    /// Every key, in the order the sort select lists them.
    pub const ALL: [SortKey; 6] = [
        SortKey::None,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
        SortKey::Newest,
        SortKey::Bestseller,
    ];

    /// Value used by the sort select and the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::Newest => "newest",
            SortKey::Bestseller => "bestseller",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::None => "Featured",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Highest Rated",
            SortKey::Newest => "Newest",
            SortKey::Bestseller => "Best Selling",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "none" => Ok(SortKey::None),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            // Older listing templates post plain "rating"
            "rating-desc" | "rating" => Ok(SortKey::RatingDesc),
            "newest" => Ok(SortKey::Newest),
            "bestseller" => Ok(SortKey::Bestseller),
            other => Err(FacetError::UnknownSortKey(other.to_string())),
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compare two products under a sort key.
///
/// `Ordering::Equal` means "keep current relative order".
pub fn compare(a: &ProductAttributes, b: &ProductAttributes, key: SortKey) -> Ordering {
    match key {
        SortKey::None => Ordering::Equal,
        SortKey::PriceAsc => cmp_f64(a.price, b.price),
        SortKey::PriceDesc => cmp_f64(b.price, a.price),
        SortKey::RatingDesc => cmp_f64(b.rating(), a.rating()),
        SortKey::Newest => b.id.numeric().cmp(&a.id.numeric()),
        SortKey::Bestseller => b.sold().cmp(&a.sold()),
    }
}

/// Reorder a slice of products. Stable: ties keep their order.
pub fn sort_products(products: &mut [ProductAttributes], key: SortKey) {
    if key == SortKey::None {
        return;
    }
    products.sort_by(|a, b| compare(a, b, key));
}

/// Reorder on-page positions into `index`. Stable: ties keep their order.
///
/// Positions missing from the index sort last.
pub fn sort_positions(index: &ProductIndex, positions: &mut [usize], key: SortKey) {
    if key == SortKey::None {
        return;
    }
    positions.sort_by(|a, b| match (index.get(*a), index.get(*b)) {
        (Some(pa), Some(pb)) => compare(pa, pb, key),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[ProductAttributes]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_parse_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_display_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            SortKey::ALL.iter().map(SortKey::display_name).collect();
        assert_eq!(names.len(), SortKey::ALL.len());
        assert_eq!(SortKey::PriceAsc.display_name(), "Price: Low to High");
    }

    #[test]
    fn test_parse_rating_alias_and_unknown() {
        assert_eq!("rating".parse::<SortKey>().unwrap(), SortKey::RatingDesc);
        assert!(matches!(
            "cheapest".parse::<SortKey>(),
            Err(FacetError::UnknownSortKey(_))
        ));
    }

    #[test]
    fn test_price_desc_then_repeat_is_noop() {
        let mut products = vec![
            ProductAttributes::new("1", 10.0),
            ProductAttributes::new("2", 50.0),
        ];
        sort_products(&mut products, SortKey::PriceDesc);
        assert_eq!(ids(&products), vec!["2", "1"]);

        sort_products(&mut products, SortKey::PriceDesc);
        assert_eq!(ids(&products), vec!["2", "1"]);
    }

    #[test]
    fn test_price_asc_is_stable() {
        let mut products = vec![
            ProductAttributes::new("a", 20.0),
            ProductAttributes::new("b", 10.0),
            ProductAttributes::new("c", 20.0),
            ProductAttributes::new("d", 10.0),
        ];
        sort_products(&mut products, SortKey::PriceAsc);
        assert_eq!(ids(&products), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_rating_desc_missing_is_zero() {
        let mut products = vec![
            ProductAttributes::new("1", 1.0),
            ProductAttributes::new("2", 1.0).with_rating(3.5),
            ProductAttributes::new("3", 1.0).with_rating(0.0),
        ];
        sort_products(&mut products, SortKey::RatingDesc);
        assert_eq!(ids(&products), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_newest_by_numeric_id() {
        let mut products = vec![
            ProductAttributes::new("9", 1.0),
            ProductAttributes::new("100", 1.0),
            ProductAttributes::new("x", 1.0),
        ];
        sort_products(&mut products, SortKey::Newest);
        assert_eq!(ids(&products), vec!["100", "9", "x"]);
    }

    #[test]
    fn test_bestseller_missing_is_zero() {
        let mut products = vec![
            ProductAttributes::new("1", 1.0),
            ProductAttributes::new("2", 1.0).with_sold(5),
            ProductAttributes::new("3", 1.0).with_sold(12),
        ];
        sort_products(&mut products, SortKey::Bestseller);
        assert_eq!(ids(&products), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_none_keeps_order() {
        let mut products = vec![
            ProductAttributes::new("1", 30.0),
            ProductAttributes::new("2", 10.0),
        ];
        sort_products(&mut products, SortKey::None);
        assert_eq!(ids(&products), vec!["1", "2"]);
    }

    #[test]
    fn test_sort_positions() {
        let index = ProductIndex::new(vec![
            ProductAttributes::new("1", 30.0),
            ProductAttributes::new("2", 10.0),
            ProductAttributes::new("3", 20.0),
        ]);
        let mut positions = vec![0, 1, 2];
        sort_positions(&index, &mut positions, SortKey::PriceAsc);
        assert_eq!(positions, vec![1, 2, 0]);
    }
}
