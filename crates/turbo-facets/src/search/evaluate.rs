//! Pure visibility decisions.

use crate::catalog::ProductAttributes;
use crate::search::{Facet, FilterPredicates};

/// Check whether one facet lets a product through.
///
/// Inactive facets accept everything. Rating thresholds combine with OR:
/// reaching any selected threshold is enough.
pub fn facet_accepts(facet: Facet, product: &ProductAttributes, predicates: &FilterPredicates) -> bool {
    match facet {
        Facet::Price => predicates.price_range().contains(product.price),
        Facet::Stock => !predicates.in_stock_only() || product.in_stock,
        Facet::Rating => {
            let thresholds = predicates.min_ratings();
            if thresholds.is_empty() {
                return true;
            }
            let rating = product.rating();
            thresholds.iter().any(|t| rating >= f64::from(*t))
        }
        Facet::Brand => {
            let brands = predicates.brands();
            brands.is_empty() || brands.contains(product.brand.as_str())
        }
    }
}

/// Decide whether a product is visible under a predicate set.
///
/// AND across facets; numeric checks run before set lookups.
pub fn matches(product: &ProductAttributes, predicates: &FilterPredicates) -> bool {
    Facet::ALL
        .iter()
        .all(|facet| facet_accepts(*facet, product, predicates))
}

/// Facets that reject a product, in evaluation order.
pub fn rejected_by(product: &ProductAttributes, predicates: &FilterPredicates) -> Vec<Facet> {
    Facet::ALL
        .iter()
        .copied()
        .filter(|facet| !facet_accepts(*facet, product, predicates))
        .collect()
}
