//! Facet summaries for the filter sidebar.

use serde::Serialize;

use crate::catalog::{PriceBounds, ProductIndex};
use crate::config::FacetsConfig;
use crate::search::FilterPredicates;

/// A single facet value.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetValue {
    /// The value.
    pub value: String,
    /// Number of products with this value.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// One sidebar group of facet values.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetGroup {
    /// Display name (e.g., "Brand").
    pub name: String,
    /// Control key the values belong to.
    pub key: String,
    /// Values in display order.
    pub values: Vec<FacetValue>,
}

impl FacetGroup {
    /// The first `limit` values and how many more are hidden.
    pub fn visible(&self, limit: usize) -> (&[FacetValue], usize) {
        let shown = self.values.len().min(limit);
        (&self.values[..shown], self.values.len() - shown)
    }

    /// Values whose text contains `term`, ignoring case.
    ///
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&FacetValue> {
        let term = term.trim().to_lowercase();
        self.values
            .iter()
            .filter(|v| v.value.to_lowercase().contains(&term))
            .collect()
    }
}

/// Sidebar facets computed from the whole collection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetSummary {
    /// Brands with product counts, most common first.
    pub brands: FacetGroup,
    /// Products at or above each configured rating threshold.
    pub ratings: FacetGroup,
    /// Whole-number price hints, `None` for an empty collection.
    pub price: Option<PriceBounds>,
}

impl FacetSummary {
    /// Build the summary, marking values selected in `predicates`.
    pub fn build(index: &ProductIndex, predicates: &FilterPredicates, config: &FacetsConfig) -> Self {
        let brands = index
            .brand_counts()
            .into_iter()
            .map(|(value, count)| FacetValue {
                selected: predicates.brands().contains(&value),
                value,
                count,
            })
            .collect();

        let ratings = config
            .rating_thresholds
            .iter()
            .map(|threshold| FacetValue {
                value: threshold.to_string(),
                count: index
                    .iter()
                    .filter(|p| p.rating() >= f64::from(*threshold))
                    .count(),
                selected: predicates.min_ratings().contains(threshold),
            })
            .collect();

        Self {
            brands: FacetGroup {
                name: "Brand".to_string(),
                key: "brand".to_string(),
                values: brands,
            },
            ratings: FacetGroup {
                name: "Customer Rating".to_string(),
                key: "rating".to_string(),
                values: ratings,
            },
            price: index.price_bounds(),
        }
    }
}
