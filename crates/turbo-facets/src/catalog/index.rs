//! Read-only index over the rendered product collection.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::ProductAttributes;
use crate::ids::ProductId;
use crate::FacetError;

/// Whole-number price hints for the price inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBounds {
    /// Floor of the lowest price.
    pub min: f64,
    /// Ceiling of the highest price.
    pub max: f64,
}

/// The product collection in arrival (on-page) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductIndex {
    products: Vec<ProductAttributes>,
}

impl ProductIndex {
    /// Build an index from records in on-page order.
    pub fn new(products: impl IntoIterator<Item = ProductAttributes>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(ProductAttributes::sanitized)
                .collect(),
        }
    }

    /// Parse a JSON array of product records.
    pub fn from_json(json: &str) -> Result<Self, FacetError> {
        let products: Vec<ProductAttributes> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product at an on-page position.
    pub fn get(&self, position: usize) -> Option<&ProductAttributes> {
        self.products.get(position)
    }

    /// On-page position of a product.
    pub fn position(&self, id: &ProductId) -> Option<usize> {
        self.products.iter().position(|p| &p.id == id)
    }

    /// Iterate in on-page order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProductAttributes> {
        self.products.iter()
    }

    /// Lowest and highest price, rounded outward to whole numbers.
    ///
    /// Returns `None` for an empty collection.
    pub fn price_bounds(&self) -> Option<PriceBounds> {
        let mut prices = self.products.iter().map(|p| p.price);
        let first = prices.next()?;
        let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(PriceBounds {
            min: min.floor(),
            max: max.ceil(),
        })
    }

    /// Distinct non-empty brands with product counts.
    ///
    /// Sorted by count descending, then by name.
    pub fn brand_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for product in &self.products {
            let brand = product.brand.trim();
            if !brand.is_empty() {
                *counts.entry(brand).or_insert(0) += 1;
            }
        }

        let mut brands: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(brand, count)| (brand.to_string(), count))
            .collect();
        brands.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        brands
    }
}

impl<'a> IntoIterator for &'a ProductIndex {
    type Item = &'a ProductAttributes;
    type IntoIter = std::slice::Iter<'a, ProductAttributes>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
