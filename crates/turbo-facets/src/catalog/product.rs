//! Product attribute record.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// The filterable attributes of one listed product.
///
/// Sourced from whoever renders the listing; the facet engine never
/// mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    /// Product identifier.
    pub id: ProductId,
    /// Unit price. Never negative once inside a [`ProductIndex`](crate::catalog::ProductIndex).
    pub price: f64,
    /// Average rating in `[0, 5]`, absent when unrated.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Whether the product can be bought right now.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Brand name, empty when unknown.
    #[serde(default)]
    pub brand: String,
    /// Units sold, absent when the feed doesn't carry it.
    #[serde(default)]
    pub sold: Option<u64>,
}

fn default_in_stock() -> bool {
    true
}

impl ProductAttributes {
    /// Create an in-stock, unrated, unbranded product.
    pub fn new(id: impl Into<ProductId>, price: f64) -> Self {
        Self {
            id: id.into(),
            price,
            rating: None,
            in_stock: true,
            brand: String::new(),
            sold: None,
        }
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set stock availability.
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Set the sold count.
    pub fn with_sold(mut self, sold: u64) -> Self {
        self.sold = Some(sold);
        self
    }

    /// Effective rating: absent or unusable ratings count as 0.
    pub fn rating(&self) -> f64 {
        match self.rating {
            Some(r) if r.is_finite() => r.clamp(0.0, MAX_RATING),
            _ => 0.0,
        }
    }

    /// Effective sold count: absent counts as 0.
    pub fn sold(&self) -> u64 {
        self.sold.unwrap_or(0)
    }

    /// Copy with the price forced into the valid domain.
    pub(crate) fn sanitized(mut self) -> Self {
        if !self.price.is_finite() || self.price < 0.0 {
            tracing::debug!(id = %self.id, price = self.price, "invalid product price, using 0");
            self.price = 0.0;
        }
        self
    }
}
