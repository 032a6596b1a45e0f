//! Client-side faceted filtering for TurboCommerce category listings.
//!
//! This crate decides which listed products are visible and in what order,
//! and keeps that decision in step with the address bar and the shopper's
//! stored layout preference:
//!
//! - **Catalog**: product attribute records and the read-only index over them
//! - **Search**: predicate set, pure evaluator, sort keys, facet summaries, URL codec
//! - **Controller**: event dispatch, visibility and sort passes, count readout
//! - **View**: grid/list preference persisted through `turbo-cache`
//!
//! Rendering stays with the page: the controller talks to it through the
//! [`ListingView`] and [`AddressBar`] traits. On `wasm32` the `browser`
//! module provides DOM-backed implementations.
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{Cache, MemoryStore};
//! use turbo_facets::prelude::*;
//!
//! struct NoView;
//! impl ListingView for NoView {
//!     fn set_product_visible(&mut self, _: &ProductId, _: bool) {}
//!     fn reorder(&mut self, _: &[ProductId]) {}
//!     fn set_visible_count(&mut self, _: usize) {}
//!     fn set_clear_control_visible(&mut self, _: bool) {}
//!     fn set_view_mode(&mut self, _: ViewMode) {}
//!     fn reset_controls(&mut self) {}
//!     fn show_selection(&mut self, _: &FilterPredicates) {}
//! }
//!
//! let config = FacetsConfig::default();
//! let preferences = ViewPreferenceStore::new(Cache::with_store(MemoryStore::new()), &config);
//! let location = MemoryLocation::new("/category/shoes");
//! let mut controller = FilterController::new(config, Some(NoView), location, preferences);
//!
//! controller.on_products_ready(ProductIndex::new(vec![
//!     ProductAttributes::new("1", 10.0).with_rating(4.0).with_brand("A"),
//!     ProductAttributes::new("2", 50.0).with_rating(2.0).with_brand("B").with_stock(false),
//! ]));
//!
//! controller.set_price_range(PriceRange::new(0.0, 20.0));
//! assert_eq!(controller.visible_count(), 1);
//! assert_eq!(controller.location().url(), "/category/shoes?max_price=20");
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod ids;
pub mod search;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use config::FacetsConfig;
pub use controller::{
    AddressBar, ControlEvent, ControlId, ControlInput, FilterController, ListingState,
    ListingView, MemoryLocation,
};
pub use error::FacetError;
pub use ids::ProductId;
pub use view::{ViewMode, ViewPreferenceStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::FacetError;
    pub use crate::ids::ProductId;
    pub use crate::FacetsConfig;

    // Catalog
    pub use crate::catalog::{PriceBounds, ProductAttributes, ProductIndex};

    // Search
    pub use crate::search::{
        Facet, FacetGroup, FacetSummary, FacetValue, FilterPredicates, PriceRange, SortKey,
        UrlState,
    };

    // Controller
    pub use crate::controller::{
        AddressBar, ControlEvent, ControlId, ControlInput, FilterController, ListingState,
        ListingView, MemoryLocation,
    };

    // View
    pub use crate::view::{ViewMode, ViewPreferenceStore};
}
