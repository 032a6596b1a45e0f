//! Shared fixtures for controller tests.

#![allow(dead_code)]

use std::collections::HashMap;

use turbo_cache::{Cache, MemoryStore};
use turbo_facets::prelude::*;

/// Records what the controller rendered.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub hidden: HashMap<ProductId, bool>,
    pub order: Vec<ProductId>,
    pub count: Option<usize>,
    pub clear_visible: bool,
    pub mode: Option<ViewMode>,
    pub resets: usize,
    pub reorders: usize,
    pub shown_price: Option<PriceRange>,
    pub shown_sort: Option<SortKey>,
}

impl RecordingView {
    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.get(&ProductId::new(id)).copied().unwrap_or(false)
    }
}

impl ListingView for RecordingView {
    fn set_product_visible(&mut self, id: &ProductId, visible: bool) {
        self.hidden.insert(id.clone(), !visible);
    }

    fn reorder(&mut self, order: &[ProductId]) {
        self.order = order.to_vec();
        self.reorders += 1;
    }

    fn set_visible_count(&mut self, count: usize) {
        self.count = Some(count);
    }

    fn set_clear_control_visible(&mut self, visible: bool) {
        self.clear_visible = visible;
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = Some(mode);
    }

    fn reset_controls(&mut self) {
        self.resets += 1;
    }

    fn show_selection(&mut self, predicates: &FilterPredicates) {
        self.shown_price = Some(predicates.price_range());
        self.shown_sort = Some(predicates.sort());
    }
}

pub type TestController = FilterController<RecordingView, MemoryLocation>;

/// The two-product listing used throughout the scenarios.
pub fn two_products() -> ProductIndex {
    ProductIndex::new(vec![
        ProductAttributes::new("1", 10.0)
            .with_rating(4.0)
            .with_brand("A")
            .with_stock(true),
        ProductAttributes::new("2", 50.0)
            .with_rating(2.0)
            .with_brand("B")
            .with_stock(false),
    ])
}

pub fn controller_at(url: &str, store: MemoryStore) -> TestController {
    let config = FacetsConfig::default();
    let preferences = ViewPreferenceStore::new(Cache::with_store(store), &config);
    FilterController::new(
        config,
        Some(RecordingView::default()),
        MemoryLocation::new(url),
        preferences,
    )
}

pub fn ready_controller() -> TestController {
    let mut controller = controller_at("/category/shoes", MemoryStore::new());
    controller.on_products_ready(two_products());
    controller
}

pub fn ids(list: &[ProductId]) -> Vec<&str> {
    list.iter().map(ProductId::as_str).collect()
}
