//! Filter controller.
//!
//! Receives control events, derives a new predicate set, and pushes the
//! resulting visibility, order, count and URL onto the page. The page is
//! only ever a rendering target: filter state lives here.

mod events;
mod render;

pub use events::{ControlEvent, ControlId, ControlInput};
pub use render::{AddressBar, ListingView, MemoryLocation};

use tracing::{debug, info, warn};

use crate::catalog::ProductIndex;
use crate::config::FacetsConfig;
use crate::ids::ProductId;
use crate::search::url_state::{self, UrlState};
use crate::search::{self, FacetSummary, FilterPredicates, PriceRange, SortKey};
use crate::view::{ViewMode, ViewPreferenceStore};

/// Whether the listing is narrowed by any facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListingState {
    /// No facet has been applied since load or the last clear.
    #[default]
    Idle,
    /// At least one facet has been applied. Only `clear_all` leaves this state.
    Filtered,
}

impl ListingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingState::Idle => "idle",
            ListingState::Filtered => "filtered",
        }
    }
}

/// Orchestrates filtering, sorting and URL sync for one listing page.
pub struct FilterController<V, A> {
    config: FacetsConfig,
    predicates: FilterPredicates,
    state: ListingState,
    index: Option<ProductIndex>,
    /// On-page positions in display order.
    order: Vec<usize>,
    /// Visibility by on-page position.
    visible: Vec<bool>,
    view: Option<V>,
    location: A,
    preferences: ViewPreferenceStore,
}

impl<V: ListingView, A: AddressBar> FilterController<V, A> {
    /// Mount on a page.
    ///
    /// `view` is `None` when the listing container isn't on the page; the
    /// controller then keeps state but renders nothing. The predicate set is
    /// hydrated from the current URL and shown in the controls, and the
    /// stored view mode is applied.
    /// Products arrive later through [`on_products_ready`](Self::on_products_ready).
    pub fn new(
        config: FacetsConfig,
        view: Option<V>,
        location: A,
        preferences: ViewPreferenceStore,
    ) -> Self {
        let url_state = UrlState::decode(&location.query());
        let predicates = url_state.apply_to(FilterPredicates::new());
        let state = if predicates.has_active_facets() {
            ListingState::Filtered
        } else {
            ListingState::Idle
        };

        let mut controller = Self {
            config,
            predicates,
            state,
            index: None,
            order: Vec::new(),
            visible: Vec::new(),
            view,
            location,
            preferences,
        };

        let mode = controller.preferences.get();
        if let Some(view) = controller.view.as_mut() {
            view.set_view_mode(mode);
            if !url_state.is_empty() {
                view.show_selection(&controller.predicates);
            }
        }
        debug!(query = %controller.location.query(), state = controller.state.as_str(), "filter controller mounted");
        controller
    }

    /// Accept the product collection once it is rendered.
    ///
    /// May be called again when the collection is replaced; the current
    /// predicate set is re-applied to the new products.
    pub fn on_products_ready(&mut self, index: ProductIndex) {
        info!(products = index.len(), "products ready");
        self.order = (0..index.len()).collect();
        self.visible = vec![true; index.len()];
        self.index = Some(index);

        if !self.predicates.is_default() {
            self.sort_pass();
            self.apply_all_filters();
        }
    }

    /// Apply a control event.
    pub fn dispatch(&mut self, event: ControlEvent) {
        debug!(control = %event.control(), "dispatch");
        match event {
            ControlEvent::PriceApplied(range) => self.set_price_range(range),
            ControlEvent::RatingChanged {
                threshold,
                selected,
            } => self.set_rating(threshold, selected),
            ControlEvent::BrandChanged { brand, selected } => self.set_brand(brand, selected),
            ControlEvent::StockChanged(in_stock_only) => self.set_stock_only(in_stock_only),
            ControlEvent::SortChanged(key) => self.set_sort(key),
            ControlEvent::ViewSelected(mode) => self.set_view_mode(mode),
            ControlEvent::ClearRequested => self.clear_all(),
        }
    }

    /// Parse and apply a raw control event. Unknown or malformed input is ignored.
    pub fn handle_control(&mut self, id: &str, input: &ControlInput) {
        if let Some(event) = ControlEvent::from_control(id, input) {
            self.dispatch(event);
        }
    }

    /// Replace the price range.
    pub fn set_price_range(&mut self, range: PriceRange) {
        let next = self.predicates.clone().with_price_range(range);
        self.update(next);
        self.sync_url();
    }

    /// Select or deselect a rating threshold. Thresholds outside 1..=5 are ignored.
    pub fn set_rating(&mut self, threshold: u8, selected: bool) {
        match self.predicates.clone().with_rating(threshold, selected) {
            Ok(next) => self.update(next),
            Err(e) => debug!(error = %e, "ignoring rating change"),
        }
    }

    /// Flip a rating threshold. Thresholds outside 1..=5 are ignored.
    pub fn toggle_rating(&mut self, threshold: u8) {
        let selected = !self.predicates.min_ratings().contains(&threshold);
        self.set_rating(threshold, selected);
    }

    /// Select or deselect a brand.
    pub fn set_brand(&mut self, brand: impl Into<String>, selected: bool) {
        let next = self.predicates.clone().with_brand(brand, selected);
        self.update(next);
    }

    /// Flip a brand's selection.
    pub fn toggle_brand(&mut self, brand: impl Into<String>) {
        let next = self.predicates.clone().toggling_brand(brand);
        self.update(next);
    }

    /// Restrict to in-stock products or lift the restriction.
    pub fn set_stock_only(&mut self, in_stock_only: bool) {
        let next = self.predicates.clone().with_stock_only(in_stock_only);
        self.update(next);
    }

    /// Change the sort key and reorder. Visibility is unaffected.
    pub fn set_sort(&mut self, key: SortKey) {
        self.predicates = self.predicates.clone().with_sort(key);
        self.sort_pass();
        self.apply_all_filters();
        self.sync_url();
    }

    /// Store and apply a view mode.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if let Err(e) = self.preferences.set(mode) {
            warn!(error = %e, mode = mode.as_str(), "failed to persist view mode");
        }
        if let Some(view) = self.view.as_mut() {
            view.set_view_mode(mode);
        }
    }

    /// Reset every facet and the sort key, show every product, and drop
    /// the filter parameters from the URL.
    ///
    /// The current on-page order is kept.
    pub fn clear_all(&mut self) {
        self.predicates = FilterPredicates::new();
        self.state = ListingState::Idle;
        self.visible.iter_mut().for_each(|v| *v = true);

        let count = self.visible_count();
        if let Some(view) = self.view.as_mut() {
            view.reset_controls();
            if let Some(index) = self.index.as_ref() {
                for product in index {
                    view.set_product_visible(&product.id, true);
                }
            }
            view.set_visible_count(count);
            view.set_clear_control_visible(false);
        }

        info!(visible = count, "filters cleared");
        self.sync_url();
    }

    /// Run one visibility pass and return the number of visible products.
    ///
    /// Idempotent: repeating it without a predicate change yields the same
    /// visible set and count. A no-op before products arrive.
    pub fn apply_all_filters(&mut self) -> usize {
        let Some(index) = self.index.as_ref() else {
            debug!("no products yet, skipping visibility pass");
            return 0;
        };

        let mut count = 0;
        for (position, product) in index.iter().enumerate() {
            let shown = search::matches(product, &self.predicates);
            self.visible[position] = shown;
            if shown {
                count += 1;
            }
            if let Some(view) = self.view.as_mut() {
                view.set_product_visible(&product.id, shown);
            }
        }

        let clear_visible = !self.predicates.is_default();
        if let Some(view) = self.view.as_mut() {
            view.set_visible_count(count);
            view.set_clear_control_visible(clear_visible);
        }

        debug!(visible = count, total = index.len(), "visibility pass");
        count
    }

    /// Current predicate set.
    pub fn predicates(&self) -> &FilterPredicates {
        &self.predicates
    }

    pub fn state(&self) -> ListingState {
        self.state
    }

    /// The product collection, once ready.
    pub fn index(&self) -> Option<&ProductIndex> {
        self.index.as_ref()
    }

    /// Number of visible products; 0 before products arrive.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Visible product ids in display order.
    pub fn visible_ids(&self) -> Vec<ProductId> {
        self.ids_in_order(|position| self.visible[position])
    }

    /// All product ids in display order.
    pub fn display_order(&self) -> Vec<ProductId> {
        self.ids_in_order(|_| true)
    }

    /// Sidebar facets for the current collection and selection.
    pub fn facet_summary(&self) -> Option<FacetSummary> {
        self.index
            .as_ref()
            .map(|index| FacetSummary::build(index, &self.predicates, &self.config))
    }

    /// Stored view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.preferences.get()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn location(&self) -> &A {
        &self.location
    }

    fn update(&mut self, next: FilterPredicates) {
        if next.has_active_facets() {
            self.state = ListingState::Filtered;
        }
        self.predicates = next;
        self.apply_all_filters();
    }

    fn sort_pass(&mut self) {
        let key = self.predicates.sort();
        let Some(index) = self.index.as_ref() else {
            return;
        };
        if key == SortKey::None {
            return;
        }

        search::sort_positions(index, &mut self.order, key);
        let ids: Vec<ProductId> = self
            .order
            .iter()
            .filter_map(|position| index.get(*position))
            .map(|product| product.id.clone())
            .collect();
        if let Some(view) = self.view.as_mut() {
            view.reorder(&ids);
        }
        debug!(sort = key.as_str(), "sort pass");
    }

    fn sync_url(&mut self) {
        let query = url_state::encode(&self.predicates);
        let url = url_state::build_url(&self.location.path(), &query);
        debug!(%url, "replacing address bar state");
        self.location.replace_url(&url);
    }

    fn ids_in_order(&self, keep: impl Fn(usize) -> bool) -> Vec<ProductId> {
        let Some(index) = self.index.as_ref() else {
            return Vec::new();
        };
        self.order
            .iter()
            .copied()
            .filter(|position| keep(*position))
            .filter_map(|position| index.get(position))
            .map(|product| product.id.clone())
            .collect()
    }
}

impl<V, A> std::fmt::Debug for FilterController<V, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterController")
            .field("predicates", &self.predicates)
            .field("state", &self.state)
            .field("products", &self.index.as_ref().map(ProductIndex::len))
            .finish_non_exhaustive()
    }
}
