//! DOM-backed rendering target and address bar.
//!
//! Listing markup contract:
//!
//! - `.s-products-list` holds the `.s-products-list-item` elements
//! - each item carries `data-product-id`, `data-product-price` and optionally
//!   `data-product-rating`, `data-product-brand`, `data-product-sold`
//! - an item is out of stock when it contains `.out-of-stock` or
//!   `[data-out-of-stock='true']`
//! - the count readout is `.products-count span span`
//! - every filter control carries `data-control` with a [`ControlId`] name;
//!   the price inputs are `.price-from` and `.price-to`

use std::cell::RefCell;
use std::rc::Rc;

use turbo_cache::Cache;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, MutationObserver,
    MutationObserverInit, Window,
};

use crate::catalog::{ProductAttributes, ProductIndex};
use crate::controller::{AddressBar, ControlId, ControlInput, FilterController, ListingView};
use crate::ids::ProductId;
use crate::search::{FilterPredicates, SortKey};
use crate::view::{ViewMode, ViewPreferenceStore};
use crate::FacetsConfig;

/// A controller mounted on the live page, shared with its event handlers.
pub type PageController = Rc<RefCell<FilterController<DomListing, BrowserLocation>>>;

const LIST_SELECTOR: &str = ".s-products-list";
const ITEM_SELECTOR: &str = ".s-products-list-item";
const COUNT_SELECTOR: &str = ".products-count span span";
const CLEAR_SELECTOR: &str = ".clear-filters";
const CHECKBOX_SELECTOR: &str = ".filters-container input[type=\"checkbox\"]";
const NUMBER_SELECTOR: &str = ".filters-container input[type=\"number\"]";
const SORT_SELECTOR: &str = ".sort-products";
const PRICE_FROM_SELECTOR: &str = ".price-from";
const PRICE_TO_SELECTOR: &str = ".price-to";
const CONTROL_SELECTOR: &str = "[data-control]";
const LIST_VIEW_CLASS: &str = "list-view";

/// The rendered listing.
pub struct DomListing {
    document: Document,
    container: Element,
}

impl DomListing {
    /// Locate the listing container. `None` on pages without one.
    pub fn find(document: &Document) -> Option<Self> {
        let container = query(document, LIST_SELECTOR)?;
        Some(Self {
            document: document.clone(),
            container,
        })
    }

    fn item(&self, id: &ProductId) -> Option<Element> {
        if id.as_str().contains(['"', '\\']) {
            return None;
        }
        let selector = format!("{}[data-product-id=\"{}\"]", ITEM_SELECTOR, id);
        self.container.query_selector(&selector).ok().flatten()
    }

    fn input(&self, selector: &str) -> Option<HtmlInputElement> {
        query(&self.document, selector).and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    fn sort_select(&self) -> Option<HtmlSelectElement> {
        query(&self.document, SORT_SELECTOR).and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    }

    /// Give an empty sort select one option per sort key.
    fn fill_sort_options(&self) {
        let Some(select) = self.sort_select() else {
            return;
        };
        if select.length() > 0 {
            return;
        }
        for key in SortKey::ALL {
            let Ok(option) = self.document.create_element("option") else {
                continue;
            };
            log_js_error("sort option", option.set_attribute("value", key.as_str()));
            option.set_text_content(Some(key.display_name()));
            log_js_error("sort option", select.append_child(&option).map(|_| ()));
        }
    }

    fn toggle_class(&self, selector: &str, class: &str, on: bool) {
        if let Some(el) = query(&self.document, selector) {
            log_js_error(
                "toggle class",
                el.class_list().toggle_with_force(class, on).map(|_| ()),
            );
        }
    }
}

impl ListingView for DomListing {
    fn set_product_visible(&mut self, id: &ProductId, visible: bool) {
        let Some(item) = self.item(id).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
            return;
        };
        let style = item.style();
        if visible {
            log_js_error("show product", style.remove_property("display").map(|_| ()));
        } else {
            log_js_error("hide product", style.set_property("display", "none"));
        }
    }

    fn reorder(&mut self, order: &[ProductId]) {
        for id in order {
            if let Some(item) = self.item(id) {
                log_js_error("reorder", self.container.append_child(&item).map(|_| ()));
            }
        }
    }

    fn set_visible_count(&mut self, count: usize) {
        if let Some(el) = query(&self.document, COUNT_SELECTOR) {
            el.set_text_content(Some(&count.to_string()));
        }
    }

    fn set_clear_control_visible(&mut self, visible: bool) {
        self.toggle_class(CLEAR_SELECTOR, "hidden", !visible);
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        let list = mode == ViewMode::List;
        log_js_error(
            "view mode",
            self.container
                .class_list()
                .toggle_with_force(LIST_VIEW_CLASS, list)
                .map(|_| ()),
        );
        self.toggle_class(".view-grid", "active", !list);
        self.toggle_class(".view-list", "active", list);
    }

    fn reset_controls(&mut self) {
        for el in query_all(&self.document, CHECKBOX_SELECTOR) {
            if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                input.set_checked(false);
            }
        }
        for el in query_all(&self.document, NUMBER_SELECTOR) {
            if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                input.set_value("");
            }
        }
        if let Some(select) = self.sort_select() {
            select.set_value("");
        }
    }

    fn show_selection(&mut self, predicates: &FilterPredicates) {
        let (from, to) = predicates.price_range().input_text();
        if let Some(input) = self.input(PRICE_FROM_SELECTOR) {
            input.set_value(&from);
        }
        if let Some(input) = self.input(PRICE_TO_SELECTOR) {
            input.set_value(&to);
        }
        if let Some(select) = self.sort_select() {
            select.set_value(predicates.sort().as_str());
        }
    }
}

/// The window's location and history.
pub struct BrowserLocation {
    window: Window,
}

impl BrowserLocation {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl AddressBar for BrowserLocation {
    fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn query(&self) -> String {
        self.window.location().search().unwrap_or_default()
    }

    fn replace_url(&mut self, url: &str) {
        match self.window.history() {
            Ok(history) => log_js_error(
                "replace history state",
                history.replace_state_with_url(&JsValue::NULL, "", Some(url)),
            ),
            Err(e) => tracing::warn!(error = ?e, "history unavailable"),
        }
    }
}

/// Read product records from the rendered listing items, in page order.
///
/// Items without a `data-product-id` are skipped.
pub fn read_products(document: &Document) -> ProductIndex {
    let products = query_all(document, ITEM_SELECTOR)
        .into_iter()
        .filter_map(|item| {
            let Some(id) = item.get_attribute("data-product-id") else {
                tracing::debug!("listing item without data-product-id");
                return None;
            };

            let number = |name: &str| {
                item.get_attribute(name)
                    .and_then(|raw| raw.trim().parse::<f64>().ok())
            };
            let brand = item
                .get_attribute("data-product-brand")
                .or_else(|| {
                    item.query_selector(".product-brand")
                        .ok()
                        .flatten()
                        .and_then(|el| el.text_content())
                })
                .map(|b| b.trim().to_string())
                .unwrap_or_default();
            let out_of_stock = [".out-of-stock", "[data-out-of-stock='true']"]
                .iter()
                .any(|selector| matches!(item.query_selector(selector), Ok(Some(_))));

            let mut product = ProductAttributes::new(id, number("data-product-price").unwrap_or(0.0))
                .with_brand(brand)
                .with_stock(!out_of_stock);
            product.rating = number("data-product-rating");
            product.sold = item
                .get_attribute("data-product-sold")
                .and_then(|raw| raw.trim().parse::<u64>().ok());
            Some(product)
        })
        .collect::<Vec<_>>();

    ProductIndex::new(products)
}

/// Mount the facet controller on the current page.
///
/// Returns `None` off listing pages or outside a browser window. Control
/// events are delegated from the document to the controller. When the
/// listing items are already rendered they are read immediately; otherwise
/// they are read as soon as they appear.
pub fn mount(config: FacetsConfig) -> Option<PageController> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let listing = DomListing::find(&document);
    if let Some(listing) = listing.as_ref() {
        listing.fill_sort_options();
    }
    let location = BrowserLocation::new(window);

    if !config.is_listing_page(&location.path(), listing.is_some()) {
        return None;
    }

    let cache = match Cache::open_default() {
        Ok(cache) => cache,
        Err(e) => {
            tracing::warn!(error = %e, "local storage unavailable, view mode won't persist");
            Cache::with_store(turbo_cache::MemoryStore::new())
        }
    };
    let preferences = ViewPreferenceStore::new(cache, &config);
    let controller = Rc::new(RefCell::new(FilterController::new(
        config, listing, location, preferences,
    )));

    listen_for_controls(&document, &controller);
    if query(&document, ITEM_SELECTOR).is_some() {
        controller.borrow_mut().on_products_ready(read_products(&document));
    } else {
        wait_for_products(&document, &controller);
    }
    Some(controller)
}

/// Route `change` and `click` events from any `[data-control]` element.
///
/// Form fields answer on `change`, buttons and links on `click`. The
/// listeners live as long as the page.
fn listen_for_controls(document: &Document, controller: &PageController) {
    let handler_doc = document.clone();
    let controller = Rc::clone(controller);
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(control) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(CONTROL_SELECTOR).ok().flatten())
        else {
            return;
        };
        let Some(id) = control.get_attribute("data-control") else {
            return;
        };

        let is_field = control.is_instance_of::<HtmlInputElement>()
            || control.is_instance_of::<HtmlSelectElement>();
        let wants_change = is_field && id != ControlId::PriceApply.as_str();
        if wants_change != (event.type_() == "change") {
            return;
        }
        if !wants_change {
            event.prevent_default();
        }

        let input = control_input(&handler_doc, &id, &control);
        match controller.try_borrow_mut() {
            Ok(mut controller) => controller.handle_control(&id, &input),
            Err(_) => tracing::warn!(control = %id, "controller busy, dropping event"),
        }
    });

    for kind in ["change", "click"] {
        log_js_error(
            "add control listener",
            document.add_event_listener_with_callback(kind, handler.as_ref().unchecked_ref()),
        );
    }
    handler.forget();
}

/// Read the raw input of the control that fired.
fn control_input(document: &Document, id: &str, control: &Element) -> ControlInput {
    if id == ControlId::PriceApply.as_str() {
        let text = |selector: &str| {
            query(document, selector)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default()
        };
        return ControlInput::price(text(PRICE_FROM_SELECTOR), text(PRICE_TO_SELECTOR));
    }
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        return ControlInput::checkbox(input.value(), input.checked());
    }
    if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        return ControlInput::value(select.value());
    }
    ControlInput::value(control.get_attribute("value").unwrap_or_default())
}

/// Hand the products to the controller once the first listing item appears.
fn wait_for_products(document: &Document, controller: &PageController) {
    let handler_doc = document.clone();
    let controller = Rc::clone(controller);
    let callback = Closure::<dyn FnMut(JsValue, MutationObserver)>::new(
        move |_records: JsValue, observer: MutationObserver| {
            if query(&handler_doc, ITEM_SELECTOR).is_none() {
                return;
            }
            observer.disconnect();
            let Ok(mut controller) = controller.try_borrow_mut() else {
                tracing::warn!("controller busy, products not handed over");
                return;
            };
            if controller.index().is_none() {
                controller.on_products_ready(read_products(&handler_doc));
            }
        },
    );

    let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(e) => {
            tracing::warn!(error = ?e, "can't watch for products");
            return;
        }
    };
    let init = MutationObserverInit::new();
    init.set_child_list(true);
    init.set_subtree(true);
    log_js_error(
        "observe listing",
        observer.observe_with_options(document, &init),
    );
    callback.forget();
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn log_js_error(action: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!(action, error = ?e, "DOM update failed");
    }
}
