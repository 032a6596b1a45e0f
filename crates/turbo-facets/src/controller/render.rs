//! Seams between the controller and the page it drives.

use crate::ids::ProductId;
use crate::search::FilterPredicates;
use crate::view::ViewMode;

/// Rendering target for the listing.
///
/// The controller owns all filter state; implementations only reflect
/// decisions onto the page and never report state back.
pub trait ListingView {
    /// Show or hide one product.
    fn set_product_visible(&mut self, id: &ProductId, visible: bool);

    /// Lay products out in the given order.
    fn reorder(&mut self, order: &[ProductId]);

    /// Update the "N products" readout.
    fn set_visible_count(&mut self, count: usize);

    /// Show or hide the "clear filters" control.
    fn set_clear_control_visible(&mut self, visible: bool);

    /// Switch between grid and list layout.
    fn set_view_mode(&mut self, mode: ViewMode);

    /// Return every filter control to its unselected state.
    fn reset_controls(&mut self);

    /// Show a selection restored from the URL in the price inputs and the
    /// sort select.
    fn show_selection(&mut self, predicates: &FilterPredicates);
}

/// The browser address bar.
pub trait AddressBar {
    /// Current path, without query string.
    fn path(&self) -> String;

    /// Current query string, with or without the leading `?`.
    fn query(&self) -> String;

    /// Replace the current history entry's URL.
    ///
    /// Must neither reload the page nor push a new history entry.
    fn replace_url(&mut self, url: &str);
}

/// An [`AddressBar`] kept in memory, for server rendering and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryLocation {
    path: String,
    query: String,
    history_len: usize,
    replacements: usize,
}

impl MemoryLocation {
    /// Start at a URL such as `/category/shoes?sort=newest`.
    pub fn new(url: &str) -> Self {
        let (path, query) = split_url(url);
        Self {
            path,
            query,
            history_len: 1,
            replacements: 0,
        }
    }

    /// Full current URL.
    pub fn url(&self) -> String {
        crate::search::url_state::build_url(&self.path, &self.query)
    }

    /// Number of history entries. Replacing never grows it.
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Number of times the URL was replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl AddressBar for MemoryLocation {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn query(&self) -> String {
        self.query.clone()
    }

    fn replace_url(&mut self, url: &str) {
        let (path, query) = split_url(url);
        self.path = path;
        self.query = query;
        self.replacements += 1;
    }
}

fn split_url(url: &str) -> (String, String) {
    match url.split_once('?') {
        Some((path, query)) => (path.to_string(), query.to_string()),
        None => (url.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_location_replace() {
        let mut location = MemoryLocation::new("/category/shoes?sort=newest");
        assert_eq!(location.path(), "/category/shoes");
        assert_eq!(location.query(), "sort=newest");

        location.replace_url("/category/shoes");
        assert_eq!(location.url(), "/category/shoes");
        assert_eq!(location.history_len(), 1);
        assert_eq!(location.replacements(), 1);
    }
}
