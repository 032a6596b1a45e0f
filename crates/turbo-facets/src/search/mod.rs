//! Faceted filtering module.
//!
//! Contains the predicate set, the pure evaluator, sort ordering, facet
//! summaries and the address-bar codec.

mod evaluate;
mod facets;
mod predicate;
mod sort;
pub mod url_state;

pub use evaluate::{facet_accepts, matches, rejected_by};
pub use facets::{FacetGroup, FacetSummary, FacetValue};
pub use predicate::{Facet, FilterPredicates, PriceRange, RATING_THRESHOLDS};
pub use sort::{compare, sort_positions, sort_products, SortKey};
pub use url_state::UrlState;
