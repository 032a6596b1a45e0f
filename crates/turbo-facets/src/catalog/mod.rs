//! Listing catalog module.
//!
//! Contains the product attribute record and the read-only index over the
//! rendered product collection.

mod index;
mod product;

pub use index::{PriceBounds, ProductIndex};
pub use product::ProductAttributes;
