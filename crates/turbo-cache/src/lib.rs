//! Durable key-value layer for TurboCommerce storefront preferences.
//!
//! Provides a small string-keyed store that survives page loads. In the
//! browser it is backed by `window.localStorage`; native builds (tests,
//! server-side rendering) use an in-memory map.
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::with_store(MemoryStore::new());
//!
//! cache.set("products_view_mode", "list").unwrap();
//! assert_eq!(cache.get("products_view_mode").unwrap().as_deref(), Some("list"));
//!
//! cache.delete("products_view_mode").unwrap();
//! assert!(!cache.exists("products_view_mode").unwrap());
//! ```

mod error;
mod kv;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;

pub use error::CacheError;
pub use kv::{Cache, KvStore};
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvStore, MemoryStore};
}
