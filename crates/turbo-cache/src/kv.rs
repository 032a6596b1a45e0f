//! Key-Value store abstraction and the cache handle built on it.

use crate::CacheError;

/// A string-keyed store of string values.
///
/// Implementations decide durability: [`MemoryStore`](crate::MemoryStore)
/// lives as long as the process, `LocalStore` survives browser sessions.
pub trait KvStore {
    /// Read a value, `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Check if a key is present.
    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Cache handle over a [`KvStore`] backend.
pub struct Cache {
    store: Box<dyn KvStore>,
}

impl Cache {
    /// Wrap an explicit backend.
    ///
    /// # Example
    ///
    /// ```rust
    /// use turbo_cache::{Cache, MemoryStore};
    ///
    /// let cache = Cache::with_store(MemoryStore::new());
    /// ```
    pub fn with_store(store: impl KvStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Open the default durable store for the current target.
    ///
    /// In the browser this is `window.localStorage`.
    #[cfg(target_arch = "wasm32")]
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::with_store(crate::LocalStore::open()?))
    }

    /// Open the default store for the current target.
    ///
    /// Native builds have no browser storage, so this is a fresh in-memory store.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_default() -> Result<Self, CacheError> {
        Ok(Self::with_store(crate::MemoryStore::new()))
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache.
    pub fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        tracing::trace!(key, "cache set");
        self.store.set(key, value)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        tracing::trace!(key, "cache delete");
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}
