//! Browser `localStorage` store.

use crate::{CacheError, KvStore};

/// A [`KvStore`] backed by `window.localStorage`.
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// Open the window's local storage.
    ///
    /// Fails when there is no window or the browser denies storage access.
    pub fn open() -> Result<Self, CacheError> {
        let window =
            web_sys::window().ok_or_else(|| CacheError::OpenError("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::Unavailable("localStorage disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KvStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.storage
            .get_item(key)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.storage
            .remove_item(key)
            .map_err(|e| CacheError::StoreError(format!("{:?}", e)))
    }
}
