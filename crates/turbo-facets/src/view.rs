//! Listing view-mode preference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use turbo_cache::Cache;

use crate::config::FacetsConfig;
use crate::FacetError;

/// How the product listing is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = FacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(FacetError::UnknownViewMode(other.to_string())),
        }
    }
}

/// Persists the shopper's grid/list choice across sessions.
///
/// Stored as the bare string `"grid"` or `"list"` under one key.
#[derive(Debug)]
pub struct ViewPreferenceStore {
    cache: Cache,
    key: String,
    default_mode: ViewMode,
}

impl ViewPreferenceStore {
    /// Create a store over a cache, using the configured key and default.
    pub fn new(cache: Cache, config: &FacetsConfig) -> Self {
        Self {
            cache,
            key: config.view_mode_key.clone(),
            default_mode: config.default_view_mode,
        }
    }

    /// Read the stored mode.
    ///
    /// Falls back to the default when nothing valid is stored or the store
    /// can't be read.
    pub fn get(&self) -> ViewMode {
        match self.cache.get(&self.key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(key = %self.key, value = %raw, "ignoring unknown stored view mode");
                self.default_mode
            }),
            Ok(None) => self.default_mode,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read view mode");
                self.default_mode
            }
        }
    }

    /// Store a mode.
    pub fn set(&self, mode: ViewMode) -> Result<(), FacetError> {
        self.cache.set(&self.key, mode.as_str())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_cache::{CacheError, KvStore, MemoryStore};

    struct DeniedStore;

    impl KvStore for DeniedStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::Unavailable("private mode".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::Unavailable("private mode".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }
    }

    fn store_over(backend: MemoryStore) -> ViewPreferenceStore {
        ViewPreferenceStore::new(Cache::with_store(backend), &FacetsConfig::default())
    }

    #[test]
    fn test_default_is_grid() {
        assert_eq!(store_over(MemoryStore::new()).get(), ViewMode::Grid);
    }

    #[test]
    fn test_persists_across_sessions() {
        let backend = MemoryStore::new();
        store_over(backend.clone()).set(ViewMode::List).unwrap();

        // A later page load opens the same backing store
        let later = store_over(backend.clone());
        assert_eq!(later.get(), ViewMode::List);
        assert_eq!(
            backend.get("products_view_mode").unwrap().as_deref(),
            Some("list")
        );
    }

    #[test]
    fn test_unknown_stored_value_falls_back() {
        let backend = MemoryStore::new();
        backend.set("products_view_mode", "masonry").unwrap();
        assert_eq!(store_over(backend).get(), ViewMode::Grid);
    }

    #[test]
    fn test_unreadable_store_falls_back() {
        let store = ViewPreferenceStore::new(Cache::with_store(DeniedStore), &FacetsConfig::default());
        assert_eq!(store.get(), ViewMode::Grid);
        assert!(matches!(store.set(ViewMode::List), Err(FacetError::Cache(_))));
    }

    #[test]
    fn test_parse_view_mode() {
        assert_eq!("list".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert!("tiles".parse::<ViewMode>().is_err());
    }
}
