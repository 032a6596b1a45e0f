//! In-memory store for native builds and tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{CacheError, KvStore};

/// A [`KvStore`] held in process memory.
///
/// Clones share the same map, so a clone handed to a [`Cache`](crate::Cache)
/// can still be inspected, or reopened to simulate a later page load.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("a", "1").unwrap();
        assert_eq!(handle.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(handle.len(), 1);

        handle.delete("a").unwrap();
        assert!(store.is_empty());
    }
}
