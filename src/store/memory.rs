//! In-process store implementation.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::{StateStore, StorageKey, StoreError};

/// In-memory [`StateStore`] with handle semantics.
///
/// Clones share the same underlying map, so a session and a test (or two
/// sessions for different variants) can observe each other's writes the way
/// they would against a real backend. The engine is single-threaded, so a
/// plain `Rc<RefCell<..>>` suffices.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<FxHashMap<String, serde_json::Value>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &StorageKey) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.entries.borrow().get(&key.to_string()).cloned())
    }

    fn set(&self, key: &StorageKey, value: serde_json::Value) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}
