//! Attached-file selection shared by every tool
//!
//! There is exactly one selection per browser. Tools and the download
//! handler hold clones of the same handle; `toggle` and `clear` are the only
//! mutators.

use parking_lot::RwLock;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Shared handle to the set of selected storage keys
#[derive(Debug, Clone, Default)]
pub struct Selection {
    keys: Arc<RwLock<BTreeSet<String>>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` if absent, remove it otherwise. Returns whether it is now selected.
    pub fn toggle(&self, key: &str) -> bool {
        let mut keys = self.keys.write();
        if keys.remove(key) {
            false
        } else {
            keys.insert(key.to_string());
            true
        }
    }

    /// Empty the selection
    pub fn clear(&self) {
        self.keys.write().clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }

    /// Copy of the selected keys, sorted
    pub fn snapshot(&self) -> Vec<String> {
        self.keys.read().iter().cloned().collect()
    }

    /// Whether two handles refer to the same selection
    pub fn same_as(&self, other: &Selection) -> bool {
        Arc::ptr_eq(&self.keys, &other.keys)
    }
}
