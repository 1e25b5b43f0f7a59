//! In-memory session-scoped string store.
//!
//! Contents live exactly as long as the handle (and its clones): the natural
//! session boundary. Also serves as the test double for the persistent store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::StringStore;
use crate::error::StoreError;

/// Session-only key-value store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.map.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every key, simulating the end of a session.
    pub fn clear(&self) {
        self.map.lock().expect("store mutex poisoned").clear();
    }
}

impl StringStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .map
            .lock()
            .expect("store mutex poisoned")
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map
            .lock()
            .expect("store mutex poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.map.lock().expect("store mutex poisoned").remove(key);
        Ok(())
    }
}
