//! Fail-soft JSON layer over a [`StringStore`].
//!
//! Every gate and collection reads and writes through this adapter. The
//! contract: a missing key reads as `None`, a corrupt value reads as `None`,
//! and a failing store turns writes into logged no-ops. Callers that need to
//! distinguish storage failure use the checked `try_write`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StringStore;
use crate::error::StoreError;

/// JSON (de)serializing adapter around a shared string store.
#[derive(Clone)]
pub struct KvAdapter {
    store: Arc<dyn StringStore>,
}

impl KvAdapter {
    pub fn new(store: Arc<dyn StringStore>) -> Self {
        Self { store }
    }

    /// Fetch and decode the value under `key`.
    ///
    /// Returns `None` when the key is absent, the stored text fails to
    /// decode, or the store itself errors. Decode and store failures are
    /// logged; neither propagates.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key, error = %e, "store read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value failed to decode");
                None
            }
        }
    }

    /// Encode `value` and store it under `key`.
    ///
    /// Returns `false` (after logging) if the store rejects the write; the
    /// operation is a no-op from the caller's perspective.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> bool {
        match self.try_write(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "store write failed");
                false
            }
        }
    }

    /// Checked write for callers that surface `StorageUnavailable`.
    ///
    /// # Errors
    /// Returns the underlying store error instead of swallowing it.
    pub fn try_write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StoreError::Unavailable(format!("encode failed: {e}")))?;
        self.store.set(key, &raw)
    }

    /// Delete `key`. Fail-soft like `write`.
    pub fn remove(&self, key: &str) -> bool {
        match self.store.remove(key) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "store remove failed");
                false
            }
        }
    }

    /// Whether any value (decodable or not) exists under `key`.
    ///
    /// Gate flags are presence-based: the stored text is an opaque marker.
    pub fn contains(&self, key: &str) -> bool {
        matches!(self.store.get(key), Ok(Some(_)))
    }

    /// Store an opaque marker under `key` (gate flag acknowledgment).
    pub fn mark(&self, key: &str) -> bool {
        match self.store.set(key, "\"1\"") {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "store mark failed");
                false
            }
        }
    }
}
