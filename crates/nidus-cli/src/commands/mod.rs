pub mod capture;
pub mod config;
pub mod consent;
pub mod jobs;
pub mod promo;
pub mod splash;

use std::sync::Arc;

use nidus_core::{KvAdapter, SqliteStore};

/// Open the persistent kv adapter shared by every command.
pub fn open_kv() -> Result<KvAdapter, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    Ok(KvAdapter::new(Arc::new(store)))
}

/// Session id for session-scoped keys.
///
/// A browser clears session storage when the tab closes; the CLI's closest
/// analogue is an explicit id (env NIDUS_SESSION) namespacing those keys in
/// the shared store, reset via `promo reset-session`.
pub fn session_id() -> String {
    std::env::var("NIDUS_SESSION").unwrap_or_else(|_| "default".to_string())
}

/// Namespace a session-scoped key under the current session id.
pub fn session_key(key: &str) -> String {
    format!("session:{}:{}", session_id(), key)
}
