mod adapter;
mod memory;
mod sqlite;

pub use adapter::KvAdapter;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::StoreError;

/// Scope of a string store, mirroring the browser-era split between
/// localStorage and sessionStorage. Absence of a key always means
/// "not yet acknowledged" regardless of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreScope {
    /// Survives restarts (SQLite-backed).
    Persistent,
    /// Cleared when the owning session ends (in-memory).
    SessionOnly,
}

/// The injected persistence seam. Every gate and collection talks to storage
/// through this trait, addressed only by string key.
pub trait StringStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Returns `~/.config/nidus[-dev]/` based on NIDUS_ENV.
///
/// Set NIDUS_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("NIDUS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("nidus-dev")
    } else {
        base_dir.join("nidus")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
