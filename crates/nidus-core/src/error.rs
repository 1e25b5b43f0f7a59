//! Core error types for nidus-core.
//!
//! This module defines the error hierarchy using thiserror. The capture and
//! relay taxonomies mirror what callers are expected to render inline: none
//! of these errors are fatal to the host.

use thiserror::Error;

/// Core error type for nidus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Lead capture errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Remote relay errors
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the underlying string store.
///
/// The [`KvAdapter`](crate::store::KvAdapter) swallows these on its fail-soft
/// paths; they surface only through the checked `try_*` variants.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing store
    #[error("Failed to open store at {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// A read or write against the store failed
    #[error("Store operation failed: {0}")]
    Unavailable(String),
}

/// Lead capture errors.
///
/// All three are recoverable at the form boundary: `InvalidEmail` highlights
/// the field, `Duplicate` informs "already subscribed", and
/// `StorageUnavailable` becomes a generic retry message.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Email failed the minimal shape check
    #[error("Invalid email address")]
    InvalidEmail,

    /// Normalized email already present in the collection
    #[error("'{email}' is already subscribed")]
    Duplicate { email: String },

    /// The backing store rejected the write
    #[error("Storage unavailable, please retry")]
    StorageUnavailable(#[source] StoreError),
}

/// Remote relay errors. A relay failure never undoes the local capture.
#[derive(Error, Debug)]
pub enum RelayError {
    /// No endpoint configured -- local-only capture
    #[error("Relay endpoint not configured")]
    NotConfigured,

    /// Endpoint string did not parse as an https URL
    #[error("Invalid relay endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// The intake service answered outside the 2xx range
    #[error("Relay rejected submission (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// Network-level failure
    #[error("Relay transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: String, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: String, message: String },

    /// Unknown or malformed configuration key
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
