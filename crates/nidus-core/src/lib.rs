//! # Nidus Core Library
//!
//! Core business logic for the Nidus engagement subsystem: the gates,
//! lead capture, and relay behind the agency site's splash screen,
//! promotional popup, and newsletter widgets. The CLI binary is a thin
//! layer over this library; any other host (a web shell, a kiosk) composes
//! the same pieces.
//!
//! ## Architecture
//!
//! - **Gates**: wall-clock state machines that decide whether a UI sequence
//!   should run, polled by the caller -- no internal threads or timers
//! - **Storage**: a pluggable string store (SQLite-backed persistent,
//!   in-memory session-only) behind a fail-soft JSON adapter
//! - **Capture**: email validation, per-collection dedup, append-only
//!   timestamped records
//! - **Relay**: best-effort HTTPS forwarding of captured leads; local
//!   storage stays the source of truth
//!
//! ## Key Components
//!
//! - [`OneTimeGate`]: one-shot splash gate with a minimum display time
//! - [`PromptGate`]: at-most-once-per-session promotional prompt
//! - [`LeadBook`]: lead validation and recording
//! - [`RelayClient`]: remote intake forwarding
//! - [`Config`]: application configuration management

pub mod capture;
pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod jobs;
pub mod relay;
pub mod store;

pub use capture::{normalize_email, validate_email, CaptureRecord, LeadBook, NewLead};
pub use config::Config;
pub use error::{CaptureError, ConfigError, CoreError, RelayError, StoreError};
pub use events::Event;
pub use gate::{GatePhase, OneTimeGate, OneTimeGateConfig, PromptGate, PromptGateConfig, PromptPhase};
pub use jobs::{Application, JobBoard, JobPosting};
pub use relay::{RelayClient, RelayConfig, RelayReceipt};
pub use store::{KvAdapter, MemoryStore, SqliteStore, StoreScope, StringStore};
