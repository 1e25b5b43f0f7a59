use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gate::{GatePhase, PromptPhase};

/// Every observable state change in the engagement subsystem produces an
/// Event. The host (page shell, CLI) renders these; nothing in the core
/// reacts to its own events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// One-time sequence started showing.
    SplashShown {
        at: DateTime<Utc>,
    },
    /// User skipped the one-time sequence before its natural end.
    SplashSkipped {
        displayed_ms: u64,
        at: DateTime<Utc>,
    },
    /// One-time sequence completed (natural end AND minimum display time).
    SplashCompleted {
        displayed_ms: u64,
        at: DateTime<Utc>,
    },
    /// Promotional prompt scheduled; the session flag is already set.
    PromptScheduled {
        delay_ms: u64,
        at: DateTime<Utc>,
    },
    /// Promotional prompt became visible.
    PromptShown {
        at: DateTime<Utc>,
    },
    /// Promotional prompt dismissed for the rest of the session.
    PromptDismissed {
        at: DateTime<Utc>,
    },
    /// A lead passed validation and was appended to its collection.
    LeadCaptured {
        collection: String,
        email: String,
        id: i64,
        at: DateTime<Utc>,
    },
    /// A job application was recorded.
    ApplicationRecorded {
        job_id: String,
        email: String,
        id: i64,
        at: DateTime<Utc>,
    },
    /// The remote intake accepted a relayed lead.
    RelayDelivered {
        delivery_id: String,
        status: u16,
        at: DateTime<Utc>,
    },
    /// The remote intake could not be reached or rejected the lead.
    /// Local capture is unaffected.
    RelayFailed {
        reason: String,
        at: DateTime<Utc>,
    },
    /// Full state snapshot of the one-time gate.
    SplashSnapshot {
        phase: GatePhase,
        remaining_ms: u64,
        finished: bool,
        at: DateTime<Utc>,
    },
    /// Full state snapshot of the prompt gate.
    PromptSnapshot {
        phase: PromptPhase,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
}
