//! One-time gate implementation.
//!
//! The gate is a wall-clock-based state machine. It does not use internal
//! threads or timers - the caller is responsible for calling `poll()`
//! periodically while the sequence is showing.
//!
//! ## State Transitions
//!
//! ```text
//! Pending -> Showing -> Completed
//! ```
//!
//! Completion requires both the natural end-of-sequence signal (`finish`)
//! and the configured minimum display time, whichever is satisfied later.
//! A skip completes immediately.
//!
//! ## Usage
//!
//! ```ignore
//! let mut gate = OneTimeGate::new(config, &kv);
//! if let Some(event) = gate.begin() {
//!     // render the sequence; on its last frame:
//!     gate.finish();
//!     // in a loop until Completed:
//!     gate.poll(&kv);
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::now_ms;
use crate::events::Event;
use crate::store::KvAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatePhase {
    Pending,
    Showing,
    Completed,
}

/// Configuration for a one-time gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeGateConfig {
    /// Persistence key marking the sequence as completed.
    #[serde(default = "default_key")]
    pub key: String,
    /// Minimum time the sequence stays on screen, even past its natural end.
    #[serde(default = "default_min_display_ms")]
    pub min_display_ms: u64,
    /// When false the gate re-evaluates to `Pending` every load.
    #[serde(default = "default_true")]
    pub persist: bool,
    /// Whether the user may cut the sequence short.
    #[serde(default = "default_true")]
    pub allow_skip: bool,
}

fn default_key() -> String {
    "nidus-splash-seen".to_string()
}
fn default_min_display_ms() -> u64 {
    1800
}
fn default_true() -> bool {
    true
}

impl Default for OneTimeGateConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            min_display_ms: default_min_display_ms(),
            persist: true,
            allow_skip: true,
        }
    }
}

/// One-shot UI gate.
///
/// Operates on wall-clock deltas -- no internal thread. Serializable so a
/// host can park it in the kv store between process invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeGate {
    config: OneTimeGateConfig,
    phase: GatePhase,
    /// Epoch ms when `Showing` began. Only valid while showing.
    #[serde(default)]
    shown_at_epoch_ms: Option<u64>,
    /// Natural end-of-sequence signal received.
    #[serde(default)]
    finished: bool,
}

impl OneTimeGate {
    /// Create a gate, consulting the persisted flag.
    ///
    /// Flag present means the sequence already ran in some earlier session:
    /// the gate constructs directly in `Completed` and never shows again.
    pub fn new(config: OneTimeGateConfig, kv: &KvAdapter) -> Self {
        let phase = if config.persist && kv.contains(&config.key) {
            GatePhase::Completed
        } else {
            GatePhase::Pending
        };
        Self {
            config,
            phase,
            shown_at_epoch_ms: None,
            finished: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn config(&self) -> &OneTimeGateConfig {
        &self.config
    }

    /// Whether the host should display the sequence now.
    pub fn should_show(&self) -> bool {
        self.phase == GatePhase::Pending
    }

    /// Milliseconds shown so far (0 unless showing).
    pub fn displayed_ms(&self) -> u64 {
        match self.shown_at_epoch_ms {
            Some(since) => now_ms().saturating_sub(since),
            None => 0,
        }
    }

    /// Milliseconds until the minimum display requirement is met.
    pub fn remaining_ms(&self) -> u64 {
        self.config.min_display_ms.saturating_sub(self.displayed_ms())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::SplashSnapshot {
            phase: self.phase,
            remaining_ms: self.remaining_ms(),
            finished: self.finished,
            at: chrono::Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// `Pending -> Showing`. No-op in any other phase.
    pub fn begin(&mut self) -> Option<Event> {
        if self.phase != GatePhase::Pending {
            return None;
        }
        self.phase = GatePhase::Showing;
        self.shown_at_epoch_ms = Some(now_ms());
        self.finished = false;
        Some(Event::SplashShown {
            at: chrono::Utc::now(),
        })
    }

    /// Explicit user skip. Completes immediately, minimum time waived.
    pub fn skip(&mut self, kv: &KvAdapter) -> Option<Event> {
        if self.phase != GatePhase::Showing || !self.config.allow_skip {
            return None;
        }
        let displayed_ms = self.displayed_ms();
        self.complete(kv);
        Some(Event::SplashSkipped {
            displayed_ms,
            at: chrono::Utc::now(),
        })
    }

    /// Natural end-of-sequence signal.
    ///
    /// Completion still waits for the minimum display time; if that has
    /// already elapsed the gate completes here, otherwise a later `poll`
    /// finishes the job.
    pub fn finish(&mut self, kv: &KvAdapter) -> Option<Event> {
        if self.phase != GatePhase::Showing {
            return None;
        }
        self.finished = true;
        self.poll(kv)
    }

    /// Call periodically while showing. Returns `Some(Event::SplashCompleted)`
    /// once both completion conditions hold.
    pub fn poll(&mut self, kv: &KvAdapter) -> Option<Event> {
        if self.phase != GatePhase::Showing || !self.finished {
            return None;
        }
        let displayed_ms = self.displayed_ms();
        if displayed_ms < self.config.min_display_ms {
            return None;
        }
        self.complete(kv);
        Some(Event::SplashCompleted {
            displayed_ms,
            at: chrono::Utc::now(),
        })
    }

    /// Drop any in-flight showing state without completing.
    ///
    /// Teardown path for a host unmounting mid-sequence; the gate re-shows
    /// next load since the flag was never persisted.
    pub fn cancel(&mut self) {
        if self.phase == GatePhase::Showing {
            self.phase = GatePhase::Pending;
            self.shown_at_epoch_ms = None;
            self.finished = false;
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, kv: &KvAdapter) {
        self.phase = GatePhase::Completed;
        self.shown_at_epoch_ms = None;
        if self.config.persist {
            // A failed write is logged by the adapter and otherwise ignored:
            // the in-memory machine keeps functioning and the sequence may
            // re-show next load.
            kv.mark(&self.config.key);
        }
    }
}
