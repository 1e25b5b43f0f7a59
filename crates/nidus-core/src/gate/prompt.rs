//! Rate-limited prompt gate.
//!
//! Shows a promotional prompt at most once per session, after a configurable
//! delay. The session flag is set synchronously at schedule time, not at
//! display time: a second gate constructed against the same session store
//! (a remount) sees the flag and lands in `Hidden`, so no two schedules in
//! one session can both reach `Visible`.
//!
//! ```text
//! Armed -> Scheduled -> Visible -> Hidden
//! ```
//!
//! The flag's literal value is an opaque marker; only its presence counts.

use serde::{Deserialize, Serialize};

use super::now_ms;
use crate::events::Event;
use crate::store::KvAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPhase {
    Armed,
    Scheduled,
    Visible,
    Hidden,
}

/// Configuration for the prompt gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptGateConfig {
    /// Session-scoped key marking the prompt as scheduled for this session.
    #[serde(default = "default_session_key")]
    pub session_key: String,
    /// Delay from scheduling to visibility.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_session_key() -> String {
    "nidus_promotion_seen".to_string()
}
fn default_delay_ms() -> u64 {
    3000
}

impl Default for PromptGateConfig {
    fn default() -> Self {
        Self {
            session_key: default_session_key(),
            delay_ms: default_delay_ms(),
        }
    }
}

/// Session-scoped promotional prompt gate.
///
/// Caller-polled like [`OneTimeGate`](super::OneTimeGate); no internal timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptGate {
    config: PromptGateConfig,
    phase: PromptPhase,
    #[serde(default)]
    scheduled_at_epoch_ms: Option<u64>,
}

impl PromptGate {
    /// Create a gate against the session store.
    ///
    /// An existing session flag means some earlier mount already scheduled
    /// the prompt: this instance constructs directly in `Hidden`.
    pub fn new(config: PromptGateConfig, session_kv: &KvAdapter) -> Self {
        let phase = if session_kv.contains(&config.session_key) {
            PromptPhase::Hidden
        } else {
            PromptPhase::Armed
        };
        Self {
            config,
            phase,
            scheduled_at_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> PromptPhase {
        self.phase
    }

    pub fn config(&self) -> &PromptGateConfig {
        &self.config
    }

    /// Milliseconds until the prompt becomes visible (0 unless scheduled).
    pub fn remaining_ms(&self) -> u64 {
        match self.scheduled_at_epoch_ms {
            Some(since) => self
                .config
                .delay_ms
                .saturating_sub(now_ms().saturating_sub(since)),
            None => 0,
        }
    }

    pub fn snapshot(&self) -> Event {
        Event::PromptSnapshot {
            phase: self.phase,
            remaining_ms: self.remaining_ms(),
            at: chrono::Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// `Armed -> Scheduled`, setting the session flag before returning.
    pub fn schedule(&mut self, session_kv: &KvAdapter) -> Option<Event> {
        if self.phase != PromptPhase::Armed {
            return None;
        }
        // Mark first: scheduling and marking-shown are atomic from the
        // gate's point of view. Even if the mark fails the in-memory phase
        // still prevents a second schedule on this instance.
        session_kv.mark(&self.config.session_key);
        self.phase = PromptPhase::Scheduled;
        self.scheduled_at_epoch_ms = Some(now_ms());
        Some(Event::PromptScheduled {
            delay_ms: self.config.delay_ms,
            at: chrono::Utc::now(),
        })
    }

    /// Call periodically. Returns `Some(Event::PromptShown)` when the delay
    /// has elapsed.
    pub fn poll(&mut self) -> Option<Event> {
        if self.phase != PromptPhase::Scheduled {
            return None;
        }
        let since = self.scheduled_at_epoch_ms?;
        if now_ms().saturating_sub(since) < self.config.delay_ms {
            return None;
        }
        self.phase = PromptPhase::Visible;
        Some(Event::PromptShown {
            at: chrono::Utc::now(),
        })
    }

    /// Explicit close or successful submission: hidden for the session.
    pub fn dismiss(&mut self) -> Option<Event> {
        match self.phase {
            PromptPhase::Scheduled | PromptPhase::Visible => {
                self.phase = PromptPhase::Hidden;
                self.scheduled_at_epoch_ms = None;
                Some(Event::PromptDismissed {
                    at: chrono::Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Teardown path: clear any pending schedule without emitting events.
    /// Every schedule must be paired with either visibility, dismissal, or
    /// this cancellation on the owner's exit path.
    pub fn cancel(&mut self) {
        self.phase = PromptPhase::Hidden;
        self.scheduled_at_epoch_ms = None;
    }
}
