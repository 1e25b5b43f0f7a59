//! Lead capture: validation, deduplication, and recording.
//!
//! A collection is a named, ordered array of [`CaptureRecord`] serialized
//! under one persistence key. Insertion order is the only ordering
//! guarantee; dedup is a linear scan over normalized emails. Collections
//! grow without bound.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;
use crate::events::Event;
use crate::gate::now_ms;
use crate::store::KvAdapter;

/// A submitted lead. Never mutated, never deleted by the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Capture time in epoch milliseconds. Collisions are tolerated --
    /// submissions arrive at human rate.
    pub id: i64,
    /// Normalized (trimmed, lower-cased) email.
    pub email: String,
    /// Optional free-text phone, unvalidated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input to a capture submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLead {
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Minimal email shape check: non-whitespace local part, a single `@`, and
/// a domain containing at least one interior `.`.
///
/// Intentionally permissive -- a UX guard, not a deliverability check.
pub fn validate_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = trimmed.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Trim and ASCII-lowercase an email for storage and dedup.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Reader/writer over named lead collections.
#[derive(Clone)]
pub struct LeadBook {
    kv: KvAdapter,
}

impl LeadBook {
    pub fn new(kv: KvAdapter) -> Self {
        Self { kv }
    }

    /// Validate, dedup, and append a lead to `collection`.
    ///
    /// Exactly one collection read and one collection write; the write is
    /// whole-array, so either the new array persists or the prior one
    /// remains.
    ///
    /// # Errors
    /// `InvalidEmail` on a failed shape check, `Duplicate` when the
    /// normalized email already exists in the collection, and
    /// `StorageUnavailable` when the backing store rejects the write.
    pub fn submit(&self, collection: &str, lead: NewLead) -> Result<CaptureRecord, CaptureError> {
        if !validate_email(&lead.email) {
            return Err(CaptureError::InvalidEmail);
        }
        let email = normalize_email(&lead.email);

        let mut records = self.list(collection);
        if records.iter().any(|r| r.email == email) {
            return Err(CaptureError::Duplicate { email });
        }

        let record = CaptureRecord {
            id: now_ms() as i64,
            email,
            phone: lead.phone.filter(|p| !p.trim().is_empty()),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        self.kv
            .try_write(collection, &records)
            .map_err(CaptureError::StorageUnavailable)?;

        tracing::debug!(collection, email = %record.email, id = record.id, "lead captured");
        Ok(record)
    }

    /// Full collection read. Absent or corrupt collections read as empty.
    pub fn list(&self, collection: &str) -> Vec<CaptureRecord> {
        self.kv.read(collection).unwrap_or_default()
    }

    pub fn count(&self, collection: &str) -> usize {
        self.list(collection).len()
    }

    /// Event describing a successful capture, for hosts that render events.
    pub fn captured_event(collection: &str, record: &CaptureRecord) -> Event {
        Event::LeadCaptured {
            collection: collection.to_string(),
            email: record.email.clone(),
            id: record.id,
            at: Utc::now(),
        }
    }
}
