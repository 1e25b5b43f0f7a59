//! Mock job board: seeded postings and applications.
//!
//! A simpler dataset sharing the capture storage contract. Applications
//! dedup per `(job_id, email)` so one person can apply to several openings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capture::{normalize_email, validate_email};
use crate::error::CaptureError;
use crate::gate::now_ms;
use crate::store::KvAdapter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub location: String,
    pub blurb: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub job_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Job board over the shared kv store.
#[derive(Clone)]
pub struct JobBoard {
    kv: KvAdapter,
    jobs_key: String,
    applications_key: String,
}

impl JobBoard {
    pub fn new(kv: KvAdapter, jobs_key: impl Into<String>, applications_key: impl Into<String>) -> Self {
        Self {
            kv,
            jobs_key: jobs_key.into(),
            applications_key: applications_key.into(),
        }
    }

    /// Write the default posting list iff none exists yet.
    pub fn seed(&self) -> bool {
        if self.kv.contains(&self.jobs_key) {
            return false;
        }
        self.kv.write(&self.jobs_key, &default_postings())
    }

    pub fn list_jobs(&self) -> Vec<JobPosting> {
        self.kv.read(&self.jobs_key).unwrap_or_default()
    }

    pub fn list_applications(&self) -> Vec<Application> {
        self.kv.read(&self.applications_key).unwrap_or_default()
    }

    /// Record an application for `job_id`.
    ///
    /// # Errors
    /// Same taxonomy as lead capture: `InvalidEmail`, `Duplicate` (same
    /// email for the same job), `StorageUnavailable`.
    pub fn apply(
        &self,
        job_id: &str,
        email: &str,
        phone: Option<String>,
    ) -> Result<Application, CaptureError> {
        if !validate_email(email) {
            return Err(CaptureError::InvalidEmail);
        }
        let email = normalize_email(email);

        let mut applications = self.list_applications();
        if applications
            .iter()
            .any(|a| a.job_id == job_id && a.email == email)
        {
            return Err(CaptureError::Duplicate { email });
        }

        let application = Application {
            id: now_ms() as i64,
            job_id: job_id.to_string(),
            email,
            phone: phone.filter(|p| !p.trim().is_empty()),
            created_at: Utc::now(),
        };
        applications.push(application.clone());
        self.kv
            .try_write(&self.applications_key, &applications)
            .map_err(CaptureError::StorageUnavailable)?;
        Ok(application)
    }
}

fn default_postings() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: "brand-designer".into(),
            title: "Brand Designer".into(),
            location: "Remote".into(),
            blurb: "Own visual identity work across client engagements.".into(),
        },
        JobPosting {
            id: "frontend-dev".into(),
            title: "Frontend Developer".into(),
            location: "Remote".into(),
            blurb: "Build marketing sites and interactive landing pages.".into(),
        },
        JobPosting {
            id: "content-strategist".into(),
            title: "Content Strategist".into(),
            location: "Hybrid".into(),
            blurb: "Shape messaging and editorial calendars for clients.".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::{KvAdapter, MemoryStore};

    fn board() -> JobBoard {
        JobBoard::new(
            KvAdapter::new(Arc::new(MemoryStore::new())),
            "jobs",
            "applications",
        )
    }

    #[test]
    fn seed_writes_once() {
        let board = board();
        assert!(board.seed());
        assert!(!board.seed());
        assert_eq!(board.list_jobs().len(), 3);
    }

    #[test]
    fn apply_and_dedup_per_job() {
        let board = board();
        board.seed();
        board.apply("brand-designer", "a@b.co", None).unwrap();
        let err = board.apply("brand-designer", " A@B.CO", None).unwrap_err();
        assert!(matches!(err, CaptureError::Duplicate { .. }));
        // Same person, different opening: allowed.
        board.apply("frontend-dev", "a@b.co", None).unwrap();
        assert_eq!(board.list_applications().len(), 2);
    }

    #[test]
    fn apply_rejects_bad_email() {
        let board = board();
        assert!(matches!(
            board.apply("frontend-dev", "nope", None),
            Err(CaptureError::InvalidEmail)
        ));
        assert!(board.list_applications().is_empty());
    }
}
