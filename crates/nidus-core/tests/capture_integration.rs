//! Integration tests for lead capture and the job board over the
//! persistent store.

use std::sync::Arc;

use nidus_core::{
    normalize_email, validate_email, CaptureError, JobBoard, KvAdapter, LeadBook, NewLead,
    SqliteStore, StoreError, StringStore,
};
use proptest::prelude::*;
use tempfile::TempDir;

fn open_kv(dir: &TempDir) -> KvAdapter {
    let store = SqliteStore::open_at(&dir.path().join("nidus.db")).unwrap();
    KvAdapter::new(Arc::new(store))
}

// ============================================================================
// Capture workflow
// ============================================================================

#[test]
fn test_capture_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let book = LeadBook::new(open_kv(&dir));
        book.submit(
            "nidus_newsletter",
            NewLead {
                email: "jane@example.com".into(),
                phone: None,
            },
        )
        .unwrap();
    }

    // A fresh handle over the same file sees the record and still dedups.
    {
        let book = LeadBook::new(open_kv(&dir));
        assert_eq!(book.count("nidus_newsletter"), 1);
        assert_eq!(book.list("nidus_newsletter")[0].email, "jane@example.com");

        let err = book
            .submit(
                "nidus_newsletter",
                NewLead {
                    email: " JANE@example.com".into(),
                    phone: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, CaptureError::Duplicate { .. }));
    }
}

#[test]
fn test_collections_and_applications_are_disjoint() {
    let dir = TempDir::new().unwrap();
    let kv = open_kv(&dir);
    let book = LeadBook::new(kv.clone());
    let board = JobBoard::new(kv, "nidus_jobs", "nidus_applications");

    book.submit(
        "nidus_newsletter",
        NewLead {
            email: "a@b.co".into(),
            phone: None,
        },
    )
    .unwrap();
    board.seed();
    board.apply("frontend-dev", "a@b.co", None).unwrap();

    assert_eq!(book.count("nidus_newsletter"), 1);
    assert_eq!(book.count("nidus_jobs"), 0); // postings are not capture records
    assert_eq!(board.list_applications().len(), 1);
}

#[test]
fn test_seed_is_idempotent_across_restarts() {
    let dir = TempDir::new().unwrap();

    {
        let board = JobBoard::new(open_kv(&dir), "nidus_jobs", "nidus_applications");
        assert!(board.seed());
    }
    {
        let board = JobBoard::new(open_kv(&dir), "nidus_jobs", "nidus_applications");
        assert!(!board.seed());
        assert_eq!(board.list_jobs().len(), 3);
    }
}

// ============================================================================
// Storage failure path
// ============================================================================

/// A store whose writes always fail, for exercising the checked write path.
struct BrokenStore;

impl StringStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }
    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }
    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk full".into()))
    }
}

#[test]
fn test_submit_surfaces_storage_unavailable() {
    let book = LeadBook::new(KvAdapter::new(Arc::new(BrokenStore)));
    let err = book
        .submit(
            "nidus_newsletter",
            NewLead {
                email: "a@b.co".into(),
                phone: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, CaptureError::StorageUnavailable(_)));
}

// ============================================================================
// Validation properties
// ============================================================================

proptest! {
    #[test]
    fn prop_well_formed_emails_validate(
        local in "[a-z0-9._-]{1,12}",
        host in "[a-z0-9-]{1,12}",
        tld in "[a-z]{2,6}",
    ) {
        let raw = format!("{local}@{host}.{tld}");
        prop_assert!(validate_email(&raw));
        // Surrounding whitespace and case never change the verdict.
        prop_assert!(validate_email(&format!("  {} ", raw.to_uppercase())));
    }

    #[test]
    fn prop_normalization_is_idempotent(raw in "\\PC{0,40}") {
        let once = normalize_email(&raw);
        prop_assert_eq!(normalize_email(&once), once.clone());
        prop_assert!(!once.starts_with(char::is_whitespace));
        prop_assert!(!once.ends_with(char::is_whitespace));
    }

    #[test]
    fn prop_email_without_at_never_validates(raw in "[a-z0-9. ]{0,40}") {
        prop_assert!(!validate_email(&raw));
    }
}
