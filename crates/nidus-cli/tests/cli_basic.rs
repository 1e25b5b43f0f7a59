//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs. Shared state is isolated per test through unique
//! session ids and collection keys.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

/// Run a CLI command in the given session and return (stdout, stderr, code).
fn run_cli(session: &str, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "nidus-cli", "--"])
        .args(args)
        .env("NIDUS_ENV", "dev")
        .env("NIDUS_SESSION", session)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn unique_suffix() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is not valid JSON")
}

#[test]
fn test_splash_reset_then_status_is_pending() {
    let (_, _, code) = run_cli("e2e-splash", &["splash", "reset"]);
    assert_eq!(code, 0, "splash reset failed");

    let (stdout, _, code) = run_cli("e2e-splash", &["splash", "status"]);
    assert_eq!(code, 0, "splash status failed");
    let json = parse_json(&stdout);
    assert_eq!(json["type"], "SplashSnapshot");
    assert_eq!(json["phase"], "pending");
}

#[test]
fn test_promo_schedules_once_per_session() {
    let session = format!("e2e-promo-{}", unique_suffix());

    let (stdout, _, code) = run_cli(&session, &["promo", "schedule"]);
    assert_eq!(code, 0, "promo schedule failed");
    assert_eq!(parse_json(&stdout)["type"], "PromptScheduled");

    // A second schedule in the same session is refused: snapshot instead.
    let (stdout, _, code) = run_cli(&session, &["promo", "schedule"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["type"], "PromptSnapshot");

    let (stdout, _, code) = run_cli(&session, &["promo", "reset-session"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("cleared"));
}

#[test]
fn test_capture_submit_list_count() {
    let collection = format!("e2e_capture_{}", unique_suffix());

    let (stdout, _, code) = run_cli(
        "e2e",
        &[
            "capture", "submit", "--collection", &collection, "--email", "Jane@Example.com",
            "--phone", "555-0101",
        ],
    );
    assert_eq!(code, 0, "capture submit failed");
    let json = parse_json(&stdout);
    assert_eq!(json["type"], "LeadCaptured");
    assert_eq!(json["email"], "jane@example.com");

    let (_, stderr, code) = run_cli(
        "e2e",
        &["capture", "submit", "--collection", &collection, "--email", "jane@example.com"],
    );
    assert_ne!(code, 0, "duplicate submit should fail");
    assert!(stderr.contains("error"));

    let (stdout, _, code) = run_cli("e2e", &["capture", "count", "--collection", &collection]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1");

    let (stdout, _, code) = run_cli("e2e", &["capture", "list", "--collection", &collection]);
    assert_eq!(code, 0);
    let records = parse_json(&stdout);
    assert_eq!(records.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_capture_rejects_invalid_email() {
    let collection = format!("e2e_invalid_{}", unique_suffix());
    let (_, _, code) = run_cli(
        "e2e",
        &["capture", "submit", "--collection", &collection, "--email", "not-an-email"],
    );
    assert_ne!(code, 0, "invalid email should fail");
}

#[test]
fn test_jobs_seed_list_apply() {
    let (_, _, code) = run_cli("e2e", &["jobs", "seed"]);
    assert_eq!(code, 0, "jobs seed failed");

    let (stdout, _, code) = run_cli("e2e", &["jobs", "list"]);
    assert_eq!(code, 0, "jobs list failed");
    let postings = parse_json(&stdout);
    assert!(postings.as_array().is_some_and(|p| !p.is_empty()));

    let email = format!("applicant{}@example.com", unique_suffix());
    let (stdout, _, code) = run_cli(
        "e2e",
        &["jobs", "apply", "--job", "frontend-dev", "--email", &email],
    );
    assert_eq!(code, 0, "jobs apply failed");
    assert_eq!(parse_json(&stdout)["type"], "ApplicationRecorded");

    let (_, _, code) = run_cli(
        "e2e",
        &["jobs", "apply", "--job", "frontend-dev", "--email", &email],
    );
    assert_ne!(code, 0, "duplicate application should fail");
}

#[test]
fn test_consent_accept_then_reset() {
    let (_, _, code) = run_cli("e2e", &["consent", "reset"]);
    assert_eq!(code, 0, "consent reset failed");

    let (stdout, _, code) = run_cli("e2e", &["consent", "status"]);
    assert_eq!(code, 0, "consent status failed");
    assert_eq!(parse_json(&stdout)["acknowledged"], false);

    let (_, _, code) = run_cli("e2e", &["consent", "accept"]);
    assert_eq!(code, 0, "consent accept failed");

    let (stdout, _, code) = run_cli("e2e", &["consent", "status"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["acknowledged"], true);

    let (_, _, code) = run_cli("e2e", &["consent", "reset"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli("e2e", &["consent", "status"]);
    assert_eq!(code, 0);
    assert_eq!(parse_json(&stdout)["acknowledged"], false);
}

#[test]
fn test_config_get_set_list() {
    let (stdout, _, code) = run_cli("e2e", &["config", "get", "splash.min_display_ms"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());

    let (stdout, _, code) = run_cli("e2e", &["config", "set", "promotion.delay_ms", "3000"]);
    assert_eq!(code, 0, "config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli("e2e", &["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let json = parse_json(&stdout);
    assert!(json.get("splash").is_some());

    let (_, _, code) = run_cli("e2e", &["config", "get", "no.such.key"]);
    assert_ne!(code, 0, "unknown key should fail");
}

#[test]
fn test_completions_generate() {
    let (stdout, _, code) = run_cli("e2e", &["completions", "bash"]);
    assert_eq!(code, 0, "completions failed");
    assert!(stdout.contains("nidus-cli"));
}
