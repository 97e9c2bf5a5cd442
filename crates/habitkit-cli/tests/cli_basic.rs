//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a snapshot in a temp directory and
//! verify the JSON it prints. HOME points at the temp directory so config
//! reads and writes never touch the real user config.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
    "habits": [
        { "id": "read", "name": "Read", "start_date": "2023-01-01",
          "frequency": { "type": "daily" } },
        { "id": "gym", "name": "Gym", "category": "fitness", "start_date": "2023-01-01",
          "frequency": { "type": "weekly", "days_of_week": [1, 3, 5] } },
        { "id": "bad", "name": "Bad", "start_date": "2023-01-01",
          "frequency": { "type": "interval", "every_n_days": 0 } }
    ],
    "checkins": [
        { "habit_id": "read", "date": "2023-01-01", "is_completed": true },
        { "habit_id": "read", "date": "2023-01-02", "is_completed": true },
        { "habit_id": "read", "date": "2023-01-03", "is_completed": false },
        { "habit_id": "read", "date": "2023-01-04", "is_completed": true },
        { "habit_id": "read", "date": "2023-01-05", "is_completed": true,
          "completed_at": "2023-01-05T07:10:00+02:00" },
        { "habit_id": "gym", "date": "2023-01-02", "is_completed": true },
        { "habit_id": "gym", "date": "2023-01-04", "is_completed": true }
    ]
}"#;

fn setup() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("snapshot.json"), SNAPSHOT).expect("write snapshot");
    dir
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let snapshot = home.join("snapshot.json");
    let output = Command::new(env!("CARGO_BIN_EXE_habitkit"))
        .args(args)
        .arg("--snapshot")
        .arg(&snapshot)
        .env("HOME", home)
        .env_remove("HABITKIT_ENV")
        .env_remove("HABITKIT_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_stats_for_all_habits() {
    let dir = setup();
    let rows = run_json(dir.path(), &["stats", "--as-of", "2023-01-05"]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2, "invalid habit should be skipped");

    let read = &rows[0];
    assert_eq!(read["habit_id"], "read");
    assert_eq!(read["current_streak"], 2);
    assert_eq!(read["longest_streak"], 2);
    assert_eq!(read["completion_rate"], 80);
    assert_eq!(read["last_completed_date"], "2023-01-05");

    let gym = &rows[1];
    assert_eq!(gym["total_due_days"], 2);
    assert_eq!(gym["current_streak"], 2);
}

#[test]
fn test_rejected_records_are_reported_on_stderr() {
    let dir = setup();
    let (_, stderr, code) = run_cli(dir.path(), &["stats", "--as-of", "2023-01-05"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("skipped habit"), "stderr was: {stderr}");
}

#[test]
fn test_stats_report_and_signals() {
    let dir = setup();
    let rows = run_json(
        dir.path(),
        &["stats", "--habit", "gym", "--as-of", "2023-01-05", "--report", "--signals"],
    );
    let gym = &rows.as_array().unwrap()[0];
    assert_eq!(gym["status"]["status"], "active");
    assert_eq!(gym["anomalies"].as_array().unwrap().len(), 0);
    let signals = gym["signals"].as_array().unwrap();
    assert_eq!(signals.len(), 2);
    assert_eq!(signals[1]["category"], "fitness");
}

#[test]
fn test_today_lists_due_habits() {
    let dir = setup();
    // 2023-01-03 is a Tuesday: only the daily habit is due
    let items = run_json(dir.path(), &["today", "--date", "2023-01-03"]);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["habit_id"], "read");
    assert_eq!(items[0]["completed"], false);
}

#[test]
fn test_buckets_weekly() {
    let dir = setup();
    let buckets = run_json(
        dir.path(),
        &["buckets", "read", "--granularity", "week", "--from", "2023-01-01", "--to", "2023-01-08"],
    );
    let buckets = buckets.as_array().unwrap();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0]["label"], "2022-W52");
    assert_eq!(buckets[0]["due_count"], 1);
    assert_eq!(buckets[1]["label"], "2023-W01");
    assert_eq!(buckets[1]["due_count"], 7);
    assert_eq!(buckets[1]["completed_count"], 3);
}

#[test]
fn test_due_next() {
    let dir = setup();
    let next = run_json(dir.path(), &["due", "gym", "--from", "2023-01-05", "--next"]);
    assert_eq!(next, "2023-01-06");
}

#[test]
fn test_profile_peak_hour() {
    let dir = setup();
    let profile = run_json(dir.path(), &["profile", "read"]);
    assert_eq!(profile["peak_hour"], 7);
    assert_eq!(profile["total"], 1);
}

#[test]
fn test_unknown_habit_fails() {
    let dir = setup();
    let (_, stderr, code) = run_cli(dir.path(), &["buckets", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("habit not found"));
}

#[test]
fn test_config_get_default() {
    let dir = setup();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "report.granularity"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "week");
}
