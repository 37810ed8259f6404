// ABOUTME: Integration tests for the periodization-cli binary
// ABOUTME: Help output, history import into a temporary database, and JSON command output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Integration tests for the periodization-cli binary.
//!
//! Each test runs the compiled binary against its own temporary `SQLite` file.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{
    contribution, feedback_with_readiness, muscle_group, sets_payload, today, BENCH_PRESS, CHEST,
    QUADS, SQUAT, TRICEPS,
};
use periodization_engine::database::HistoryImport;
use periodization_engine::models::{BodyRegion, ExerciseLog, SessionId, WorkoutSession};
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use uuid::Uuid;

/// Run the CLI against `database`, returning exit code, stdout, and stderr
fn run_cli(database: &Path, args: &[&str]) -> (i32, String, String) {
    let url = format!("sqlite:{}", database.display());
    let output = Command::new(env!("CARGO_BIN_EXE_periodization-cli"))
        .args(args)
        .args(["--database-url", &url])
        .env("RUST_LOG", "warn")
        .output()
        .unwrap();

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (exit_code, stdout, stderr)
}

fn run_json(database: &Path, args: &[&str]) -> Value {
    let (exit_code, stdout, stderr) = run_cli(database, args);
    assert_eq!(exit_code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap()
}

fn write_export(dir: &Path, user_id: Uuid) -> std::path::PathBuf {
    let mut export = HistoryImport {
        muscle_groups: vec![
            muscle_group(CHEST, "Chest", BodyRegion::Upper),
            muscle_group(TRICEPS, "Triceps", BodyRegion::Upper),
            muscle_group(QUADS, "Quads", BodyRegion::Lower),
        ],
        contributions: vec![
            contribution(BENCH_PRESS, CHEST, 70.0),
            contribution(BENCH_PRESS, TRICEPS, 30.0),
            contribution(SQUAT, QUADS, 80.0),
        ],
        ..HistoryImport::default()
    };
    for (id, days_ago) in [(1_i64, 6_i64), (2, 3)] {
        let session_id = SessionId(id);
        let date = today() - Duration::days(days_ago);
        export.sessions.push(WorkoutSession {
            id: session_id,
            user_id,
            date,
            completed: true,
            duration_minutes: None,
            total_volume: 0.0,
        });
        export.exercise_logs.push(ExerciseLog {
            session_id,
            exercise_id: BENCH_PRESS,
            sets: 3,
            sets_data: Some(sets_payload(&[
                (80.0, 8, Some(6.0), true),
                (80.0, 8, Some(6.5), true),
                (80.0, 8, Some(7.0), true),
            ])),
        });
        export
            .feedback
            .push(feedback_with_readiness(user_id, session_id, date, 7));
    }

    let path = dir.join("history.json");
    std::fs::write(&path, serde_json::to_string_pretty(&export).unwrap()).unwrap();
    path
}

#[test]
fn test_cli_help_lists_commands() {
    let output = Command::new(env!("CARGO_BIN_EXE_periodization-cli"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in [
        "migrate",
        "import",
        "recommend",
        "fatigue",
        "progress",
        "advance",
        "landmarks",
        "override-landmark",
    ] {
        assert!(stdout.contains(command), "help should mention '{command}'");
    }
}

#[test]
fn test_cli_rejects_malformed_user_id() {
    let dir = TempDir::new().unwrap();
    let (exit_code, _stdout, stderr) =
        run_cli(&dir.path().join("engine.db"), &["recommend", "--user", "someone"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("--user"));
}

#[test]
fn test_cli_import_then_analyze() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("engine.db");
    let user_id = Uuid::new_v4();
    let user = user_id.to_string();
    let export = write_export(dir.path(), user_id);
    let as_of = today().to_string();

    let migrated = run_json(&database, &["migrate"]);
    assert!(migrated["migrated"].is_string());

    let imported = run_json(&database, &["import", export.to_str().unwrap()]);
    assert_eq!(imported["sessions"], 2);
    assert_eq!(imported["feedback"], 2);

    let report = run_json(&database, &["recommend", "--user", &user, "--as-of", &as_of]);
    assert_eq!(report["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(report["readiness"], 7.0);

    let fatigue = run_json(&database, &["fatigue", "--user", &user, "--as-of", &as_of]);
    assert_eq!(fatigue["session_count"], 2);
    assert_eq!(fatigue["deload_recommended"], false);

    let target = run_json(
        &database,
        &[
            "progress",
            "--user",
            &user,
            "--exercise",
            "100",
            "--as-of",
            &as_of,
        ],
    );
    assert_eq!(target["rule"], "low_effort_increase");
    assert_eq!(target["target_weight"], 82.0);

    let advance = run_json(&database, &["advance", "--user", &user, "--as-of", &as_of]);
    assert_eq!(advance["transition"]["state"]["current_week"], 2);

    let landmarks = run_json(&database, &["landmarks", "--user", &user]);
    assert_eq!(landmarks.as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_override_validation_fails_the_command() {
    let dir = TempDir::new().unwrap();
    let database = dir.path().join("engine.db");
    let user_id = Uuid::new_v4();
    let user = user_id.to_string();
    let export = write_export(dir.path(), user_id);
    run_json(&database, &["import", export.to_str().unwrap()]);

    let updated = run_json(
        &database,
        &["override-landmark", "--user", &user, "--muscle-group", "1", "--mav", "18"],
    );
    assert_eq!(updated["mav"], 18);

    let (exit_code, stdout, _stderr) = run_cli(
        &database,
        &["override-landmark", "--user", &user, "--muscle-group", "1", "--mev", "30"],
    );
    assert_ne!(exit_code, 0);
    assert!(stdout.is_empty());
}
