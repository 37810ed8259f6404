// ABOUTME: Integration tests for the SQLite store on disk and the engine running over it
// ABOUTME: Migration idempotence, bulk import, persistence across reconnects, and parity with memory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{
    contribution, feedback_with_readiness, init_test_logging, muscle_group, sets_payload, today,
    History, BENCH_PRESS, CABLE_FLY, CHEST, QUADS, SQUAT, TRICEPS,
};
use periodization_engine::config::{DatabaseUrl, IntelligenceConfig};
use periodization_engine::database::{HistoryImport, SqliteStore, TrainingStore};
use periodization_engine::engine::PeriodizationEngine;
use periodization_engine::models::{
    BodyRegion, ExerciseLog, LandmarkPatch, MesocyclePhase, PriorPrescription, SessionId,
    WorkoutSession,
};
use periodization_engine::ErrorCode;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

async fn open(path: &Path) -> SqliteStore {
    let url = DatabaseUrl::SQLite {
        path: path.to_path_buf(),
    };
    let store = SqliteStore::connect(&url, 2).await.unwrap();
    store.migrate().await.unwrap();
    store
}

/// Two weeks of bench and squat sessions with feedback
fn sample_history(user_id: Uuid) -> HistoryImport {
    let mut import = HistoryImport {
        muscle_groups: vec![
            muscle_group(CHEST, "Chest", BodyRegion::Upper),
            muscle_group(TRICEPS, "Triceps", BodyRegion::Upper),
            muscle_group(QUADS, "Quads", BodyRegion::Lower),
        ],
        contributions: vec![
            contribution(BENCH_PRESS, CHEST, 70.0),
            contribution(BENCH_PRESS, TRICEPS, 30.0),
            contribution(SQUAT, QUADS, 80.0),
            contribution(CABLE_FLY, CHEST, 100.0),
            contribution(CABLE_FLY, TRICEPS, 0.0),
        ],
        ..HistoryImport::default()
    };

    for (id, days_ago) in [(1_i64, 12_i64), (2, 8), (3, 5), (4, 2)] {
        let session_id = SessionId(id);
        let date = today() - Duration::days(days_ago);
        import.sessions.push(WorkoutSession {
            id: session_id,
            user_id,
            date,
            completed: true,
            duration_minutes: Some(55),
            total_volume: 0.0,
        });
        import.exercise_logs.push(ExerciseLog {
            session_id,
            exercise_id: BENCH_PRESS,
            sets: 3,
            sets_data: Some(sets_payload(&[
                (100.0, 8, Some(6.5), true),
                (100.0, 8, Some(6.5), true),
                (100.0, 7, Some(6.5), true),
            ])),
        });
        import.exercise_logs.push(ExerciseLog {
            session_id,
            exercise_id: SQUAT,
            sets: 4,
            sets_data: None,
        });
        import
            .feedback
            .push(feedback_with_readiness(user_id, session_id, date, 6));
    }
    import
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = open(&dir.path().join("engine.db")).await;

    store.migrate().await.unwrap();
    store.migrate().await.unwrap();
    assert!(store.list_muscle_groups().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_import_history_is_readable_through_the_contract() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = open(&dir.path().join("engine.db")).await;
    let user_id = Uuid::new_v4();
    let import = sample_history(user_id);

    let imported = store.import_history(&import).await.unwrap();
    assert_eq!(imported, import.len());

    let groups = store.list_muscle_groups().await.unwrap();
    assert_eq!(groups.len(), 3);
    let bench = store
        .get_exercise_muscle_contributions(BENCH_PRESS)
        .await
        .unwrap();
    assert_eq!(bench.len(), 2);

    let sessions = store
        .list_completed_sessions(user_id, today() - Duration::days(7))
        .await
        .unwrap();
    let ids: Vec<_> = sessions.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![SessionId(3), SessionId(4)], "oldest first");

    let logs = store.list_set_records(SessionId(4)).await.unwrap();
    assert_eq!(logs.len(), 2);
    let bench_log = logs.iter().find(|l| l.exercise_id == BENCH_PRESS).unwrap();
    assert_eq!(bench_log.decode_sets().unwrap().unwrap().len(), 3);

    let feedback = store
        .list_feedback(user_id, today() - Duration::days(14))
        .await
        .unwrap();
    assert_eq!(feedback.len(), 4);

    // Re-importing replaces rows instead of duplicating them
    store.import_history(&import).await.unwrap();
    assert_eq!(store.list_muscle_groups().await.unwrap().len(), 3);
    assert_eq!(
        store
            .list_feedback(user_id, today() - Duration::days(14))
            .await
            .unwrap()
            .len(),
        4
    );
}

#[tokio::test]
async fn test_engine_state_survives_reconnect() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.db");
    let user_id = Uuid::new_v4();

    {
        let store = open(&path).await;
        store.import_history(&sample_history(user_id)).await.unwrap();
        let engine = PeriodizationEngine::new(Arc::new(store), IntelligenceConfig::default());

        engine.advance_mesocycle_as_of(user_id, today()).await.unwrap();
        engine
            .override_landmark(
                user_id,
                CHEST,
                &LandmarkPatch {
                    mrv: Some(24),
                    ..LandmarkPatch::default()
                },
            )
            .await
            .unwrap();
    }

    let store = open(&path).await;
    let state = store.get_mesocycle_state(user_id).await.unwrap().unwrap();
    assert_eq!(state.current_week, 2);
    assert_eq!(state.phase, MesocyclePhase::Accumulation);
    assert_eq!(state.start_date, today());

    let landmarks = store.get_landmarks(user_id).await.unwrap();
    assert_eq!(landmarks.len(), 3);
    let chest = landmarks.iter().find(|l| l.muscle_group_id == CHEST).unwrap();
    assert_eq!(chest.mrv, 24);
}

#[tokio::test]
async fn test_rejected_override_leaves_sqlite_rows_untouched() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = open(&dir.path().join("engine.db")).await;
    let user_id = Uuid::new_v4();
    store.import_history(&sample_history(user_id)).await.unwrap();
    let store = Arc::new(store);
    let engine = PeriodizationEngine::new(store.clone(), IntelligenceConfig::default());
    engine.landmarks(user_id).await.unwrap();

    let error = engine
        .override_landmark(
            user_id,
            QUADS,
            &LandmarkPatch {
                mav: Some(30),
                ..LandmarkPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let quads = store
        .get_landmarks(user_id)
        .await
        .unwrap()
        .into_iter()
        .find(|l| l.muscle_group_id == QUADS)
        .unwrap();
    assert_eq!((quads.mv, quads.mev, quads.mav, quads.mrv), (6, 8, 15, 20));
}

#[tokio::test]
async fn test_sqlite_and_memory_stores_agree() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let sqlite = open(&dir.path().join("engine.db")).await;
    let history = History::new().await;
    let import = sample_history(history.user_id);
    sqlite.import_history(&import).await.unwrap();
    history.store.import_history(import).await;

    let on_disk = PeriodizationEngine::new(Arc::new(sqlite), IntelligenceConfig::default());
    let in_memory = history.engine();
    let user_id = history.user_id;

    let disk_report = on_disk
        .compute_volume_recommendations_as_of(user_id, None, today())
        .await;
    let memory_report = in_memory
        .compute_volume_recommendations_as_of(user_id, None, today())
        .await;
    assert_eq!(disk_report.readiness, memory_report.readiness);
    assert_eq!(
        disk_report.recommendations.len(),
        memory_report.recommendations.len()
    );
    for (disk, memory) in disk_report
        .recommendations
        .iter()
        .zip(&memory_report.recommendations)
    {
        assert_eq!(disk.muscle_group_id, memory.muscle_group_id);
        assert_eq!(disk.current_volume, memory.current_volume);
        assert_eq!(disk.category, memory.category);
        assert_eq!(disk.target_sets, memory.target_sets);
    }

    let disk_target = on_disk
        .compute_progression_target_as_of(user_id, BENCH_PRESS, &PriorPrescription::default(), today())
        .await
        .unwrap();
    let memory_target = in_memory
        .compute_progression_target_as_of(user_id, BENCH_PRESS, &PriorPrescription::default(), today())
        .await
        .unwrap();
    assert_eq!(disk_target, memory_target);
    assert!((disk_target.target_weight - 102.5).abs() < 1e-9);

    let disk_fatigue = on_disk
        .compute_fatigue_analysis_as_of(user_id, 14, today())
        .await;
    assert_eq!(disk_fatigue.session_count, 4);
    assert!((disk_fatigue.mean_fatigue - 4.0).abs() < 1e-9);
}
