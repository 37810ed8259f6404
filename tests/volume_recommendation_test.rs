// ABOUTME: Integration tests for weekly volume counting and volume recommendations
// ABOUTME: Covers rule selection, contribution handling, payload fallbacks, and skipped items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{
    feedback_with_readiness, init_test_logging, sets_payload, today, History, BENCH_PRESS,
    CABLE_FLY, CHEST, QUADS, SQUAT, TRICEPS,
};
use periodization_engine::database::TrainingStore;
use periodization_engine::models::{
    ExerciseLog, FeedbackMode, RecommendationCategory, SessionId, WorkoutSession,
};
use uuid::Uuid;

#[tokio::test]
async fn test_no_history_increases_every_group_to_mev() {
    init_test_logging();
    let history = History::new().await;
    let engine = history.engine();

    let report = engine
        .compute_volume_recommendations_as_of(history.user_id, None, today())
        .await;

    assert_eq!(report.feedback_mode, FeedbackMode::WithoutFeedback);
    assert_eq!(report.recommendations.len(), 3);
    assert_eq!(report.skipped_count(), 0);

    let chest = report.for_muscle_group(CHEST).unwrap();
    assert_eq!(chest.category, RecommendationCategory::Increase);
    assert!((chest.adjustment_percent - 100.0).abs() < f64::EPSILON);
    assert_eq!(chest.confidence, 5);
    assert_eq!(chest.current_volume, 0);
    assert_eq!(chest.target_sets, 10, "chest MEV seeds at 10");
    assert!(!chest.reason.is_empty());

    // Defaults were seeded and persisted on first use
    let landmarks = history.store.get_landmarks(history.user_id).await.unwrap();
    assert_eq!(landmarks.len(), 3);
    assert!(landmarks.iter().all(|l| l.mv <= l.mev && l.mev <= l.mav && l.mav <= l.mrv));
}

#[tokio::test]
async fn test_high_readiness_at_mav_maintains() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(today() - Duration::days(1), &[(BENCH_PRESS, 8, None)])
        .await;
    history
        .session(today() - Duration::days(3), &[(BENCH_PRESS, 8, None)])
        .await;

    let feedback = feedback_with_readiness(history.user_id, SessionId(99), today(), 9);
    let report = history
        .engine()
        .compute_volume_recommendations_as_of(history.user_id, Some(&feedback), today())
        .await;

    assert_eq!(report.feedback_mode, FeedbackMode::WithFeedback);
    assert_eq!(report.readiness, Some(9.0));

    let chest = report.for_muscle_group(CHEST).unwrap();
    assert_eq!(chest.current_volume, 16, "chest MAV seeds at 16");
    assert_eq!(chest.category, RecommendationCategory::Maintain);
    assert_eq!(chest.confidence, 9);
    assert!(chest.adjustment_percent.abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_window_feedback_drives_readiness_when_none_supplied() {
    init_test_logging();
    let mut history = History::new().await;
    history.feedback(today() - Duration::days(2), 2).await;
    history.feedback(today() - Duration::days(1), 4).await;
    // Outside the 7-day window
    history.feedback(today() - Duration::days(12), 9).await;

    let report = history
        .engine()
        .compute_volume_recommendations_as_of(history.user_id, None, today())
        .await;

    assert_eq!(report.feedback_mode, FeedbackMode::WithFeedback);
    assert_eq!(report.readiness, Some(3.0));

    let quads = report.for_muscle_group(QUADS).unwrap();
    assert_eq!(quads.category, RecommendationCategory::Deload);
    assert_eq!(quads.confidence, 9);
    assert_eq!(report.deload_adjustment(), Some(-30.0));
}

#[tokio::test]
async fn test_zero_contribution_never_counts() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(today() - Duration::days(1), &[(CABLE_FLY, 5, None)])
        .await;
    let engine = history.engine();

    assert_eq!(
        engine.weekly_volume(history.user_id, CHEST, today()).await.unwrap(),
        5
    );
    assert_eq!(
        engine
            .weekly_volume(history.user_id, TRICEPS, today())
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_set_payload_is_authoritative_and_malformed_falls_back() {
    init_test_logging();
    let mut history = History::new().await;
    let detailed = sets_payload(&[
        (100.0, 8, Some(7.0), true),
        (100.0, 8, Some(7.5), true),
        (100.0, 6, Some(9.0), true),
        (100.0, 2, None, false),
    ]);
    // Coarse counter says 5 but only 3 sets were completed
    history
        .session(today() - Duration::days(1), &[(BENCH_PRESS, 5, Some(detailed))])
        .await;
    history
        .session(
            today() - Duration::days(2),
            &[(SQUAT, 4, Some("{not json".to_owned()))],
        )
        .await;

    let engine = history.engine();
    assert_eq!(
        engine.weekly_volume(history.user_id, CHEST, today()).await.unwrap(),
        3
    );
    assert_eq!(
        engine.weekly_volume(history.user_id, QUADS, today()).await.unwrap(),
        4
    );
}

#[tokio::test]
async fn test_window_and_user_scoping() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(today() - Duration::days(10), &[(BENCH_PRESS, 6, None)])
        .await;
    history
        .session(today() - Duration::days(7), &[(BENCH_PRESS, 2, None)])
        .await;

    // Another user's session and this user's unfinished session never count
    let stranger = Uuid::new_v4();
    for (id, user_id, completed) in [(500, stranger, true), (501, history.user_id, false)] {
        history
            .store
            .insert_session(WorkoutSession {
                id: SessionId(id),
                user_id,
                date: today(),
                completed,
                duration_minutes: None,
                total_volume: 0.0,
            })
            .await;
        history
            .store
            .insert_exercise_log(ExerciseLog {
                session_id: SessionId(id),
                exercise_id: BENCH_PRESS,
                sets: 9,
                sets_data: None,
            })
            .await;
    }

    let engine = history.engine();
    // Only the session exactly 7 days back is inside the window
    assert_eq!(
        engine.weekly_volume(history.user_id, CHEST, today()).await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_failed_contribution_lookup_is_skipped() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(
            today() - Duration::days(1),
            &[(BENCH_PRESS, 3, None), (SQUAT, 5, None)],
        )
        .await;
    history.store.fail_contributions_for(SQUAT).await;

    let report = history
        .engine()
        .compute_volume_recommendations_as_of(history.user_id, None, today())
        .await;

    assert_eq!(report.recommendations.len(), 3);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.skipped[0].id, format!("exercise:{SQUAT}"));
    assert_eq!(report.for_muscle_group(CHEST).unwrap().current_volume, 3);
    assert_eq!(report.for_muscle_group(QUADS).unwrap().current_volume, 0);
}

#[tokio::test]
async fn test_unreadable_session_logs_are_skipped() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(today() - Duration::days(1), &[(BENCH_PRESS, 3, None)])
        .await;
    let broken = history
        .session(today() - Duration::days(2), &[(BENCH_PRESS, 4, None)])
        .await;
    history.store.fail_set_records_for(broken).await;

    let report = history
        .engine()
        .compute_volume_recommendations_as_of(history.user_id, None, today())
        .await;

    assert_eq!(report.for_muscle_group(CHEST).unwrap().current_volume, 3);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(report.skipped[0].id, format!("session:{broken}"));
}

#[tokio::test]
async fn test_muscle_group_listing_failure_yields_empty_report() {
    init_test_logging();
    let history = History::new().await;
    history.store.fail_muscle_group_listing().await;

    let report = history
        .engine()
        .compute_volume_recommendations_as_of(history.user_id, None, today())
        .await;

    assert!(report.recommendations.is_empty());
    assert_eq!(report.skipped_count(), 0);
    assert_eq!(report.user_id, history.user_id);
}

#[tokio::test]
async fn test_feedback_failure_falls_back_to_volume_rules() {
    init_test_logging();
    let mut history = History::new().await;
    history.feedback(today() - Duration::days(1), 9).await;
    history.store.fail_feedback_listing().await;

    let report = history
        .engine()
        .compute_volume_recommendations_as_of(history.user_id, None, today())
        .await;

    assert_eq!(report.feedback_mode, FeedbackMode::WithoutFeedback);
    assert_eq!(report.recommendations.len(), 3);
}

#[tokio::test]
async fn test_landmark_seeding_failure_skips_groups() {
    init_test_logging();
    let history = History::new().await;
    history.store.fail_landmark_writes().await;

    let report = history
        .engine()
        .compute_volume_recommendations_as_of(history.user_id, None, today())
        .await;

    assert!(report.recommendations.is_empty());
    assert_eq!(report.skipped_count(), 3);
}
