// ABOUTME: Integration tests for fatigue analysis over stored feedback
// ABOUTME: Deload flag boundaries, trend direction, window scoping, and neutral fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{init_test_logging, today, History};
use periodization_engine::models::{AutoRegulationFeedback, SessionId};
use periodization_intelligence::FatigueTrend;

/// Record feedback of the given readiness on consecutive days ending yesterday
async fn history_with_readiness(readiness: &[u8]) -> History {
    let mut history = History::new().await;
    let count = i64::try_from(readiness.len()).unwrap();
    for (offset, value) in readiness.iter().enumerate() {
        let date = today() - Duration::days(count - i64::try_from(offset).unwrap());
        history.feedback(date, *value).await;
    }
    history
}

#[tokio::test]
async fn test_no_feedback_is_neutral() {
    init_test_logging();
    let history = History::new().await;

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;

    assert_eq!(analysis.session_count, 0);
    assert!((analysis.mean_fatigue - 5.0).abs() < f64::EPSILON);
    assert!((analysis.mean_readiness - 5.0).abs() < f64::EPSILON);
    assert_eq!(analysis.trend, FatigueTrend::Stable);
    assert!(!analysis.deload_recommended);
    assert!(analysis.days_until_deload.is_none());
}

#[tokio::test]
async fn test_mean_fatigue_at_threshold_flags_deload() {
    init_test_logging();
    // Readiness 3 is fatigue 7
    let history = history_with_readiness(&[3, 3, 3]).await;

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;

    assert!((analysis.mean_fatigue - 7.0).abs() < 1e-9);
    assert!(analysis.deload_recommended);
    assert_eq!(analysis.days_until_deload, Some(7));
}

#[tokio::test]
async fn test_two_of_last_three_flags_deload_below_mean_threshold() {
    init_test_logging();
    // Fatigue [2, 2, 2, 7, 7]: mean 4, two of the last three at 7
    let history = history_with_readiness(&[8, 8, 8, 3, 3]).await;

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;

    assert!((analysis.mean_fatigue - 4.0).abs() < 1e-9);
    assert!(analysis.deload_recommended);
    assert_eq!(analysis.days_until_deload, Some(4), "clamped into 3..=7");
}

#[tokio::test]
async fn test_one_of_last_three_does_not_flag_deload() {
    init_test_logging();
    // Fatigue [7, 7, 2, 2, 7]: mean 5, one of the last three at 7
    let history = history_with_readiness(&[3, 3, 8, 8, 3]).await;

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;

    assert!(analysis.mean_fatigue < 7.0);
    assert!(!analysis.deload_recommended);
    assert!(analysis.days_until_deload.is_none());
}

#[tokio::test]
async fn test_rising_fatigue_is_declining_trend() {
    init_test_logging();
    let history = history_with_readiness(&[8, 8, 4, 4]).await;

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;
    assert_eq!(analysis.trend, FatigueTrend::Declining);

    let improving = history_with_readiness(&[4, 4, 8, 8]).await;
    let analysis = improving
        .engine()
        .compute_fatigue_analysis_as_of(improving.user_id, 14, today())
        .await;
    assert_eq!(analysis.trend, FatigueTrend::Improving);
}

#[tokio::test]
async fn test_window_days_limits_feedback() {
    init_test_logging();
    let mut history = History::new().await;
    history.feedback(today() - Duration::days(20), 2).await;
    history.feedback(today() - Duration::days(2), 8).await;
    let engine = history.engine();

    let recent = engine
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;
    assert_eq!(recent.session_count, 1);

    let wide = engine
        .compute_fatigue_analysis_as_of(history.user_id, 30, today())
        .await;
    assert_eq!(wide.session_count, 2);
}

#[tokio::test]
async fn test_out_of_scale_ratings_keep_fatigue_in_range() {
    init_test_logging();
    let history = History::new().await;
    for (id, rating) in [(1, 0_u8), (2, 12), (3, 255)] {
        history
            .store
            .insert_feedback(AutoRegulationFeedback {
                session_id: SessionId(id),
                user_id: history.user_id,
                date: today() - Duration::days(id),
                pump_quality: rating,
                muscle_soreness: rating,
                perceived_effort: rating,
                energy_level: rating,
                sleep_quality: rating,
            })
            .await;
    }

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;

    assert_eq!(analysis.session_count, 3);
    assert!((0.0..=10.0).contains(&analysis.mean_fatigue));
    for score in &analysis.sessions {
        assert!((0.0..=10.0).contains(&score.fatigue));
        assert!((0.0..=10.0).contains(&score.readiness));
    }
}

#[tokio::test]
async fn test_store_failure_degrades_to_neutral() {
    init_test_logging();
    let history = history_with_readiness(&[2, 2, 2]).await;
    history.store.fail_feedback_listing().await;

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;

    assert!(analysis.is_neutral());
    assert!(!analysis.deload_recommended);
}

#[tokio::test]
async fn test_feedback_after_reference_day_is_ignored() {
    init_test_logging();
    let mut history = History::new().await;
    history.feedback(today() - Duration::days(2), 8).await;
    history.feedback(today() + Duration::days(3), 1).await;

    let analysis = history
        .engine()
        .compute_fatigue_analysis_as_of(history.user_id, 14, today())
        .await;

    assert_eq!(analysis.session_count, 1);
    assert!((analysis.mean_fatigue - 2.0).abs() < 1e-9);
}
