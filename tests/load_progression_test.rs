// ABOUTME: Integration tests for next-session load targets over stored set payloads
// ABOUTME: Rule selection, lookback and occurrence limits, coarse and malformed logs, store errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Duration;
use common::{init_test_logging, sets_payload, today, History, BENCH_PRESS, SQUAT};
use periodization_engine::models::{PriorPrescription, ProgressionRuleKind};

/// Three completed sets at `weight`, all at `rpe`
fn straight_sets(weight: f64, rpe: Option<f64>) -> Option<String> {
    Some(sets_payload(&[
        (weight, 8, rpe, true),
        (weight, 8, rpe, true),
        (weight, 8, rpe, true),
    ]))
}

fn is_quarter_multiple(weight: f64) -> bool {
    ((weight * 4.0) - (weight * 4.0).round()).abs() < 1e-9
}

#[tokio::test]
async fn test_low_effort_history_increases_load() {
    init_test_logging();
    let mut history = History::new().await;
    for (days_ago, rpe) in [(9, 6.5), (5, 6.8), (2, 6.2)] {
        history
            .session(
                today() - Duration::days(days_ago),
                &[(BENCH_PRESS, 3, straight_sets(100.0, Some(rpe)))],
            )
            .await;
    }

    let target = history
        .engine()
        .compute_progression_target_as_of(
            history.user_id,
            BENCH_PRESS,
            &PriorPrescription::default(),
            today(),
        )
        .await
        .unwrap();

    assert_eq!(target.rule, ProgressionRuleKind::LowEffortIncrease);
    assert!((target.target_weight - 102.5).abs() < 1e-9);
    assert_eq!(target.target_sets, 3);
    assert_eq!(target.occurrences_considered, 3);
    assert!(target.mean_rpe.is_some_and(|rpe| (rpe - 6.5).abs() < 1e-9));
}

#[tokio::test]
async fn test_only_most_recent_occurrences_count() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(
            today() - Duration::days(12),
            &[(BENCH_PRESS, 3, straight_sets(80.0, Some(9.5)))],
        )
        .await;
    for days_ago in [8, 5, 2] {
        history
            .session(
                today() - Duration::days(days_ago),
                &[(BENCH_PRESS, 3, straight_sets(90.0, Some(7.5)))],
            )
            .await;
    }

    let target = history
        .engine()
        .compute_progression_target_as_of(
            history.user_id,
            BENCH_PRESS,
            &PriorPrescription::default(),
            today(),
        )
        .await
        .unwrap();

    assert_eq!(target.rule, ProgressionRuleKind::ModerateEffortIncrease);
    assert_eq!(target.occurrences_considered, 3);
    // 90 * 1.0125 = 91.125 -> 91.0
    assert!((target.target_weight - 91.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_no_history_starts_from_base_weight() {
    init_test_logging();
    let history = History::new().await;
    let engine = history.engine();

    let target = engine
        .compute_progression_target_as_of(
            history.user_id,
            BENCH_PRESS,
            &PriorPrescription::default(),
            today(),
        )
        .await
        .unwrap();
    assert_eq!(target.rule, ProgressionRuleKind::NoHistory);
    assert!((target.target_weight - 20.5).abs() < 1e-9);
    assert_eq!(target.occurrences_considered, 0);

    let prior = PriorPrescription {
        base_weight: Some(41.0),
        ..PriorPrescription::default()
    };
    let target = engine
        .compute_progression_target_as_of(history.user_id, BENCH_PRESS, &prior, today())
        .await
        .unwrap();
    assert!((target.target_weight - 42.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_coarse_and_malformed_logs_are_not_occurrences() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(
            today() - Duration::days(10),
            &[(BENCH_PRESS, 3, straight_sets(60.0, Some(9.0)))],
        )
        .await;
    history
        .session(today() - Duration::days(6), &[(BENCH_PRESS, 5, None)])
        .await;
    history
        .session(
            today() - Duration::days(3),
            &[(BENCH_PRESS, 4, Some("[{\"weight\": \"heavy\"".to_owned()))],
        )
        .await;

    let target = history
        .engine()
        .compute_progression_target_as_of(
            history.user_id,
            BENCH_PRESS,
            &PriorPrescription::default(),
            today(),
        )
        .await
        .unwrap();

    assert_eq!(target.occurrences_considered, 1);
    assert_eq!(target.rule, ProgressionRuleKind::HighEffortAddSet);
    assert!((target.target_weight - 60.0).abs() < 1e-9);
    assert_eq!(target.target_sets, 4);
}

#[tokio::test]
async fn test_high_effort_holds_at_set_ceiling() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(
            today() - Duration::days(2),
            &[(BENCH_PRESS, 4, straight_sets(100.0, Some(9.0)))],
        )
        .await;

    let prior = PriorPrescription {
        sets: 4,
        ..PriorPrescription::default()
    };
    let target = history
        .engine()
        .compute_progression_target_as_of(history.user_id, BENCH_PRESS, &prior, today())
        .await
        .unwrap();

    assert_eq!(target.rule, ProgressionRuleKind::HighEffortHold);
    assert_eq!(target.target_sets, 4);
    assert!((target.target_weight - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_two_set_prescription_uses_its_own_rule() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(
            today() - Duration::days(2),
            &[(
                BENCH_PRESS,
                2,
                Some(sets_payload(&[
                    (60.0, 8, Some(7.5), true),
                    (60.0, 7, Some(7.5), true),
                ])),
            )],
        )
        .await;

    let prior = PriorPrescription {
        sets: 2,
        ..PriorPrescription::default()
    };
    let target = history
        .engine()
        .compute_progression_target_as_of(history.user_id, BENCH_PRESS, &prior, today())
        .await
        .unwrap();

    assert_eq!(target.rule, ProgressionRuleKind::TwoSetIncrease);
    assert!((target.target_weight - 61.5).abs() < 1e-9);
    assert_eq!(target.target_sets, 2);
}

#[tokio::test]
async fn test_heaviest_completed_set_is_the_reference_weight() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(
            today() - Duration::days(2),
            &[(
                BENCH_PRESS,
                3,
                Some(sets_payload(&[
                    (95.0, 8, Some(6.0), true),
                    (100.0, 6, Some(6.5), true),
                    (110.0, 2, Some(10.0), false),
                ])),
            )],
        )
        .await;

    let target = history
        .engine()
        .compute_progression_target_as_of(
            history.user_id,
            BENCH_PRESS,
            &PriorPrescription::default(),
            today(),
        )
        .await
        .unwrap();

    assert_eq!(target.rule, ProgressionRuleKind::LowEffortIncrease);
    assert!((target.target_weight - 102.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_history_outside_lookback_or_other_exercises_is_ignored() {
    init_test_logging();
    let mut history = History::new().await;
    history
        .session(
            today() - Duration::days(70),
            &[(BENCH_PRESS, 3, straight_sets(100.0, Some(6.0)))],
        )
        .await;
    history
        .session(
            today() - Duration::days(2),
            &[(SQUAT, 3, straight_sets(140.0, Some(6.0)))],
        )
        .await;

    let target = history
        .engine()
        .compute_progression_target_as_of(
            history.user_id,
            BENCH_PRESS,
            &PriorPrescription::default(),
            today(),
        )
        .await
        .unwrap();

    assert_eq!(target.rule, ProgressionRuleKind::NoHistory);
    assert_eq!(target.occurrences_considered, 0);
}

#[tokio::test]
async fn test_targets_are_quarter_multiples() {
    init_test_logging();
    let mut history = History::new().await;
    let odd_weights = [37.3, 61.7, 83.9, 102.1];
    for (offset, weight) in odd_weights.iter().enumerate() {
        history
            .session(
                today() - Duration::days(i64::try_from(offset).unwrap() + 1),
                &[(BENCH_PRESS, 3, straight_sets(*weight, Some(7.2)))],
            )
            .await;
    }
    let engine = history.engine();

    for sets in 1..=5 {
        let prior = PriorPrescription {
            sets,
            ..PriorPrescription::default()
        };
        let target = engine
            .compute_progression_target_as_of(history.user_id, BENCH_PRESS, &prior, today())
            .await
            .unwrap();
        assert!(
            is_quarter_multiple(target.target_weight),
            "{} is not a multiple of 0.25",
            target.target_weight
        );
    }
}

#[tokio::test]
async fn test_unreadable_set_records_propagate() {
    init_test_logging();
    let mut history = History::new().await;
    let session = history
        .session(
            today() - Duration::days(2),
            &[(BENCH_PRESS, 3, straight_sets(100.0, Some(7.0)))],
        )
        .await;
    history.store.fail_set_records_for(session).await;

    let result = history
        .engine()
        .compute_progression_target_as_of(
            history.user_id,
            BENCH_PRESS,
            &PriorPrescription::default(),
            today(),
        )
        .await;

    assert!(result.is_err());
}
