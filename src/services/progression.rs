// ABOUTME: Next-session load targets built from recent occurrences of an exercise
// ABOUTME: Only sessions with per-set detail become occurrences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::TrainingStore;
use crate::errors::AppResult;
use crate::models::{ExerciseId, PriorPrescription, ProgressionTarget, UserId};
use chrono::NaiveDate;
use periodization_intelligence::{ExerciseOccurrence, LoadProgressionTracker, VolumeAggregator};
use tracing::{debug, warn};

/// Most recent occurrences of an exercise within the tracker's lookback, newest first
///
/// Logs carrying only the coarse set counter say nothing about load or
/// effort and are passed over, as are logs with malformed payloads.
///
/// # Errors
///
/// Returns an error if a session or exercise log listing fails
pub async fn recent_occurrences(
    store: &dyn TrainingStore,
    tracker: &LoadProgressionTracker,
    user_id: UserId,
    exercise_id: ExerciseId,
    today: NaiveDate,
) -> AppResult<Vec<ExerciseOccurrence>> {
    let config = tracker.config();
    let since = VolumeAggregator::window_start(today, config.lookback_days);
    let sessions = store.list_completed_sessions(user_id, since).await?;

    let mut occurrences = Vec::with_capacity(config.recent_occurrences);
    for session in sessions.iter().rev().filter(|s| s.date <= today) {
        if occurrences.len() >= config.recent_occurrences {
            break;
        }

        let logs = store.list_set_records(session.id).await?;
        let Some(log) = logs.iter().find(|log| log.exercise_id == exercise_id) else {
            continue;
        };

        match log.decode_sets() {
            Ok(Some(records)) => {
                if let Some(occurrence) =
                    ExerciseOccurrence::from_sets(session.id, session.date, &records)
                {
                    occurrences.push(occurrence);
                }
            }
            Ok(None) => debug!(
                session_id = %session.id,
                exercise_id = %exercise_id,
                "No per-set detail, occurrence not usable for progression"
            ),
            Err(e) => warn!(
                session_id = %session.id,
                exercise_id = %exercise_id,
                error = %e,
                "Malformed sets payload, occurrence ignored for progression"
            ),
        }
    }

    Ok(occurrences)
}

/// Target for the next occurrence of an exercise
///
/// # Errors
///
/// Returns an error if the history cannot be read
pub async fn progression_target(
    store: &dyn TrainingStore,
    tracker: &LoadProgressionTracker,
    user_id: UserId,
    exercise_id: ExerciseId,
    prior: &PriorPrescription,
    today: NaiveDate,
) -> AppResult<ProgressionTarget> {
    let occurrences = recent_occurrences(store, tracker, user_id, exercise_id, today).await?;
    let target = tracker.target(exercise_id, prior, &occurrences);
    debug!(
        user_id = %user_id,
        exercise_id = %exercise_id,
        rule = ?target.rule,
        target_weight = target.target_weight,
        target_sets = target.target_sets,
        "Computed progression target"
    );
    Ok(target)
}
