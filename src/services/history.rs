// ABOUTME: History accessor turning stored sessions and logs into countable completed sets
// ABOUTME: Caches contribution lookups per call and skips items whose lookups fail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::TrainingStore;
use crate::errors::AppResult;
use crate::models::{ExerciseId, SkippedItem, UserId, WorkoutSession};
use chrono::NaiveDate;
use periodization_intelligence::{CompletedSets, ContributionIndex, VolumeAggregator};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Completed sets of a window plus the contribution rows needed to count them
#[derive(Debug, Default)]
pub struct VolumeWindow {
    /// Sessions inside the window
    pub sessions: Vec<WorkoutSession>,
    /// Completed sets per exercise log
    pub sets: Vec<CompletedSets>,
    /// Contributions of every exercise seen in the window
    pub index: ContributionIndex,
    /// Sessions or exercises whose lookups failed
    pub skipped: Vec<SkippedItem>,
}

/// Load every completed set of a user dated within `since..=until`
///
/// # Errors
///
/// Returns an error only when the session listing itself fails. Failed
/// per-session and per-exercise lookups are logged and reported in `skipped`.
pub async fn load_volume_window(
    store: &dyn TrainingStore,
    user_id: UserId,
    since: NaiveDate,
    until: NaiveDate,
) -> AppResult<VolumeWindow> {
    let mut sessions = store.list_completed_sessions(user_id, since).await?;
    sessions.retain(|session| session.date <= until);
    let mut window = VolumeWindow::default();

    for session in &sessions {
        match store.list_set_records(session.id).await {
            Ok(logs) => window.sets.extend(VolumeAggregator::resolve(&logs)),
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    session_id = %session.id,
                    error = %e,
                    "Skipping session with unreadable exercise logs"
                );
                window.skipped.push(SkippedItem {
                    id: format!("session:{}", session.id),
                    reason: e.message,
                });
            }
        }
    }

    let exercises: BTreeSet<ExerciseId> = window.sets.iter().map(|s| s.exercise_id).collect();
    for exercise_id in exercises {
        match store.get_exercise_muscle_contributions(exercise_id).await {
            Ok(rows) => window.index.insert(exercise_id, &rows),
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    exercise_id = %exercise_id,
                    error = %e,
                    "Skipping exercise with unreadable contributions"
                );
                window.skipped.push(SkippedItem {
                    id: format!("exercise:{exercise_id}"),
                    reason: e.message,
                });
            }
        }
    }

    debug!(
        user_id = %user_id,
        since = %since,
        until = %until,
        sessions = sessions.len(),
        logs = window.sets.len(),
        skipped = window.skipped.len(),
        "Loaded volume window"
    );
    window.sessions = sessions;
    Ok(window)
}
