// ABOUTME: Weekly mesocycle advance - state transition, persistence, and landmark adjustments
// ABOUTME: The whole read-modify-write runs under the user's write lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::fatigue::fatigue_analysis;
use super::landmarks::{resolve_landmarks_locked, ResolvedLandmarks};
use super::locks::UserWriteLocks;
use super::volume::{build_recommendations, VolumeRequest};
use super::Intelligence;
use crate::database::TrainingStore;
use crate::errors::AppResult;
use crate::models::{MesocyclePhase, MesocycleState, UserId, VolumeLandmark};
use chrono::NaiveDate;
use periodization_intelligence::landmark_calibration::{contract, recalibrate};
use periodization_intelligence::{
    FatigueAnalysis, LandmarkAction, MesocycleTransition, TransitionEvent,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Outcome of one weekly advance
#[derive(Debug, Clone, Serialize)]
pub struct MesocycleAdvance {
    /// Transition applied and persisted
    pub transition: MesocycleTransition,
    /// Fatigue picture the transition was based on
    pub fatigue: FatigueAnalysis,
    /// Landmarks changed by the transition
    pub updated_landmarks: Vec<VolumeLandmark>,
    /// Landmark updates that failed and were skipped
    pub failed_landmark_updates: usize,
}

/// Advance a user's mesocycle by one week
///
/// A user without state starts at week 1 of a fresh mesocycle, which is
/// persisted before advancing.
///
/// # Errors
///
/// Returns an error if the state cannot be read or written. Landmark
/// adjustments are applied after the state is persisted; each failure there
/// is logged and counted.
pub async fn advance_week(
    store: &dyn TrainingStore,
    locks: &UserWriteLocks,
    intelligence: &Intelligence,
    user_id: UserId,
    today: NaiveDate,
) -> AppResult<MesocycleAdvance> {
    let _guard = locks.acquire(user_id).await;

    let state = load_or_initialize(store, intelligence, user_id, today).await?;
    let fatigue = fatigue_analysis(
        store,
        &intelligence.fatigue,
        user_id,
        intelligence.config.fatigue.window_days,
        today,
    )
    .await;

    let deload_adjustment = if state.phase == MesocyclePhase::Accumulation {
        current_deload_adjustment(store, intelligence, user_id, today).await
    } else {
        None
    };

    let transition = intelligence
        .mesocycle
        .advance(&state, &fatigue, deload_adjustment, today);
    store
        .update_mesocycle_state(user_id, &transition.state)
        .await?;

    if transition.event == TransitionEvent::WeekAdvanced {
        debug!(
            user_id = %user_id,
            week = transition.state.current_week,
            total_weeks = transition.state.total_weeks,
            streak = transition.state.fatigue_flag_streak,
            "Mesocycle week advanced"
        );
    }

    let (updated_landmarks, failed_landmark_updates) =
        apply_landmark_action(store, intelligence, user_id, transition.landmark_action, &fatigue)
            .await;

    Ok(MesocycleAdvance {
        transition,
        fatigue,
        updated_landmarks,
        failed_landmark_updates,
    })
}

async fn load_or_initialize(
    store: &dyn TrainingStore,
    intelligence: &Intelligence,
    user_id: UserId,
    today: NaiveDate,
) -> AppResult<MesocycleState> {
    if let Some(state) = store.get_mesocycle_state(user_id).await? {
        return Ok(state);
    }

    let state = intelligence.mesocycle.initial(user_id, today);
    store.update_mesocycle_state(user_id, &state).await?;
    info!(
        user_id = %user_id,
        total_weeks = state.total_weeks,
        "Initialized mesocycle state"
    );
    Ok(state)
}

/// Adjustment of the deload directive the user would get this week, if any
async fn current_deload_adjustment(
    store: &dyn TrainingStore,
    intelligence: &Intelligence,
    user_id: UserId,
    today: NaiveDate,
) -> Option<f64> {
    let groups = match store.list_muscle_groups().await {
        Ok(groups) => groups,
        Err(e) => {
            warn!(user_id = %user_id, error = %e, "Failed to list muscle groups");
            return None;
        }
    };
    let landmarks = resolve_landmarks_locked(
        store,
        &intelligence.config.landmarks,
        user_id,
        &groups,
    )
    .await
    .unwrap_or_else(|e| {
        warn!(user_id = %user_id, error = %e, "Failed to read landmarks");
        ResolvedLandmarks::default()
    });

    let request = VolumeRequest {
        user_id,
        feedback: None,
        today,
        window_days: intelligence.config.volume.window_days,
    };
    build_recommendations(store, &intelligence.volume, request, &groups, landmarks)
        .await
        .deload_adjustment()
}

async fn apply_landmark_action(
    store: &dyn TrainingStore,
    intelligence: &Intelligence,
    user_id: UserId,
    action: LandmarkAction,
    fatigue: &FatigueAnalysis,
) -> (Vec<VolumeLandmark>, usize) {
    if action == LandmarkAction::None {
        return (Vec::new(), 0);
    }

    let landmarks = match store.get_landmarks(user_id).await {
        Ok(landmarks) => landmarks,
        Err(e) => {
            warn!(
                user_id = %user_id,
                error = %e,
                "Failed to read landmarks, skipping adjustment"
            );
            return (Vec::new(), 1);
        }
    };

    let mut updated = Vec::new();
    let mut failed = 0;
    for landmark in &landmarks {
        let adjusted = match action {
            LandmarkAction::None => None,
            LandmarkAction::Recalibrate => {
                recalibrate(landmark, fatigue, &intelligence.config.mesocycle)
            }
            LandmarkAction::Contract { percent } => Some(contract(landmark, percent)),
        };
        let Some(adjusted) = adjusted else {
            continue;
        };

        let patch = landmark.diff(&adjusted);
        if patch.is_empty() {
            continue;
        }
        match store
            .update_landmark(user_id, landmark.muscle_group_id, &patch)
            .await
        {
            Ok(stored) => updated.push(stored),
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    muscle_group_id = %landmark.muscle_group_id,
                    error = %e,
                    "Failed to adjust landmark"
                );
                failed += 1;
            }
        }
    }

    if !updated.is_empty() {
        info!(
            user_id = %user_id,
            action = ?action,
            landmarks = updated.len(),
            "Adjusted landmarks"
        );
    }
    (updated, failed)
}
