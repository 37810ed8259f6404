// ABOUTME: Storage contract between the engine and the application that owns training data
// ABOUTME: Async trait with SQLite and in-memory implementations plus a bulk history import format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Training Data Storage
//!
//! The engine reads history (sessions, per-exercise logs, contribution
//! weights, feedback, muscle groups) and owns two kinds of mutable records:
//! volume landmarks and mesocycle state. [`TrainingStore`] is the whole
//! contract; the history tables themselves are written by the surrounding
//! application, or in bulk through [`HistoryImport`].

/// In-memory store for tests and embedding
pub mod memory;

/// `SQLite` store built on `sqlx`
pub mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

use crate::errors::AppResult;
use crate::models::{
    AutoRegulationFeedback, ExerciseId, ExerciseLog, ExerciseMuscleContribution, LandmarkPatch,
    MesocycleState, MuscleGroup, MuscleGroupId, SessionId, UserId, VolumeLandmark,
    WorkoutSession,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage contract used by the engine
///
/// Reads are scoped by user and time window. Landmark and mesocycle writes
/// are upserts; the engine serializes them per user.
#[async_trait]
pub trait TrainingStore: Send + Sync {
    /// Completed sessions of a user dated on or after `since`, oldest first
    async fn list_completed_sessions(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> AppResult<Vec<WorkoutSession>>;

    /// Per-exercise logs of a session
    async fn list_set_records(&self, session_id: SessionId) -> AppResult<Vec<ExerciseLog>>;

    /// Contribution rows of an exercise
    async fn get_exercise_muscle_contributions(
        &self,
        exercise_id: ExerciseId,
    ) -> AppResult<Vec<ExerciseMuscleContribution>>;

    /// All muscle groups, ordered by id
    async fn list_muscle_groups(&self) -> AppResult<Vec<MuscleGroup>>;

    /// All landmarks of a user
    async fn get_landmarks(&self, user_id: UserId) -> AppResult<Vec<VolumeLandmark>>;

    /// Apply a patch to a landmark, creating it when the patch sets all four thresholds
    ///
    /// Returns the stored landmark. Fails with `InvalidInput` when the result
    /// would break `mv <= mev <= mav <= mrv`, and with `ResourceNotFound` when
    /// no landmark exists and the patch is partial.
    async fn update_landmark(
        &self,
        user_id: UserId,
        muscle_group_id: MuscleGroupId,
        patch: &LandmarkPatch,
    ) -> AppResult<VolumeLandmark>;

    /// Feedback of a user dated on or after `since`
    async fn list_feedback(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> AppResult<Vec<AutoRegulationFeedback>>;

    /// Mesocycle state of a user, if one was ever stored
    async fn get_mesocycle_state(&self, user_id: UserId) -> AppResult<Option<MesocycleState>>;

    /// Store the mesocycle state of a user, replacing any previous one
    async fn update_mesocycle_state(
        &self,
        user_id: UserId,
        state: &MesocycleState,
    ) -> AppResult<()>;
}

/// Bulk history payload, as exported by the logging application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryImport {
    /// Muscle group reference data
    pub muscle_groups: Vec<MuscleGroup>,
    /// Exercise contribution weights
    pub contributions: Vec<ExerciseMuscleContribution>,
    /// Sessions
    pub sessions: Vec<WorkoutSession>,
    /// Per-exercise logs
    pub exercise_logs: Vec<ExerciseLog>,
    /// Post-session feedback
    pub feedback: Vec<AutoRegulationFeedback>,
}

impl HistoryImport {
    /// Total number of records in the payload
    #[must_use]
    pub fn len(&self) -> usize {
        self.muscle_groups.len()
            + self.contributions.len()
            + self.sessions.len()
            + self.exercise_logs.len()
            + self.feedback.len()
    }

    /// Whether the payload holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve a landmark patch against the stored row, shared by both stores
pub(crate) fn resolve_landmark_patch(
    existing: Option<&VolumeLandmark>,
    user_id: UserId,
    muscle_group_id: MuscleGroupId,
    patch: &LandmarkPatch,
) -> AppResult<VolumeLandmark> {
    use crate::errors::AppError;
    use chrono::Utc;

    if let Some(existing) = existing {
        return existing.apply(patch);
    }

    let (Some(mv), Some(mev), Some(mav), Some(mrv)) = (patch.mv, patch.mev, patch.mav, patch.mrv)
    else {
        return Err(AppError::not_found(format!(
            "Landmark for muscle group {muscle_group_id}"
        ))
        .with_user_id(user_id));
    };

    let created = VolumeLandmark {
        user_id,
        muscle_group_id,
        mv,
        mev,
        mav,
        mrv,
        updated_at: Utc::now(),
    };
    if !created.is_ordered() {
        return Err(AppError::invalid_input(format!(
            "Landmarks for muscle group {muscle_group_id} must satisfy mv <= mev <= mav <= mrv, got {mv}/{mev}/{mav}/{mrv}"
        ))
        .with_user_id(user_id));
    }
    Ok(created)
}
