// ABOUTME: In-memory implementation of the training store for tests and embedding
// ABOUTME: Mirrors SQLite semantics and can be told to fail specific lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{resolve_landmark_patch, HistoryImport, TrainingStore};
use crate::errors::{AppError, AppResult};
use crate::models::{
    AutoRegulationFeedback, ExerciseId, ExerciseLog, ExerciseMuscleContribution, LandmarkPatch,
    MesocycleState, MuscleGroup, MuscleGroupId, SessionId, UserId, VolumeLandmark,
    WorkoutSession,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

/// Lookups the store has been told to fail
#[derive(Debug, Default)]
struct FailurePlan {
    contributions: HashSet<ExerciseId>,
    set_records: HashSet<SessionId>,
    muscle_groups: bool,
    feedback: bool,
    landmark_writes: bool,
}

#[derive(Debug, Default)]
struct Tables {
    muscle_groups: BTreeMap<MuscleGroupId, MuscleGroup>,
    contributions: BTreeMap<(ExerciseId, MuscleGroupId), ExerciseMuscleContribution>,
    sessions: BTreeMap<SessionId, WorkoutSession>,
    exercise_logs: BTreeMap<(SessionId, ExerciseId), ExerciseLog>,
    feedback: BTreeMap<SessionId, AutoRegulationFeedback>,
    landmarks: HashMap<(UserId, MuscleGroupId), VolumeLandmark>,
    mesocycle_states: HashMap<UserId, MesocycleState>,
    landmark_writes: usize,
    failures: FailurePlan,
}

/// Store that keeps every table in process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

fn injected(operation: &str) -> AppError {
    AppError::database(format!("Injected failure: {operation}"))
}

impl InMemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a muscle group
    pub async fn insert_muscle_group(&self, group: MuscleGroup) {
        self.tables
            .write()
            .await
            .muscle_groups
            .insert(group.id, group);
    }

    /// Insert or replace an exercise contribution row
    pub async fn insert_contribution(&self, contribution: ExerciseMuscleContribution) {
        self.tables.write().await.contributions.insert(
            (contribution.exercise_id, contribution.muscle_group_id),
            contribution,
        );
    }

    /// Insert or replace a workout session
    pub async fn insert_session(&self, session: WorkoutSession) {
        self.tables.write().await.sessions.insert(session.id, session);
    }

    /// Insert or replace an exercise log
    pub async fn insert_exercise_log(&self, log: ExerciseLog) {
        self.tables
            .write()
            .await
            .exercise_logs
            .insert((log.session_id, log.exercise_id), log);
    }

    /// Insert or replace session feedback
    pub async fn insert_feedback(&self, feedback: AutoRegulationFeedback) {
        self.tables
            .write()
            .await
            .feedback
            .insert(feedback.session_id, feedback);
    }

    /// Load a full history payload
    pub async fn import_history(&self, import: HistoryImport) -> usize {
        let count = import.len();
        let mut tables = self.tables.write().await;
        for group in import.muscle_groups {
            tables.muscle_groups.insert(group.id, group);
        }
        for contribution in import.contributions {
            tables.contributions.insert(
                (contribution.exercise_id, contribution.muscle_group_id),
                contribution,
            );
        }
        for session in import.sessions {
            tables.sessions.insert(session.id, session);
        }
        for log in import.exercise_logs {
            tables
                .exercise_logs
                .insert((log.session_id, log.exercise_id), log);
        }
        for feedback in import.feedback {
            tables.feedback.insert(feedback.session_id, feedback);
        }
        count
    }

    /// Number of successful landmark writes since creation
    pub async fn landmark_write_count(&self) -> usize {
        self.tables.read().await.landmark_writes
    }

    /// Make contribution lookups for `exercise_id` fail
    pub async fn fail_contributions_for(&self, exercise_id: ExerciseId) {
        self.tables
            .write()
            .await
            .failures
            .contributions
            .insert(exercise_id);
    }

    /// Make exercise log lookups for `session_id` fail
    pub async fn fail_set_records_for(&self, session_id: SessionId) {
        self.tables
            .write()
            .await
            .failures
            .set_records
            .insert(session_id);
    }

    /// Make muscle group listing fail
    pub async fn fail_muscle_group_listing(&self) {
        self.tables.write().await.failures.muscle_groups = true;
    }

    /// Make feedback listing fail
    pub async fn fail_feedback_listing(&self) {
        self.tables.write().await.failures.feedback = true;
    }

    /// Make landmark writes fail
    pub async fn fail_landmark_writes(&self) {
        self.tables.write().await.failures.landmark_writes = true;
    }
}

#[async_trait]
impl TrainingStore for InMemoryStore {
    async fn list_completed_sessions(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> AppResult<Vec<WorkoutSession>> {
        let tables = self.tables.read().await;
        let mut sessions: Vec<WorkoutSession> = tables
            .sessions
            .values()
            .filter(|s| s.user_id == user_id && s.completed && s.date >= since)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.date, s.id));
        Ok(sessions)
    }

    async fn list_set_records(&self, session_id: SessionId) -> AppResult<Vec<ExerciseLog>> {
        let tables = self.tables.read().await;
        if tables.failures.set_records.contains(&session_id) {
            return Err(injected("list_set_records"));
        }
        Ok(tables
            .exercise_logs
            .range((session_id, ExerciseId(i64::MIN))..=(session_id, ExerciseId(i64::MAX)))
            .map(|(_, log)| log.clone())
            .collect())
    }

    async fn get_exercise_muscle_contributions(
        &self,
        exercise_id: ExerciseId,
    ) -> AppResult<Vec<ExerciseMuscleContribution>> {
        let tables = self.tables.read().await;
        if tables.failures.contributions.contains(&exercise_id) {
            return Err(injected("get_exercise_muscle_contributions"));
        }
        Ok(tables
            .contributions
            .range((exercise_id, MuscleGroupId(i64::MIN))..=(exercise_id, MuscleGroupId(i64::MAX)))
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn list_muscle_groups(&self) -> AppResult<Vec<MuscleGroup>> {
        let tables = self.tables.read().await;
        if tables.failures.muscle_groups {
            return Err(injected("list_muscle_groups"));
        }
        Ok(tables.muscle_groups.values().cloned().collect())
    }

    async fn get_landmarks(&self, user_id: UserId) -> AppResult<Vec<VolumeLandmark>> {
        let tables = self.tables.read().await;
        let mut landmarks: Vec<VolumeLandmark> = tables
            .landmarks
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        landmarks.sort_by_key(|l| l.muscle_group_id);
        Ok(landmarks)
    }

    async fn update_landmark(
        &self,
        user_id: UserId,
        muscle_group_id: MuscleGroupId,
        patch: &LandmarkPatch,
    ) -> AppResult<VolumeLandmark> {
        let mut tables = self.tables.write().await;
        if tables.failures.landmark_writes {
            return Err(injected("update_landmark"));
        }
        let updated = resolve_landmark_patch(
            tables.landmarks.get(&(user_id, muscle_group_id)),
            user_id,
            muscle_group_id,
            patch,
        )?;
        tables
            .landmarks
            .insert((user_id, muscle_group_id), updated.clone());
        tables.landmark_writes += 1;
        drop(tables);
        Ok(updated)
    }

    async fn list_feedback(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> AppResult<Vec<AutoRegulationFeedback>> {
        let tables = self.tables.read().await;
        if tables.failures.feedback {
            return Err(injected("list_feedback"));
        }
        let mut feedback: Vec<AutoRegulationFeedback> = tables
            .feedback
            .values()
            .filter(|f| f.user_id == user_id && f.date >= since)
            .cloned()
            .collect();
        feedback.sort_by_key(|f| (f.date, f.session_id));
        Ok(feedback)
    }

    async fn get_mesocycle_state(&self, user_id: UserId) -> AppResult<Option<MesocycleState>> {
        Ok(self
            .tables
            .read()
            .await
            .mesocycle_states
            .get(&user_id)
            .cloned())
    }

    async fn update_mesocycle_state(
        &self,
        user_id: UserId,
        state: &MesocycleState,
    ) -> AppResult<()> {
        self.tables
            .write()
            .await
            .mesocycle_states
            .insert(user_id, state.clone());
        Ok(())
    }
}
