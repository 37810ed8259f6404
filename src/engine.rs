// ABOUTME: PeriodizationEngine facade - the public entry point for every engine operation
// ABOUTME: Holds the store, analysis components, and per-user write locks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Periodization Engine
//!
//! ```rust,no_run
//! use periodization_engine::database::InMemoryStore;
//! use periodization_engine::engine::PeriodizationEngine;
//! use periodization_engine::config::IntelligenceConfig;
//! use std::sync::Arc;
//!
//! # async fn demo() -> periodization_engine::errors::AppResult<()> {
//! let engine = PeriodizationEngine::new(Arc::new(InMemoryStore::new()), IntelligenceConfig::default());
//! let user_id = uuid::Uuid::new_v4();
//! let report = engine.compute_volume_recommendations(user_id, None).await;
//! let state = engine.advance_mesocycle_week(user_id).await?;
//! # let _ = (report, state);
//! # Ok(())
//! # }
//! ```
//!
//! Operations that take no date use the current UTC day; the `*_as_of`
//! variants take it explicitly.

use crate::config::IntelligenceConfig;
use crate::database::TrainingStore;
use crate::errors::AppResult;
use crate::models::{
    AutoRegulationFeedback, ExerciseId, LandmarkPatch, MesocycleState, MuscleGroupId,
    PriorPrescription, ProgressionTarget, UserId, VolumeLandmark, VolumeRecommendationReport,
};
use crate::services::landmarks::{override_landmark, resolve_landmarks, ResolvedLandmarks};
use crate::services::locks::UserWriteLocks;
use crate::services::mesocycle::{advance_week, MesocycleAdvance};
use crate::services::volume::{build_recommendations, weekly_volume, VolumeRequest};
use crate::services::{fatigue, progression, Intelligence};
use chrono::{NaiveDate, Utc};
use periodization_intelligence::FatigueAnalysis;
use std::sync::Arc;
use tracing::warn;

/// Periodized training decision engine
#[derive(Clone)]
pub struct PeriodizationEngine {
    store: Arc<dyn TrainingStore>,
    intelligence: Arc<Intelligence>,
    locks: UserWriteLocks,
}

impl PeriodizationEngine {
    /// Create an engine over a store
    #[must_use]
    pub fn new(store: Arc<dyn TrainingStore>, config: IntelligenceConfig) -> Self {
        Self {
            store,
            intelligence: Arc::new(Intelligence::new(config)),
            locks: UserWriteLocks::new(),
        }
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &IntelligenceConfig {
        &self.intelligence.config
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &dyn TrainingStore {
        self.store.as_ref()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Volume directives for every muscle group
    ///
    /// `feedback`, when given, decides readiness; otherwise the mean readiness
    /// of the volume window is used. Never fails: unreadable muscle groups
    /// produce an empty report and per-group failures land in `skipped`.
    pub async fn compute_volume_recommendations(
        &self,
        user_id: UserId,
        feedback: Option<&AutoRegulationFeedback>,
    ) -> VolumeRecommendationReport {
        self.compute_volume_recommendations_as_of(user_id, feedback, Self::today())
            .await
    }

    /// [`Self::compute_volume_recommendations`] for a window ending `today`
    pub async fn compute_volume_recommendations_as_of(
        &self,
        user_id: UserId,
        feedback: Option<&AutoRegulationFeedback>,
        today: NaiveDate,
    ) -> VolumeRecommendationReport {
        let store = self.store();
        let groups = match store.list_muscle_groups().await {
            Ok(groups) => groups,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "Failed to list muscle groups, returning empty report"
                );
                return VolumeRecommendationReport::empty(user_id);
            }
        };

        let landmarks = resolve_landmarks(
            store,
            &self.locks,
            &self.config().landmarks,
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
            feedback,
            today,
            window_days: self.config().volume.window_days,
        };
        build_recommendations(store, &self.intelligence.volume, request, &groups, landmarks).await
    }

    /// Completed sets for one muscle group over the configured volume window
    ///
    /// # Errors
    ///
    /// Returns an error if the session listing fails
    pub async fn weekly_volume(
        &self,
        user_id: UserId,
        muscle_group_id: MuscleGroupId,
        today: NaiveDate,
    ) -> AppResult<u32> {
        weekly_volume(
            self.store(),
            user_id,
            muscle_group_id,
            self.config().volume.window_days,
            today,
        )
        .await
    }

    /// Fatigue picture of the last `window_days`; neutral when feedback is unreadable
    pub async fn compute_fatigue_analysis(
        &self,
        user_id: UserId,
        window_days: u32,
    ) -> FatigueAnalysis {
        self.compute_fatigue_analysis_as_of(user_id, window_days, Self::today())
            .await
    }

    /// [`Self::compute_fatigue_analysis`] for a window ending `today`
    pub async fn compute_fatigue_analysis_as_of(
        &self,
        user_id: UserId,
        window_days: u32,
        today: NaiveDate,
    ) -> FatigueAnalysis {
        fatigue::fatigue_analysis(
            self.store(),
            &self.intelligence.fatigue,
            user_id,
            window_days,
            today,
        )
        .await
    }

    /// Target for the next occurrence of an exercise
    ///
    /// # Errors
    ///
    /// Returns an error if the exercise history cannot be read
    pub async fn compute_progression_target(
        &self,
        user_id: UserId,
        exercise_id: ExerciseId,
        prior: &PriorPrescription,
    ) -> AppResult<ProgressionTarget> {
        self.compute_progression_target_as_of(user_id, exercise_id, prior, Self::today())
            .await
    }

    /// [`Self::compute_progression_target`] with history looked up back from `today`
    ///
    /// # Errors
    ///
    /// Returns an error if the exercise history cannot be read
    pub async fn compute_progression_target_as_of(
        &self,
        user_id: UserId,
        exercise_id: ExerciseId,
        prior: &PriorPrescription,
        today: NaiveDate,
    ) -> AppResult<ProgressionTarget> {
        progression::progression_target(
            self.store(),
            &self.intelligence.progression,
            user_id,
            exercise_id,
            prior,
            today,
        )
        .await
    }

    /// Advance the user's mesocycle one week and return the new state
    ///
    /// # Errors
    ///
    /// Returns an error if the mesocycle state cannot be read or written
    pub async fn advance_mesocycle_week(&self, user_id: UserId) -> AppResult<MesocycleState> {
        Ok(self
            .advance_mesocycle_as_of(user_id, Self::today())
            .await?
            .transition
            .state)
    }

    /// Advance the user's mesocycle one week, reporting everything that changed
    ///
    /// # Errors
    ///
    /// Returns an error if the mesocycle state cannot be read or written
    pub async fn advance_mesocycle_as_of(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> AppResult<MesocycleAdvance> {
        advance_week(self.store(), &self.locks, &self.intelligence, user_id, today).await
    }

    /// Landmarks of every muscle group, seeding defaults on first use
    ///
    /// # Errors
    ///
    /// Returns an error if muscle groups or landmarks cannot be read
    pub async fn landmarks(&self, user_id: UserId) -> AppResult<Vec<VolumeLandmark>> {
        let groups = self.store().list_muscle_groups().await?;
        let resolved = resolve_landmarks(
            self.store(),
            &self.locks,
            &self.config().landmarks,
            user_id,
            &groups,
        )
        .await?;

        let mut landmarks: Vec<VolumeLandmark> = resolved.by_muscle_group.into_values().collect();
        landmarks.sort_by_key(|l| l.muscle_group_id);
        Ok(landmarks)
    }

    /// Apply a validated user override to one landmark
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the result breaks `mv <= mev <= mav <= mrv`
    /// and `ResourceNotFound` for an unknown muscle group
    pub async fn override_landmark(
        &self,
        user_id: UserId,
        muscle_group_id: MuscleGroupId,
        patch: &LandmarkPatch,
    ) -> AppResult<VolumeLandmark> {
        override_landmark(
            self.store(),
            &self.locks,
            &self.config().landmarks,
            user_id,
            muscle_group_id,
            patch,
        )
        .await
    }
}
