// ABOUTME: Shared fixtures for integration tests - history builders over the in-memory store
// ABOUTME: Provides quiet logging, feedback records with a chosen readiness, and set payload helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `periodization_engine`

use chrono::NaiveDate;
use periodization_engine::config::IntelligenceConfig;
use periodization_engine::database::InMemoryStore;
use periodization_engine::engine::PeriodizationEngine;
use periodization_engine::models::{
    AutoRegulationFeedback, BodyRegion, ContributionRole, ExerciseId, ExerciseLog,
    ExerciseMuscleContribution, MuscleGroup, MuscleGroupId, PriorityTier, SessionId, UserId,
    WorkoutSession,
};
use serde_json::json;
use std::sync::{Arc, Once};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

pub const CHEST: MuscleGroupId = MuscleGroupId(1);
pub const TRICEPS: MuscleGroupId = MuscleGroupId(2);
pub const QUADS: MuscleGroupId = MuscleGroupId(3);

pub const BENCH_PRESS: ExerciseId = ExerciseId(100);
pub const SQUAT: ExerciseId = ExerciseId(200);
pub const CABLE_FLY: ExerciseId = ExerciseId(300);

pub fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

/// Reference "today" used across tests
pub fn today() -> NaiveDate {
    day(3, 15)
}

pub fn muscle_group(id: MuscleGroupId, name: &str, region: BodyRegion) -> MuscleGroup {
    MuscleGroup {
        id,
        name: name.to_owned(),
        body_region: region,
        priority_tier: PriorityTier::Primary,
    }
}

pub fn contribution(
    exercise_id: ExerciseId,
    muscle_group_id: MuscleGroupId,
    percent: f64,
) -> ExerciseMuscleContribution {
    ExerciseMuscleContribution {
        exercise_id,
        muscle_group_id,
        contribution_percent: percent,
        role: if percent >= 50.0 {
            ContributionRole::Primary
        } else {
            ContributionRole::Secondary
        },
    }
}

/// Per-set payload in the logging application's format
///
/// Each entry is `(weight, reps, rpe, completed)`.
pub fn sets_payload(sets: &[(f64, u32, Option<f64>, bool)]) -> String {
    let entries: Vec<serde_json::Value> = sets
        .iter()
        .map(|(weight, reps, rpe, completed)| {
            json!({
                "weight": weight,
                "actualReps": reps,
                "rpe": rpe,
                "completed": completed,
            })
        })
        .collect();
    serde_json::to_string(&entries).unwrap()
}

/// Feedback whose readiness equals `readiness` (integer, 1..=9)
///
/// With energy = sleep = pump = r and soreness = effort = 10 - r, both the
/// recovery and performance scores equal r.
pub fn feedback_with_readiness(
    user_id: UserId,
    session_id: SessionId,
    date: NaiveDate,
    readiness: u8,
) -> AutoRegulationFeedback {
    AutoRegulationFeedback {
        session_id,
        user_id,
        date,
        pump_quality: readiness,
        muscle_soreness: 10 - readiness,
        perceived_effort: 10 - readiness,
        energy_level: readiness,
        sleep_quality: readiness,
    }
}

/// Builder that fills an in-memory store with one user's history
pub struct History {
    pub store: Arc<InMemoryStore>,
    pub user_id: UserId,
    next_session: i64,
}

impl History {
    /// Store with chest, triceps and quads plus bench, squat and fly contributions
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_muscle_group(muscle_group(CHEST, "Chest", BodyRegion::Upper))
            .await;
        store
            .insert_muscle_group(muscle_group(TRICEPS, "Triceps", BodyRegion::Upper))
            .await;
        store
            .insert_muscle_group(muscle_group(QUADS, "Quads", BodyRegion::Lower))
            .await;

        store.insert_contribution(contribution(BENCH_PRESS, CHEST, 70.0)).await;
        store.insert_contribution(contribution(BENCH_PRESS, TRICEPS, 30.0)).await;
        store.insert_contribution(contribution(SQUAT, QUADS, 80.0)).await;
        store.insert_contribution(contribution(CABLE_FLY, CHEST, 100.0)).await;
        store.insert_contribution(contribution(CABLE_FLY, TRICEPS, 0.0)).await;

        Self {
            store,
            user_id: Uuid::new_v4(),
            next_session: 1,
        }
    }

    /// Engine over the store with default thresholds
    pub fn engine(&self) -> PeriodizationEngine {
        self.engine_with(IntelligenceConfig::default())
    }

    pub fn engine_with(&self, config: IntelligenceConfig) -> PeriodizationEngine {
        PeriodizationEngine::new(self.store.clone(), config)
    }

    /// Completed session with the given exercise logs
    pub async fn session(
        &mut self,
        date: NaiveDate,
        logs: &[(ExerciseId, u32, Option<String>)],
    ) -> SessionId {
        let session_id = SessionId(self.next_session);
        self.next_session += 1;

        self.store
            .insert_session(WorkoutSession {
                id: session_id,
                user_id: self.user_id,
                date,
                completed: true,
                duration_minutes: Some(60),
                total_volume: 0.0,
            })
            .await;
        for (exercise_id, sets, sets_data) in logs {
            self.store
                .insert_exercise_log(ExerciseLog {
                    session_id,
                    exercise_id: *exercise_id,
                    sets: *sets,
                    sets_data: sets_data.clone(),
                })
                .await;
        }
        session_id
    }

    /// Session with feedback of the given readiness and no exercise logs
    pub async fn feedback(&mut self, date: NaiveDate, readiness: u8) -> SessionId {
        let session_id = self.session(date, &[]).await;
        self.store
            .insert_feedback(feedback_with_readiness(
                self.user_id,
                session_id,
                date,
                readiness,
            ))
            .await;
        session_id
    }
}
