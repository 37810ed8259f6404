// ABOUTME: Core data models for the periodization engine
// ABOUTME: Reference data, logged history, landmarks, mesocycle state, and engine outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Records exchanged between the engine and its storage collaborator, and the
//! structured outputs the engine returns to callers. All records are plain
//! serde structures with no transport framing.

/// Strongly typed identifiers
pub mod ids;

/// Muscle groups and exercise contribution weights
pub mod muscle;

/// Sessions, set records, and per-exercise logs
pub mod workout;

/// Post-session subjective feedback
pub mod feedback;

/// Per-user volume landmarks
pub mod landmark;

/// Mesocycle state machine data
pub mod mesocycle;

/// Volume recommendation outputs
pub mod recommendation;

/// Load progression inputs and outputs
pub mod progression;

pub use feedback::AutoRegulationFeedback;
pub use ids::{ExerciseId, MuscleGroupId, SessionId, UserId};
pub use landmark::{LandmarkPatch, VolumeLandmark};
pub use mesocycle::{MesocyclePhase, MesocycleState};
pub use muscle::{
    BodyRegion, ContributionRole, ExerciseMuscleContribution, MuscleGroup, PriorityTier,
};
pub use progression::{
    PriorPrescription, ProgressionRuleKind, ProgressionTarget, RepRange, RpeBand,
};
pub use recommendation::{
    FeedbackMode, Recommendation, RecommendationCategory, SkippedItem,
    VolumeRecommendationReport,
};
pub use workout::{ExerciseLog, WorkoutSession, WorkoutSetRecord};
