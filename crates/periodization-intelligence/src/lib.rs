// ABOUTME: Training intelligence algorithms for the periodization engine
// ABOUTME: Pure synchronous calculations over history, feedback, landmarks, and mesocycle state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Periodization Intelligence
//!
//! Every decision the engine makes, with no storage or async runtime
//! dependency. Callers fetch records, hand them to these types, and persist
//! what comes back.
//!
//! ## Modules
//!
//! - **algorithms**: Ordered rule tables for volume directives and load progression
//! - **config**: `IntelligenceConfig` with environment overrides and validation
//! - **`volume_aggregator`**: Completed-set counting per muscle group
//! - **`fatigue_analyzer`**: Readiness, fatigue, trend, and deload detection
//! - **`recommendation_engine`**: Weekly volume directives
//! - **`load_progression`**: Next-session load targets
//! - **`landmark_calibration`**: Landmark seeding, contraction, and recalibration
//! - **mesocycle**: Mesocycle state machine

/// Ordered rule tables
pub mod algorithms;

/// Intelligence configuration
pub mod config;

/// Fatigue and readiness analysis
pub mod fatigue_analyzer;

/// Landmark seeding and adjustment
pub mod landmark_calibration;

/// Load progression targets
pub mod load_progression;

/// Mesocycle state machine
pub mod mesocycle;

/// Weekly volume directives
pub mod recommendation_engine;

/// Completed-set counting
pub mod volume_aggregator;

pub use config::intelligence::{ConfigError, IntelligenceConfig};
pub use fatigue_analyzer::{FatigueAnalysis, FatigueAnalyzer, FatigueTrend, SessionScore};
pub use load_progression::{ExerciseOccurrence, LoadProgressionTracker};
pub use mesocycle::{
    DeloadTrigger, LandmarkAction, MesocycleController, MesocycleTransition, TransitionEvent,
};
pub use recommendation_engine::{MuscleGroupVolume, VolumeInput, VolumeRecommendationEngine};
pub use volume_aggregator::{CompletedSets, ContributionIndex, SetSource, VolumeAggregator};
