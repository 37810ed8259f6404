// ABOUTME: Engine operations composed from the store and the pure analysis components
// ABOUTME: Free async functions over a TrainingStore, used by the engine facade and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Services
//!
//! Each operation reads what it needs through [`crate::database::TrainingStore`],
//! runs the synchronous analysis from `periodization-intelligence`, and writes
//! back landmarks or mesocycle state under [`locks::UserWriteLocks`].

/// Fatigue analysis over stored feedback
pub mod fatigue;
/// Completed-set history loading
pub mod history;
/// Landmark seeding and overrides
pub mod landmarks;
/// Per-user write locks
pub mod locks;
/// Weekly mesocycle advance
pub mod mesocycle;
/// Load progression targets
pub mod progression;
/// Volume counting and recommendations
pub mod volume;

use crate::config::IntelligenceConfig;
use periodization_intelligence::{
    FatigueAnalyzer, LoadProgressionTracker, MesocycleController, VolumeRecommendationEngine,
};

/// Analysis components built from one configuration
#[derive(Debug, Clone)]
pub struct Intelligence {
    /// Configuration the components were built from
    pub config: IntelligenceConfig,
    /// Volume rule tables
    pub volume: VolumeRecommendationEngine,
    /// Fatigue thresholds
    pub fatigue: FatigueAnalyzer,
    /// Progression rules
    pub progression: LoadProgressionTracker,
    /// Mesocycle state machine
    pub mesocycle: MesocycleController,
}

impl Intelligence {
    /// Build every component from `config`
    #[must_use]
    pub fn new(config: IntelligenceConfig) -> Self {
        Self {
            volume: VolumeRecommendationEngine::new(config.volume.clone()),
            fatigue: FatigueAnalyzer::new(config.fatigue.clone()),
            progression: LoadProgressionTracker::new(config.progression.clone()),
            mesocycle: MesocycleController::new(config.mesocycle.clone()),
            config,
        }
    }
}

impl Default for Intelligence {
    fn default() -> Self {
        Self::new(IntelligenceConfig::default())
    }
}
