// ABOUTME: Intelligence configuration for volume, fatigue, progression, and mesocycle decisions
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Provides type-safe configuration for every decision the engine makes.
//!
//! # Module Structure
//!
//! Configuration is organized into domain-specific modules:
//! - `volume` - Counting window and volume rule tables
//! - `fatigue` - Readiness scoring thresholds and deload detection
//! - `progression` - Load progression thresholds and increments
//! - `mesocycle` - Cycle length, deload streak, and landmark adaptation
//! - `landmarks` - Seed thresholds for new users

pub mod error;
pub mod fatigue;
pub mod landmarks;
pub mod mesocycle;
pub mod progression;
pub mod volume;

pub use error::ConfigError;
pub use fatigue::FatigueConfig;
pub use landmarks::{LandmarkDefaults, LandmarkThresholds, MuscleGroupLandmarks};
pub use mesocycle::MesocycleConfig;
pub use progression::ProgressionConfig;
pub use volume::VolumeConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Volume counting and recommendation rules
    pub volume: VolumeConfig,
    /// Fatigue analysis thresholds
    pub fatigue: FatigueConfig,
    /// Load progression thresholds
    pub progression: ProgressionConfig,
    /// Mesocycle state machine settings
    pub mesocycle: MesocycleConfig,
    /// Landmark seed values
    pub landmarks: LandmarkDefaults,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.volume.window_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "volume.window_days must be at least 1",
            ));
        }
        if self.volume.feedback_rules.rules.is_empty() {
            return Err(ConfigError::MissingField("volume.feedback_rules"));
        }
        if self.volume.fallback_rules.rules.is_empty() {
            return Err(ConfigError::MissingField("volume.fallback_rules"));
        }
        if self
            .volume
            .feedback_rules
            .rules
            .iter()
            .chain(&self.volume.fallback_rules.rules)
            .any(|rule| !(1..=10).contains(&rule.confidence))
        {
            return Err(ConfigError::ValueOutOfRange(
                "volume rule confidence must be within 1..=10",
            ));
        }

        let fatigue = &self.fatigue;
        if fatigue.window_days == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "fatigue.window_days must be at least 1",
            ));
        }
        if !(0.0..=10.0).contains(&fatigue.deload_mean_threshold)
            || !(0.0..=10.0).contains(&fatigue.session_flag_threshold)
        {
            return Err(ConfigError::ValueOutOfRange(
                "fatigue thresholds must be within 0..=10",
            ));
        }
        if fatigue.recent_flags_required > fatigue.recent_sessions {
            return Err(ConfigError::InvalidRange(
                "fatigue.recent_flags_required must be <= fatigue.recent_sessions",
            ));
        }
        if fatigue.deload_days_min > fatigue.deload_days_max {
            return Err(ConfigError::InvalidRange(
                "fatigue.deload_days_min must be <= fatigue.deload_days_max",
            ));
        }

        let progression = &self.progression;
        if progression.recent_occurrences == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "progression.recent_occurrences must be at least 1",
            ));
        }
        if progression.low_effort_rpe > progression.high_effort_rpe {
            return Err(ConfigError::InvalidRange(
                "progression.low_effort_rpe must be <= progression.high_effort_rpe",
            ));
        }
        if progression.weight_increment <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "progression.weight_increment must be positive",
            ));
        }

        let mesocycle = &self.mesocycle;
        if mesocycle.default_total_weeks < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "mesocycle.default_total_weeks must be at least 2",
            ));
        }
        if mesocycle.expansion_fatigue_ceiling >= mesocycle.contraction_fatigue_floor {
            return Err(ConfigError::InvalidRange(
                "mesocycle.expansion_fatigue_ceiling must be < mesocycle.contraction_fatigue_floor",
            ));
        }

        let landmarks = &self.landmarks;
        if !landmarks.generic.is_ordered()
            || landmarks
                .by_muscle_group
                .iter()
                .any(|entry| !entry.thresholds.is_ordered())
        {
            return Err(ConfigError::InvalidRange(
                "landmark defaults must satisfy mv <= mev <= mav <= mrv",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when a set variable does not parse
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "PERIODIZATION_VOLUME_WINDOW_DAYS",
            &mut self.volume.window_days,
        )?;
        Self::apply_env_var(
            "PERIODIZATION_FATIGUE_WINDOW_DAYS",
            &mut self.fatigue.window_days,
        )?;
        Self::apply_env_var(
            "PERIODIZATION_MESOCYCLE_WEEKS",
            &mut self.mesocycle.default_total_weeks,
        )?;
        Self::apply_env_var(
            "PERIODIZATION_PROGRESSION_OCCURRENCES",
            &mut self.progression.recent_occurrences,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        IntelligenceConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_inverted_rpe_thresholds() {
        let mut config = IntelligenceConfig::default();
        config.progression.low_effort_rpe = 9.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_rejects_empty_rule_table() {
        let mut config = IntelligenceConfig::default();
        config.volume.fallback_rules.rules.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField("volume.fallback_rules"))
        ));
    }

    #[test]
    fn test_landmark_defaults_lookup() {
        let defaults = LandmarkDefaults::default();
        assert_eq!(
            defaults.for_muscle_group("Chest"),
            LandmarkThresholds::from((8, 10, 16, 22))
        );
        assert_eq!(defaults.for_muscle_group("neck"), defaults.generic);
    }

    #[test]
    fn test_config_serializes() {
        let json = serde_json::to_string(&IntelligenceConfig::default()).unwrap();
        let back: IntelligenceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mesocycle.default_total_weeks, 5);
        assert_eq!(back.volume.feedback_rules.rules.len(), 8);
    }
}
