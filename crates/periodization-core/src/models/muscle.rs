// ABOUTME: Muscle group reference data and exercise-to-muscle contribution weights
// ABOUTME: Contributions are independent stimulus weights per muscle, not a partition of the exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::{ExerciseId, MuscleGroupId};
use serde::{Deserialize, Serialize};

/// Region of the body a muscle group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyRegion {
    /// Chest, back, shoulders, arms
    #[default]
    Upper,
    /// Quads, hamstrings, glutes, calves
    Lower,
    /// Abs and obliques
    Core,
}

impl BodyRegion {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Core => "core",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "lower" => Self::Lower,
            "core" => Self::Core,
            // Default to Upper for unrecognized values
            _ => Self::Upper,
        }
    }
}

/// Priority tier used when ordering recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    /// Large prime movers trained directly every week
    Primary,
    /// Muscles that receive most work indirectly
    #[default]
    Secondary,
    /// Small muscles trained for completeness
    Accessory,
}

impl PriorityTier {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accessory => "accessory",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "primary" => Self::Primary,
            "accessory" => Self::Accessory,
            _ => Self::Secondary,
        }
    }
}

/// A trainable muscle group (static reference data)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleGroup {
    /// Unique identifier
    pub id: MuscleGroupId,
    /// Display name ("Chest", "Quads", ...)
    pub name: String,
    /// Body region
    pub body_region: BodyRegion,
    /// Priority tier
    pub priority_tier: PriorityTier,
}

/// Whether an exercise targets a muscle directly or as a synergist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContributionRole {
    /// Prime mover
    #[default]
    Primary,
    /// Synergist or stabiliser
    Secondary,
}

impl ContributionRole {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "secondary" => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// How much stimulus an exercise gives a muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseMuscleContribution {
    /// Exercise being described
    pub exercise_id: ExerciseId,
    /// Muscle group receiving stimulus
    pub muscle_group_id: MuscleGroupId,
    /// Stimulus weight in percent (0-100)
    pub contribution_percent: f64,
    /// Primary or secondary role
    pub role: ContributionRole,
}

impl ExerciseMuscleContribution {
    /// A set of this exercise counts toward the muscle only with a positive contribution
    #[must_use]
    pub fn counts_toward_volume(&self) -> bool {
        self.contribution_percent > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_contribution_does_not_count() {
        let contribution = ExerciseMuscleContribution {
            exercise_id: ExerciseId(1),
            muscle_group_id: MuscleGroupId(2),
            contribution_percent: 0.0,
            role: ContributionRole::Secondary,
        };
        assert!(!contribution.counts_toward_volume());
    }

    #[test]
    fn test_enum_parsing_defaults() {
        assert_eq!(BodyRegion::parse("LOWER"), BodyRegion::Lower);
        assert_eq!(BodyRegion::parse("unknown"), BodyRegion::Upper);
        assert_eq!(PriorityTier::parse("accessory"), PriorityTier::Accessory);
        assert_eq!(ContributionRole::parse("secondary"), ContributionRole::Secondary);
    }
}
