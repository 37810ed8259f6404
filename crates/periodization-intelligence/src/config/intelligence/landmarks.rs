// ABOUTME: Default volume landmark configuration used when seeding a user's landmarks
// ABOUTME: Generic thresholds plus per-muscle-group overrides keyed by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use periodization_core::constants::landmarks;
use serde::{Deserialize, Serialize};

/// Seed thresholds for one muscle group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkThresholds {
    /// Maintenance volume
    pub mv: u32,
    /// Minimum effective volume
    pub mev: u32,
    /// Maximum adaptive volume
    pub mav: u32,
    /// Maximum recoverable volume
    pub mrv: u32,
}

impl LandmarkThresholds {
    /// Whether `mv <= mev <= mav <= mrv` holds
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.mv <= self.mev && self.mev <= self.mav && self.mav <= self.mrv
    }
}

impl From<(u32, u32, u32, u32)> for LandmarkThresholds {
    fn from((mv, mev, mav, mrv): (u32, u32, u32, u32)) -> Self {
        Self { mv, mev, mav, mrv }
    }
}

/// Named override entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleGroupLandmarks {
    /// Muscle group name, matched case-insensitively
    pub name: String,
    /// Seed thresholds
    pub thresholds: LandmarkThresholds,
}

/// Landmark seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandmarkDefaults {
    /// Thresholds for muscle groups without an override
    pub generic: LandmarkThresholds,
    /// Per-muscle-group overrides
    pub by_muscle_group: Vec<MuscleGroupLandmarks>,
}

impl LandmarkDefaults {
    /// Seed thresholds for a muscle group name
    #[must_use]
    pub fn for_muscle_group(&self, name: &str) -> LandmarkThresholds {
        let normalized = name.trim();
        self.by_muscle_group
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(normalized))
            .map_or(self.generic, |entry| entry.thresholds)
    }
}

impl Default for LandmarkDefaults {
    fn default() -> Self {
        Self {
            generic: landmarks::GENERIC.into(),
            by_muscle_group: landmarks::BY_MUSCLE_GROUP
                .iter()
                .map(|(name, thresholds)| MuscleGroupLandmarks {
                    name: (*name).to_owned(),
                    thresholds: (*thresholds).into(),
                })
                .collect(),
        }
    }
}
