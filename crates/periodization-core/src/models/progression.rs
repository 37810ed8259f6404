// ABOUTME: Load progression inputs and outputs - prior prescription and next-session target
// ABOUTME: Rep ranges and RPE bands carry over unless a progression rule changes them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::ExerciseId;
use crate::constants::progression::{
    DEFAULT_PRESCRIBED_SETS, DEFAULT_REP_RANGE_MAX, DEFAULT_REP_RANGE_MIN, DEFAULT_RPE_HIGH,
    DEFAULT_RPE_LOW,
};
use serde::{Deserialize, Serialize};

/// Inclusive repetition target range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepRange {
    /// Lowest acceptable reps per set
    pub min: u32,
    /// Highest targeted reps per set
    pub max: u32,
}

impl Default for RepRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_REP_RANGE_MIN,
            max: DEFAULT_REP_RANGE_MAX,
        }
    }
}

/// Inclusive target effort band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RpeBand {
    /// Lower bound (RPE)
    pub low: f64,
    /// Upper bound (RPE)
    pub high: f64,
}

impl Default for RpeBand {
    fn default() -> Self {
        Self {
            low: DEFAULT_RPE_LOW,
            high: DEFAULT_RPE_HIGH,
        }
    }
}

/// The prescription used the last time the exercise was programmed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorPrescription {
    /// Working sets
    pub sets: u32,
    /// Rep target
    pub rep_range: RepRange,
    /// Starting weight to use when no history exists
    pub base_weight: Option<f64>,
    /// Effort target
    pub rpe_band: RpeBand,
}

impl Default for PriorPrescription {
    fn default() -> Self {
        Self {
            sets: DEFAULT_PRESCRIBED_SETS,
            rep_range: RepRange::default(),
            base_weight: None,
            rpe_band: RpeBand::default(),
        }
    }
}

/// Which progression rule produced a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressionRuleKind {
    /// No usable history; flat increase on the base weight
    NoHistory,
    /// History exists but no set reported an RPE; flat increase on the last weight
    UnratedIncrease,
    /// Exactly two prescribed sets with manageable effort
    TwoSetIncrease,
    /// Mean RPE below 7
    LowEffortIncrease,
    /// Mean RPE between 7 and 8
    ModerateEffortIncrease,
    /// Mean RPE above 8 with room for another set
    HighEffortAddSet,
    /// Mean RPE above 8 at the set ceiling
    HighEffortHold,
}

/// Next-session target for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionTarget {
    /// Exercise the target applies to
    pub exercise_id: ExerciseId,
    /// Load to use, rounded to the nearest 0.25
    pub target_weight: f64,
    /// Working sets
    pub target_sets: u32,
    /// Rep target
    pub target_rep_range: RepRange,
    /// Effort target
    pub target_rpe: RpeBand,
    /// Rule that produced the target
    pub rule: ProgressionRuleKind,
    /// Human-readable explanation
    pub reason: String,
    /// Mean RPE of the occurrences considered, when any reported RPE
    pub mean_rpe: Option<f64>,
    /// Number of past occurrences considered
    pub occurrences_considered: usize,
}
