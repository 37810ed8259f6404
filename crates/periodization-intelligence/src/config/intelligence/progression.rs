// ABOUTME: Load progression configuration for next-session weight and set targets
// ABOUTME: Configures lookback, RPE thresholds, increase percentages, and rounding increment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use periodization_core::constants::{progression, windows};
use serde::{Deserialize, Serialize};

/// Load Progression Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Most recent completed occurrences considered
    pub recent_occurrences: usize,
    /// How far back to search for occurrences, in days
    pub lookback_days: u32,
    /// Mean RPE below which effort is low
    pub low_effort_rpe: f64,
    /// Mean RPE above which effort is high
    pub high_effort_rpe: f64,
    /// Increase for low effort, in percent
    pub low_effort_increase_percent: f64,
    /// Increase for moderate effort, in percent
    pub moderate_effort_increase_percent: f64,
    /// Increase for the two-set prescription, in percent
    pub two_set_increase_percent: f64,
    /// Increase applied with no history or no RPE data, in percent
    pub default_increase_percent: f64,
    /// Base weight used when no history and no caller weight exists
    pub default_base_weight: f64,
    /// Target weights are rounded to a multiple of this
    pub weight_increment: f64,
    /// High effort adds a set only below this count
    pub max_sets_before_hold: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            recent_occurrences: progression::RECENT_OCCURRENCES,
            lookback_days: windows::PROGRESSION_LOOKBACK_DAYS,
            low_effort_rpe: progression::DEFAULT_RPE_LOW,
            high_effort_rpe: progression::DEFAULT_RPE_HIGH,
            low_effort_increase_percent: 2.5,
            moderate_effort_increase_percent: 1.25,
            two_set_increase_percent: 2.5,
            default_increase_percent: 2.5,
            default_base_weight: progression::DEFAULT_BASE_WEIGHT,
            weight_increment: progression::WEIGHT_INCREMENT,
            max_sets_before_hold: progression::MAX_SETS_BEFORE_HOLD,
        }
    }
}
