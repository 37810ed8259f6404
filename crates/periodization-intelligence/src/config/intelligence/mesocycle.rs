// ABOUTME: Mesocycle controller configuration for week advancement and landmark adaptation
// ABOUTME: Configures cycle length, deload streak, post-deload contraction, and recalibration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Mesocycle Controller Configuration

use periodization_core::constants::mesocycle;
use serde::{Deserialize, Serialize};

/// Mesocycle Controller Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MesocycleConfig {
    /// Weeks per mesocycle, deload week included
    pub default_total_weeks: u32,
    /// Consecutive flagged fatigue evaluations that force an early deload
    pub fatigue_flag_streak_for_deload: u32,
    /// Whether completing a deload contracts MEV and MAV
    pub apply_landmark_contraction: bool,
    /// Deload adjustment recorded when the report carries no deload directive
    pub default_deload_adjustment_pct: f64,
    /// Whether accumulation weeks recalibrate MAV from fatigue
    pub recalibrate_landmarks: bool,
    /// Mean fatigue at or below which MAV expands
    pub expansion_fatigue_ceiling: f64,
    /// Mean fatigue at or above which MAV contracts
    pub contraction_fatigue_floor: f64,
    /// Sets added or removed per recalibration
    pub recalibration_step: u32,
}

impl Default for MesocycleConfig {
    fn default() -> Self {
        Self {
            default_total_weeks: mesocycle::DEFAULT_TOTAL_WEEKS,
            fatigue_flag_streak_for_deload: mesocycle::FATIGUE_FLAG_STREAK_FOR_DELOAD,
            apply_landmark_contraction: true,
            default_deload_adjustment_pct: -30.0,
            recalibrate_landmarks: true,
            expansion_fatigue_ceiling: 3.0,
            contraction_fatigue_floor: 7.0,
            recalibration_step: 1,
        }
    }
}
