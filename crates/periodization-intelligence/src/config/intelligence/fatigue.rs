// ABOUTME: Fatigue analyzer configuration for readiness scoring and deload detection
// ABOUTME: Configures analysis window, deload thresholds, trend tolerance, and deload lead time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fatigue Analyzer Configuration
//!
//! A deload is flagged when the mean fatigue over the window reaches
//! `deload_mean_threshold`, or when at least `recent_flags_required` of the
//! last `recent_sessions` sessions individually reach `session_flag_threshold`.

use periodization_core::constants::windows;
use serde::{Deserialize, Serialize};

/// Fatigue Analyzer Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Default analysis window, in days
    pub window_days: u32,
    /// Mean fatigue at or above which a deload is flagged
    pub deload_mean_threshold: f64,
    /// Per-session fatigue at or above which a session counts as flagged
    pub session_flag_threshold: f64,
    /// How many of the most recent sessions are inspected
    pub recent_sessions: usize,
    /// Flagged sessions among the recent ones needed to flag a deload
    pub recent_flags_required: usize,
    /// Half-to-half fatigue change below which the trend is stable
    pub trend_tolerance: f64,
    /// Lower clamp for days until deload
    pub deload_days_min: u32,
    /// Upper clamp for days until deload
    pub deload_days_max: u32,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            window_days: windows::FATIGUE_WINDOW_DAYS,
            deload_mean_threshold: 7.0,
            session_flag_threshold: 7.0,
            recent_sessions: 3,
            recent_flags_required: 2,
            trend_tolerance: 0.5,
            deload_days_min: 3,
            deload_days_max: 7,
        }
    }
}
