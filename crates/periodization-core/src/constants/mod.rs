// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Feedback scales, analysis windows, progression defaults, and default volume landmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the component that owns them. Tunable thresholds
//! live in the intelligence configuration; the values here are the defaults it
//! starts from and fixed scales that are not meant to be tuned.

/// Subjective feedback rating scale
pub mod feedback {
    /// Lowest valid rating
    pub const RATING_MIN: u8 = 1;
    /// Highest valid rating
    pub const RATING_MAX: u8 = 10;
    /// Upper end of the readiness/fatigue scale
    pub const SCALE_MAX: f64 = 10.0;
    /// Neutral fatigue reported when no feedback exists
    pub const NEUTRAL_FATIGUE: f64 = 5.0;
}

/// Default analysis windows
pub mod windows {
    /// Rolling window for weekly volume aggregation
    pub const VOLUME_WINDOW_DAYS: u32 = 7;
    /// Rolling window for fatigue analysis
    pub const FATIGUE_WINDOW_DAYS: u32 = 14;
    /// How far back to look for past occurrences of an exercise
    pub const PROGRESSION_LOOKBACK_DAYS: u32 = 56;
}

/// Load progression defaults
pub mod progression {
    /// Occurrences of an exercise considered for the mean RPE
    pub const RECENT_OCCURRENCES: usize = 3;
    /// Starting weight when neither history nor a base weight exists
    pub const DEFAULT_BASE_WEIGHT: f64 = 20.0;
    /// Weight outputs are rounded to a multiple of this increment
    pub const WEIGHT_INCREMENT: f64 = 0.25;
    /// Set count at which high effort holds instead of adding a set
    pub const MAX_SETS_BEFORE_HOLD: u32 = 4;
    /// Default prescribed working sets
    pub const DEFAULT_PRESCRIBED_SETS: u32 = 3;
    /// Default rep range lower bound
    pub const DEFAULT_REP_RANGE_MIN: u32 = 8;
    /// Default rep range upper bound
    pub const DEFAULT_REP_RANGE_MAX: u32 = 12;
    /// Default RPE band lower bound
    pub const DEFAULT_RPE_LOW: f64 = 7.0;
    /// Default RPE band upper bound
    pub const DEFAULT_RPE_HIGH: f64 = 8.0;
}

/// Mesocycle defaults
pub mod mesocycle {
    /// Planned mesocycle length in weeks, deload included
    pub const DEFAULT_TOTAL_WEEKS: u32 = 5;
    /// Consecutive flagged fatigue evaluations that force an early deload
    pub const FATIGUE_FLAG_STREAK_FOR_DELOAD: u32 = 2;
}

/// Default weekly set landmarks (MV, MEV, MAV, MRV)
///
/// Starting points from Renaissance Periodization volume guidelines. They are
/// seeded on first use and adjusted per user from there.
pub mod landmarks {
    /// Landmarks used for muscle groups without a specific entry
    pub const GENERIC: (u32, u32, u32, u32) = (4, 8, 14, 20);

    /// Landmarks keyed by lowercase muscle group name
    pub const BY_MUSCLE_GROUP: &[(&str, (u32, u32, u32, u32))] = &[
        ("chest", (8, 10, 16, 22)),
        ("back", (8, 10, 18, 25)),
        ("quads", (6, 8, 15, 20)),
        ("hamstrings", (4, 6, 13, 20)),
        ("glutes", (0, 0, 8, 16)),
        ("shoulders", (6, 8, 19, 26)),
        ("side delts", (6, 8, 19, 26)),
        ("rear delts", (0, 6, 16, 22)),
        ("biceps", (4, 8, 17, 26)),
        ("triceps", (4, 6, 12, 18)),
        ("calves", (6, 8, 14, 20)),
        ("abs", (0, 0, 20, 25)),
        ("traps", (0, 0, 16, 26)),
        ("forearms", (2, 4, 12, 20)),
    ];

    /// Default landmarks for a muscle group name
    #[must_use]
    pub fn for_muscle_group(name: &str) -> (u32, u32, u32, u32) {
        let normalized = name.trim().to_lowercase();
        BY_MUSCLE_GROUP
            .iter()
            .find(|(key, _)| *key == normalized)
            .map_or(GENERIC, |(_, thresholds)| *thresholds)
    }
}

/// Service identity used in structured logs
pub mod service_names {
    /// Engine service name
    pub const PERIODIZATION_ENGINE: &str = "periodization-engine";
}
