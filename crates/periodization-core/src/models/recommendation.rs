// ABOUTME: Engine output records - per-muscle volume directives and the batch report wrapping them
// ABOUTME: Every directive carries a human-readable reason alongside its numeric fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::{MuscleGroupId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a weekly volume directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    /// Add sets next week
    Increase,
    /// Remove some sets next week
    Decrease,
    /// Keep the current set count
    Maintain,
    /// Cut volume sharply to dissipate fatigue
    Deload,
}

impl RecommendationCategory {
    /// Lowercase label
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Maintain => "maintain",
            Self::Deload => "deload",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly volume directive for one muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Muscle group the directive applies to
    pub muscle_group_id: MuscleGroupId,
    /// Display name of the muscle group
    pub muscle_group_name: String,
    /// Completed sets in the aggregation window
    pub current_volume: u32,
    /// Signed percentage change to apply to the weekly set count
    pub adjustment_percent: f64,
    /// Suggested weekly set count after the adjustment
    pub target_sets: u32,
    /// Human-readable explanation of the directive
    pub reason: String,
    /// Confidence in the directive (1-10)
    pub confidence: u8,
    /// Direction of the directive
    pub category: RecommendationCategory,
}

/// Whether readiness data drove the recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackMode {
    /// Readiness-based rule table
    WithFeedback,
    /// Volume-only fallback table
    WithoutFeedback,
}

/// An entity omitted from a batch result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// Identifier of the omitted entity
    pub id: String,
    /// Why it was omitted
    pub reason: String,
}

/// Result of a volume recommendation batch
///
/// Failures for individual muscle groups never fail the batch; they are
/// listed in `skipped` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRecommendationReport {
    /// User the report was computed for
    pub user_id: UserId,
    /// Computation time
    pub generated_at: DateTime<Utc>,
    /// Which rule table produced the directives
    pub feedback_mode: FeedbackMode,
    /// Readiness used by the rule table, when feedback was available
    pub readiness: Option<f64>,
    /// Directives, one per successfully evaluated muscle group
    pub recommendations: Vec<Recommendation>,
    /// Muscle groups that could not be evaluated
    pub skipped: Vec<SkippedItem>,
}

impl VolumeRecommendationReport {
    /// Report with no directives, used when the muscle group list itself is unavailable
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            generated_at: Utc::now(),
            feedback_mode: FeedbackMode::WithoutFeedback,
            readiness: None,
            recommendations: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Number of muscle groups omitted from the report
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Directive for a muscle group, if one was produced
    #[must_use]
    pub fn for_muscle_group(&self, id: MuscleGroupId) -> Option<&Recommendation> {
        self.recommendations
            .iter()
            .find(|recommendation| recommendation.muscle_group_id == id)
    }

    /// Most negative adjustment among deload directives
    #[must_use]
    pub fn deload_adjustment(&self) -> Option<f64> {
        self.recommendations
            .iter()
            .filter(|r| r.category == RecommendationCategory::Deload)
            .map(|r| r.adjustment_percent)
            .reduce(f64::min)
    }
}
