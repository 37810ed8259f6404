// ABOUTME: Per-muscle-group weekly volume directives from volume, landmarks, and readiness
// ABOUTME: Dispatches once on feedback availability and evaluates the matching rule table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Volume Recommendation Engine
//!
//! The input is resolved once into a [`VolumeInput`]; the variant selects the
//! readiness table or the volume-only fallback table for the whole batch.
//! Per-muscle-group failures are reported as skipped items and never fail
//! the batch.

use crate::algorithms::VolumeRuleTable;
use crate::config::intelligence::VolumeConfig;
use crate::fatigue_analyzer::{FatigueAnalyzer, SessionScore};
use chrono::Utc;
use periodization_core::errors::{AppError, AppResult};
use periodization_core::models::{
    AutoRegulationFeedback, FeedbackMode, MuscleGroup, Recommendation, SkippedItem, UserId,
    VolumeLandmark, VolumeRecommendationReport,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How the batch is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum VolumeInput {
    /// Readiness is known; the readiness table applies
    WithFeedback {
        /// Readiness score (0-10)
        readiness: f64,
    },
    /// No feedback; the volume-only table applies
    WithoutFeedback,
}

impl VolumeInput {
    /// Resolve the input from an explicit record or the window's feedback
    ///
    /// An explicit record wins; otherwise the mean readiness of the window is
    /// used; with neither, the fallback table applies.
    #[must_use]
    pub fn resolve(
        explicit: Option<&AutoRegulationFeedback>,
        window: &[AutoRegulationFeedback],
    ) -> Self {
        explicit
            .map(|record| SessionScore::from_feedback(record).readiness)
            .or_else(|| FatigueAnalyzer::mean_readiness(window))
            .map_or(Self::WithoutFeedback, |readiness| Self::WithFeedback {
                readiness,
            })
    }

    /// Readiness carried by the input
    #[must_use]
    pub const fn readiness(&self) -> Option<f64> {
        match self {
            Self::WithFeedback { readiness } => Some(*readiness),
            Self::WithoutFeedback => None,
        }
    }

    /// Mode reported on the output
    #[must_use]
    pub const fn mode(&self) -> FeedbackMode {
        match self {
            Self::WithFeedback { .. } => FeedbackMode::WithFeedback,
            Self::WithoutFeedback => FeedbackMode::WithoutFeedback,
        }
    }
}

/// Everything needed to evaluate one muscle group
#[derive(Debug, Clone)]
pub struct MuscleGroupVolume {
    /// Muscle group being evaluated
    pub muscle_group: MuscleGroup,
    /// Completed sets in the window
    pub volume: u32,
    /// The user's landmarks for the muscle group
    pub landmark: VolumeLandmark,
}

/// Weekly volume directive engine
#[derive(Debug, Clone, Default)]
pub struct VolumeRecommendationEngine {
    config: VolumeConfig,
}

impl VolumeRecommendationEngine {
    /// Create an engine with the given rule tables
    #[must_use]
    pub const fn new(config: VolumeConfig) -> Self {
        Self { config }
    }

    const fn table(&self, input: VolumeInput) -> &VolumeRuleTable {
        match input {
            VolumeInput::WithFeedback { .. } => &self.config.feedback_rules,
            VolumeInput::WithoutFeedback => &self.config.fallback_rules,
        }
    }

    /// Directive for one muscle group
    ///
    /// # Errors
    ///
    /// Returns an `InternalError` when no rule matches, which only happens for
    /// a non-finite readiness or a custom table with gaps.
    pub fn recommend(
        &self,
        input: VolumeInput,
        entry: &MuscleGroupVolume,
    ) -> AppResult<Recommendation> {
        let readiness = input.readiness();
        let rule = self
            .table(input)
            .evaluate(readiness, entry.volume, &entry.landmark)
            .ok_or_else(|| {
                AppError::internal(format!(
                    "No volume rule matched muscle group {} (volume {}, readiness {readiness:?})",
                    entry.muscle_group.id, entry.volume
                ))
                .with_resource_id(entry.muscle_group.id.to_string())
            })?;

        debug!(
            muscle_group_id = %entry.muscle_group.id,
            volume = entry.volume,
            rule = %rule.name,
            "Volume rule matched"
        );

        Ok(Recommendation {
            muscle_group_id: entry.muscle_group.id,
            muscle_group_name: entry.muscle_group.name.clone(),
            current_volume: entry.volume,
            adjustment_percent: rule.adjustment_percent,
            target_sets: rule.target_sets(entry.volume, &entry.landmark),
            reason: rule.render_reason(entry.volume, readiness, &entry.landmark),
            confidence: rule.confidence,
            category: rule.category,
        })
    }

    /// Directives for every entry, collecting failures as skipped items
    ///
    /// `skipped` carries items that already failed upstream (data lookups).
    #[must_use]
    pub fn recommend_batch(
        &self,
        user_id: UserId,
        input: VolumeInput,
        entries: &[MuscleGroupVolume],
        mut skipped: Vec<SkippedItem>,
    ) -> VolumeRecommendationReport {
        let mut recommendations = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.recommend(input, entry) {
                Ok(recommendation) => recommendations.push(recommendation),
                Err(e) => {
                    warn!(
                        user_id = %user_id,
                        muscle_group_id = %entry.muscle_group.id,
                        error = %e,
                        "Skipping muscle group"
                    );
                    skipped.push(SkippedItem {
                        id: entry.muscle_group.id.to_string(),
                        reason: e.message,
                    });
                }
            }
        }

        VolumeRecommendationReport {
            user_id,
            generated_at: Utc::now(),
            feedback_mode: input.mode(),
            readiness: input.readiness(),
            recommendations,
            skipped,
        }
    }
}
