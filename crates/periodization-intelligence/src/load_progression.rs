// ABOUTME: Next-session load, set, rep, and effort targets per exercise from recent occurrences
// ABOUTME: Mean RPE of recent occurrences selects a progression rule; weights round to 0.25
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Load Progression Tracker
//!
//! An occurrence is one completed session containing the exercise. Its weight
//! is the heaviest completed set and its RPE the mean of the completed sets
//! that reported one. The most recent occurrences feed the rule table in
//! [`crate::algorithms::progression_rules`].
#![allow(clippy::cast_precision_loss)] // Safe: occurrence counts are small

use crate::algorithms::{ProgressionAction, ProgressionRuleTable};
use crate::config::intelligence::ProgressionConfig;
use chrono::NaiveDate;
use periodization_core::models::{
    ExerciseId, PriorPrescription, ProgressionRuleKind, ProgressionTarget, SessionId,
    WorkoutSetRecord,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One past session containing the exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseOccurrence {
    /// Session the exercise was performed in
    pub session_id: SessionId,
    /// Session date
    pub date: NaiveDate,
    /// Heaviest completed set
    pub weight: f64,
    /// Mean RPE of completed sets reporting one
    pub mean_rpe: Option<f64>,
    /// Completed sets
    pub completed_sets: u32,
}

impl ExerciseOccurrence {
    /// Summarize the set records of one session; `None` when no set was completed
    #[must_use]
    pub fn from_sets(
        session_id: SessionId,
        date: NaiveDate,
        records: &[WorkoutSetRecord],
    ) -> Option<Self> {
        let completed: Vec<&WorkoutSetRecord> = records.iter().filter(|r| r.completed).collect();
        if completed.is_empty() {
            return None;
        }

        let weight = completed
            .iter()
            .map(|r| r.weight)
            .fold(f64::NEG_INFINITY, f64::max);
        let rpes: Vec<f64> = completed.iter().filter_map(|r| r.rpe).collect();

        Some(Self {
            session_id,
            date,
            weight,
            mean_rpe: mean(&rpes),
            completed_sets: u32::try_from(completed.len()).unwrap_or(u32::MAX),
        })
    }
}

/// Round a weight to the nearest multiple of `increment`
#[must_use]
pub fn round_to_increment(weight: f64, increment: f64) -> f64 {
    if increment <= 0.0 {
        return weight;
    }
    (weight / increment).round() * increment
}

/// Per-exercise load progression
#[derive(Debug, Clone)]
pub struct LoadProgressionTracker {
    config: ProgressionConfig,
    rules: ProgressionRuleTable,
}

impl Default for LoadProgressionTracker {
    fn default() -> Self {
        Self::new(ProgressionConfig::default())
    }
}

impl LoadProgressionTracker {
    /// Create a tracker with the given thresholds
    #[must_use]
    pub fn new(config: ProgressionConfig) -> Self {
        let rules = ProgressionRuleTable::from_config(&config);
        Self { config, rules }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    /// Target for the next occurrence of an exercise
    ///
    /// `occurrences` may be in any order; only the most recent
    /// `recent_occurrences` are considered.
    #[must_use]
    pub fn target(
        &self,
        exercise_id: ExerciseId,
        prior: &PriorPrescription,
        occurrences: &[ExerciseOccurrence],
    ) -> ProgressionTarget {
        let mut recent: Vec<&ExerciseOccurrence> = occurrences.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.session_id.cmp(&a.session_id)));
        recent.truncate(self.config.recent_occurrences);

        let carry_over = ProgressionTarget {
            exercise_id,
            target_weight: 0.0,
            target_sets: prior.sets,
            target_rep_range: prior.rep_range,
            target_rpe: prior.rpe_band,
            rule: ProgressionRuleKind::NoHistory,
            reason: String::new(),
            mean_rpe: None,
            occurrences_considered: recent.len(),
        };

        let Some(latest) = recent.first() else {
            let base = prior.base_weight.unwrap_or(self.config.default_base_weight);
            let target_weight = self.increase(base, self.config.default_increase_percent);
            return ProgressionTarget {
                target_weight,
                reason: format!(
                    "No completed history; starting from {base} with a {}% increase",
                    self.config.default_increase_percent
                ),
                ..carry_over
            };
        };

        let rpes: Vec<f64> = recent.iter().filter_map(|o| o.mean_rpe).collect();
        let mean_rpe = mean(&rpes);
        let rule = mean_rpe.and_then(|rpe| self.rules.evaluate(rpe, prior.sets));

        let target = match (mean_rpe, rule) {
            (Some(rpe), Some(rule)) => {
                let (target_weight, target_sets, reason) = match rule.action {
                    ProgressionAction::IncreaseWeight { percent } => (
                        self.increase(latest.weight, percent),
                        prior.sets,
                        format!(
                            "Mean RPE {rpe:.1} over {} sessions; increase load {percent}% from {}",
                            recent.len(),
                            latest.weight
                        ),
                    ),
                    ProgressionAction::AddSet => (
                        round_to_increment(latest.weight, self.config.weight_increment),
                        prior.sets + 1,
                        format!(
                            "Mean RPE {rpe:.1} is high; hold load and add a set ({} -> {})",
                            prior.sets,
                            prior.sets + 1
                        ),
                    ),
                    ProgressionAction::Hold => (
                        round_to_increment(latest.weight, self.config.weight_increment),
                        prior.sets,
                        format!(
                            "Mean RPE {rpe:.1} is high at {} sets; hold load and sets",
                            prior.sets
                        ),
                    ),
                };
                ProgressionTarget {
                    target_weight,
                    target_sets,
                    rule: rule.kind,
                    reason,
                    mean_rpe,
                    ..carry_over
                }
            }
            _ => ProgressionTarget {
                target_weight: self.increase(latest.weight, self.config.default_increase_percent),
                rule: ProgressionRuleKind::UnratedIncrease,
                reason: format!(
                    "No RPE reported in the last {} sessions; increase load {}% from {}",
                    recent.len(),
                    self.config.default_increase_percent,
                    latest.weight
                ),
                ..carry_over
            },
        };

        debug!(
            exercise_id = %exercise_id,
            rule = ?target.rule,
            target_weight = target.target_weight,
            target_sets = target.target_sets,
            "Progression target computed"
        );
        target
    }

    fn increase(&self, weight: f64, percent: f64) -> f64 {
        round_to_increment(
            weight * (1.0 + percent / 100.0),
            self.config.weight_increment,
        )
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
