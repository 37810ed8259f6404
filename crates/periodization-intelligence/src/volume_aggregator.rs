// ABOUTME: Weekly completed-set counting per muscle group over a rolling window
// ABOUTME: Per-set payloads are authoritative; the coarse counter is the fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Volume Aggregator
//!
//! Counts completed sets per muscle group. A set counts toward a muscle group
//! when the exercise has a contribution row for that group with a positive
//! percentage; the percentage decides inclusion only and never weights the
//! count.
//!
//! Each [`ExerciseLog`] is resolved once: the decoded `sets_data` payload is
//! used when present, otherwise the coarse `sets` counter. A malformed payload
//! falls back to the coarse counter with a warning.

use chrono::{Duration, NaiveDate};
use periodization_core::models::{
    ExerciseId, ExerciseLog, ExerciseMuscleContribution, MuscleGroupId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Where a completed-set count came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetSource {
    /// Decoded per-set payload
    Detailed,
    /// Coarse counter, no payload logged
    Coarse,
    /// Coarse counter, payload present but unparsable
    MalformedFallback,
}

/// Completed sets of one exercise log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedSets {
    /// Exercise performed
    pub exercise_id: ExerciseId,
    /// Completed set count
    pub count: u32,
    /// Origin of the count
    pub source: SetSource,
}

impl CompletedSets {
    /// Resolve the completed-set count of one log
    #[must_use]
    pub fn from_log(log: &ExerciseLog) -> Self {
        match log.decode_sets() {
            Ok(Some(records)) => {
                let completed = records.iter().filter(|set| set.completed).count();
                Self {
                    exercise_id: log.exercise_id,
                    count: u32::try_from(completed).unwrap_or(u32::MAX),
                    source: SetSource::Detailed,
                }
            }
            Ok(None) => Self {
                exercise_id: log.exercise_id,
                count: log.sets,
                source: SetSource::Coarse,
            },
            Err(e) => {
                warn!(
                    session_id = %log.session_id,
                    exercise_id = %log.exercise_id,
                    error = %e,
                    "Malformed sets payload, falling back to coarse set counter"
                );
                Self {
                    exercise_id: log.exercise_id,
                    count: log.sets,
                    source: SetSource::MalformedFallback,
                }
            }
        }
    }
}

/// Exercise to muscle group inclusion lookup
///
/// Built once per aggregation call from the contribution rows of every
/// exercise seen in the window.
#[derive(Debug, Clone, Default)]
pub struct ContributionIndex {
    by_exercise: HashMap<ExerciseId, Vec<MuscleGroupId>>,
}

impl ContributionIndex {
    /// Empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the contribution rows of one exercise
    ///
    /// Rows with a non-positive percentage are dropped.
    pub fn insert(&mut self, exercise_id: ExerciseId, rows: &[ExerciseMuscleContribution]) {
        let groups = rows
            .iter()
            .filter(|row| row.exercise_id == exercise_id && row.counts_toward_volume())
            .map(|row| row.muscle_group_id)
            .collect();
        self.by_exercise.insert(exercise_id, groups);
    }

    /// Whether contribution rows were registered for an exercise
    #[must_use]
    pub fn contains(&self, exercise_id: ExerciseId) -> bool {
        self.by_exercise.contains_key(&exercise_id)
    }

    /// Muscle groups an exercise counts toward
    #[must_use]
    pub fn muscle_groups(&self, exercise_id: ExerciseId) -> &[MuscleGroupId] {
        self.by_exercise
            .get(&exercise_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Whether an exercise counts toward a muscle group
    #[must_use]
    pub fn counts_toward(&self, exercise_id: ExerciseId, muscle_group_id: MuscleGroupId) -> bool {
        self.muscle_groups(exercise_id).contains(&muscle_group_id)
    }
}

/// Completed-set counting over resolved exercise logs
pub struct VolumeAggregator;

impl VolumeAggregator {
    /// First day of a rolling window ending on `today`
    #[must_use]
    pub fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
        today - Duration::days(i64::from(window_days))
    }

    /// Resolve every log to its completed-set count
    #[must_use]
    pub fn resolve(logs: &[ExerciseLog]) -> Vec<CompletedSets> {
        logs.iter().map(CompletedSets::from_log).collect()
    }

    /// Completed sets counted toward one muscle group
    #[must_use]
    pub fn count_for_muscle_group(
        sets: &[CompletedSets],
        index: &ContributionIndex,
        muscle_group_id: MuscleGroupId,
    ) -> u32 {
        sets.iter()
            .filter(|entry| index.counts_toward(entry.exercise_id, muscle_group_id))
            .map(|entry| entry.count)
            .sum()
    }

    /// Completed sets counted toward every muscle group, in one pass
    ///
    /// Muscle groups with no counted sets are absent from the result.
    #[must_use]
    pub fn count_all(
        sets: &[CompletedSets],
        index: &ContributionIndex,
    ) -> HashMap<MuscleGroupId, u32> {
        let mut totals: HashMap<MuscleGroupId, u32> = HashMap::new();
        for entry in sets {
            for muscle_group_id in index.muscle_groups(entry.exercise_id) {
                *totals.entry(*muscle_group_id).or_default() += entry.count;
            }
        }
        debug!(
            logs = sets.len(),
            muscle_groups = totals.len(),
            "Aggregated weekly volume"
        );
        totals
    }
}
