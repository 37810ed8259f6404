// ABOUTME: Workout session and set record models as logged by the surrounding application
// ABOUTME: ExerciseLog carries both the coarse set counter and the fine-grained per-set payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::{ExerciseId, SessionId, UserId};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A logged training session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Unique identifier
    pub id: SessionId,
    /// Owner of the session
    pub user_id: UserId,
    /// Calendar date the session was performed
    pub date: NaiveDate,
    /// Whether the session was marked completed
    pub completed: bool,
    /// Session duration in minutes
    pub duration_minutes: Option<u32>,
    /// Total load moved (weight x reps) across the session
    pub total_volume: f64,
}

/// One performed set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSetRecord {
    /// Session the set belongs to
    pub session_id: SessionId,
    /// Exercise performed
    pub exercise_id: ExerciseId,
    /// Zero-based position of the set within the exercise
    pub set_index: u32,
    /// Load used
    pub weight: f64,
    /// Repetitions actually completed
    pub actual_reps: u32,
    /// Rate of perceived exertion (1-10)
    pub rpe: Option<f64>,
    /// Reps in reserve
    pub rir: Option<u32>,
    /// Whether the set was completed
    pub completed: bool,
}

/// Per-exercise row of a session as stored by the logging application
///
/// `sets` is the coarse planned/logged counter. `sets_data` is the optional
/// JSON array of per-set entries; when present and well-formed it is
/// authoritative over `sets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Session the row belongs to
    pub session_id: SessionId,
    /// Exercise performed
    pub exercise_id: ExerciseId,
    /// Coarse set counter
    pub sets: u32,
    /// Raw per-set payload
    pub sets_data: Option<String>,
}

/// One element of the `sets_data` payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetPayloadEntry {
    #[serde(default)]
    weight: f64,
    #[serde(default, alias = "actualReps")]
    reps: u32,
    #[serde(default)]
    rpe: Option<f64>,
    #[serde(default)]
    rir: Option<u32>,
    #[serde(default)]
    completed: bool,
}

impl ExerciseLog {
    /// Decode the fine-grained per-set payload
    ///
    /// Returns `Ok(None)` when no payload was logged (absent, blank, JSON
    /// `null` or an empty array), so the caller falls back to the coarse counter.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidFormat` error when the payload is present but cannot
    /// be parsed.
    pub fn decode_sets(&self) -> AppResult<Option<Vec<WorkoutSetRecord>>> {
        let Some(raw) = self.sets_data.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }

        let entries: Option<Vec<SetPayloadEntry>> = serde_json::from_str(raw).map_err(|e| {
            AppError::invalid_format(format!(
                "Unparsable sets payload for exercise {} in session {}: {e}",
                self.exercise_id, self.session_id
            ))
            .with_resource_id(self.session_id.to_string())
        })?;

        Ok(entries.filter(|entries| !entries.is_empty()).map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| WorkoutSetRecord {
                    session_id: self.session_id,
                    exercise_id: self.exercise_id,
                    set_index: u32::try_from(index).unwrap_or(u32::MAX),
                    weight: entry.weight,
                    actual_reps: entry.reps,
                    rpe: entry.rpe,
                    rir: entry.rir,
                    completed: entry.completed,
                })
                .collect()
        }))
    }
}
