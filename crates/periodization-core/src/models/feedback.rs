// ABOUTME: Post-session subjective feedback used for auto-regulation
// ABOUTME: Each field is a 1-10 rating; out-of-scale values are clamped before analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::{SessionId, UserId};
use crate::constants::feedback::{RATING_MAX, RATING_MIN};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Subjective feedback recorded once per completed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoRegulationFeedback {
    /// Session the feedback refers to
    pub session_id: SessionId,
    /// Athlete who gave the feedback
    pub user_id: UserId,
    /// Date of the session
    pub date: NaiveDate,
    /// Quality of the muscle pump (higher is better)
    pub pump_quality: u8,
    /// Residual soreness (higher is worse)
    pub muscle_soreness: u8,
    /// How hard the session felt (higher is harder)
    pub perceived_effort: u8,
    /// Energy level going into the session (higher is better)
    pub energy_level: u8,
    /// Sleep quality the night before (higher is better)
    pub sleep_quality: u8,
}

impl AutoRegulationFeedback {
    /// Whether every rating is within the 1-10 scale
    #[must_use]
    pub fn is_within_scale(&self) -> bool {
        self.ratings()
            .iter()
            .all(|rating| (RATING_MIN..=RATING_MAX).contains(rating))
    }

    /// Copy of this record with every rating clamped into the 1-10 scale
    #[must_use]
    pub fn clamped(&self) -> Self {
        let clamp = |value: u8| value.clamp(RATING_MIN, RATING_MAX);
        Self {
            pump_quality: clamp(self.pump_quality),
            muscle_soreness: clamp(self.muscle_soreness),
            perceived_effort: clamp(self.perceived_effort),
            energy_level: clamp(self.energy_level),
            sleep_quality: clamp(self.sleep_quality),
            ..self.clone()
        }
    }

    fn ratings(&self) -> [u8; 5] {
        [
            self.pump_quality,
            self.muscle_soreness,
            self.perceived_effort,
            self.energy_level,
            self.sleep_quality,
        ]
    }
}
