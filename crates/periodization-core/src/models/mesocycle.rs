// ABOUTME: Mesocycle state persisted per user - week counter, phase, and fatigue bookkeeping
// ABOUTME: Mutated only by the mesocycle controller; a finished cycle seeds the next one
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the current mesocycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MesocyclePhase {
    /// Progressive overload weeks
    #[default]
    Accumulation,
    /// Planned low-volume recovery week
    Deload,
}

impl MesocyclePhase {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accumulation => "accumulation",
            Self::Deload => "deload",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "deload" => Self::Deload,
            _ => Self::Accumulation,
        }
    }
}

impl fmt::Display for MesocyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-user mesocycle progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesocycleState {
    /// Owner
    pub user_id: UserId,
    /// 1-based week within the current mesocycle
    pub current_week: u32,
    /// Planned length of the mesocycle in weeks, deload included
    pub total_weeks: u32,
    /// Current phase
    pub phase: MesocyclePhase,
    /// Date the current mesocycle started
    pub start_date: NaiveDate,
    /// 1-based count of mesocycles run by this user
    pub mesocycle_number: u32,
    /// Consecutive evaluations in which the fatigue analyzer flagged a deload
    pub fatigue_flag_streak: u32,
    /// Adjustment percent of the most recent deload recommendation, if any
    pub last_deload_adjustment_pct: Option<f64>,
}

impl MesocycleState {
    /// Fresh first-week state
    #[must_use]
    pub const fn initial(user_id: UserId, total_weeks: u32, start_date: NaiveDate) -> Self {
        Self {
            user_id,
            current_week: 1,
            total_weeks,
            phase: MesocyclePhase::Accumulation,
            start_date,
            mesocycle_number: 1,
            fatigue_flag_streak: 0,
            last_deload_adjustment_pct: None,
        }
    }

    /// Whether the user is in a deload week
    #[must_use]
    pub fn is_deload(&self) -> bool {
        self.phase == MesocyclePhase::Deload
    }
}

impl fmt::Display for MesocycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            MesocyclePhase::Accumulation => write!(
                f,
                "mesocycle {} accumulation week {} of {}",
                self.mesocycle_number, self.current_week, self.total_weeks
            ),
            MesocyclePhase::Deload => write!(f, "mesocycle {} deload", self.mesocycle_number),
        }
    }
}
