// ABOUTME: Mesocycle state machine - accumulation weeks, deload entry and exit, landmark actions
// ABOUTME: Pure transitions; the caller persists the new state and applies the landmark action
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Mesocycle Controller
//!
//! ```text
//! accumulation(1 of N) -> ... -> accumulation(N-1 of N) -> deload -> accumulation(1 of N)
//! ```
//!
//! Every advance during accumulation evaluates fatigue. A flagged evaluation
//! extends the streak, an unflagged one resets it. The week counter then
//! moves on and the deload starts once the counter passes `N - 1` or the
//! streak reaches its threshold, whichever comes first.
//!
//! Advancing out of a deload completes the mesocycle and starts the next one.
//! The transition tells the caller which landmark adjustment to apply.

use crate::config::intelligence::MesocycleConfig;
use crate::fatigue_analyzer::FatigueAnalysis;
use chrono::NaiveDate;
use periodization_core::models::{MesocyclePhase, MesocycleState, UserId};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Why a deload started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeloadTrigger {
    /// The accumulation weeks ran out
    ScheduledWeek,
    /// Fatigue was flagged on consecutive evaluations
    FatigueStreak,
}

/// What happened on an advance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// Moved to the next accumulation week
    WeekAdvanced,
    /// Entered the deload week
    DeloadStarted {
        /// Cause
        trigger: DeloadTrigger,
    },
    /// Finished the deload and started a new mesocycle
    MesocycleCompleted,
}

/// Landmark adjustment the caller applies after persisting the transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LandmarkAction {
    /// Leave landmarks alone
    None,
    /// Adjust MAV from the week's fatigue
    Recalibrate,
    /// Nudge MEV and MAV down by `percent`
    Contract {
        /// Contraction in percent
        percent: f64,
    },
}

/// Result of one advance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MesocycleTransition {
    /// State after the advance
    pub state: MesocycleState,
    /// What happened
    pub event: TransitionEvent,
    /// Landmark adjustment to apply
    pub landmark_action: LandmarkAction,
}

/// Mesocycle state machine
#[derive(Debug, Clone, Default)]
pub struct MesocycleController {
    config: MesocycleConfig,
}

impl MesocycleController {
    /// Create a controller with the given settings
    #[must_use]
    pub const fn new(config: MesocycleConfig) -> Self {
        Self { config }
    }

    /// State for a user with no mesocycle yet
    #[must_use]
    pub const fn initial(&self, user_id: UserId, today: NaiveDate) -> MesocycleState {
        MesocycleState::initial(user_id, self.config.default_total_weeks, today)
    }

    /// Advance one week
    ///
    /// `fatigue` is the current fatigue picture. `deload_adjustment` is the
    /// adjustment of the current deload directive, if any, recorded when the
    /// deload starts.
    #[must_use]
    pub fn advance(
        &self,
        state: &MesocycleState,
        fatigue: &FatigueAnalysis,
        deload_adjustment: Option<f64>,
        today: NaiveDate,
    ) -> MesocycleTransition {
        match state.phase {
            MesocyclePhase::Accumulation => {
                self.advance_accumulation(state, fatigue, deload_adjustment)
            }
            MesocyclePhase::Deload => self.complete(state, today),
        }
    }

    fn advance_accumulation(
        &self,
        state: &MesocycleState,
        fatigue: &FatigueAnalysis,
        deload_adjustment: Option<f64>,
    ) -> MesocycleTransition {
        let mut next = state.clone();
        next.fatigue_flag_streak = if fatigue.deload_recommended {
            state.fatigue_flag_streak + 1
        } else {
            0
        };
        next.current_week = state.current_week + 1;

        let landmark_action = if self.config.recalibrate_landmarks {
            LandmarkAction::Recalibrate
        } else {
            LandmarkAction::None
        };

        let trigger = if next.fatigue_flag_streak >= self.config.fatigue_flag_streak_for_deload {
            Some(DeloadTrigger::FatigueStreak)
        } else if next.current_week > state.total_weeks.saturating_sub(1) {
            Some(DeloadTrigger::ScheduledWeek)
        } else {
            None
        };

        let Some(trigger) = trigger else {
            return MesocycleTransition {
                state: next,
                event: TransitionEvent::WeekAdvanced,
                landmark_action,
            };
        };

        next.phase = MesocyclePhase::Deload;
        next.last_deload_adjustment_pct =
            Some(deload_adjustment.unwrap_or(self.config.default_deload_adjustment_pct));
        info!(
            user_id = %state.user_id,
            mesocycle = next.mesocycle_number,
            week = next.current_week,
            trigger = ?trigger,
            "Deload started"
        );

        MesocycleTransition {
            state: next,
            event: TransitionEvent::DeloadStarted { trigger },
            landmark_action,
        }
    }

    fn complete(&self, state: &MesocycleState, today: NaiveDate) -> MesocycleTransition {
        let next = MesocycleState {
            current_week: 1,
            phase: MesocyclePhase::Accumulation,
            start_date: today,
            mesocycle_number: state.mesocycle_number + 1,
            fatigue_flag_streak: 0,
            ..state.clone()
        };

        let landmark_action = if self.config.apply_landmark_contraction {
            let deload_pct = state
                .last_deload_adjustment_pct
                .unwrap_or(self.config.default_deload_adjustment_pct);
            LandmarkAction::Contract {
                percent: deload_pct.abs(),
            }
        } else {
            LandmarkAction::None
        };

        info!(
            user_id = %state.user_id,
            completed = state.mesocycle_number,
            next = next.mesocycle_number,
            "Mesocycle completed"
        );

        MesocycleTransition {
            state: next,
            event: TransitionEvent::MesocycleCompleted,
            landmark_action,
        }
    }
}
