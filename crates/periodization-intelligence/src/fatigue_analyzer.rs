// ABOUTME: Readiness and fatigue scoring from post-session feedback with deload detection
// ABOUTME: Rolling trend over the analysis window and a neutral default when no feedback exists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fatigue Analyzer
//!
//! Per session:
//!
//! - `recovery = (energy + sleep + (10 - soreness)) / 3`
//! - `performance = (pump + (10 - perceived effort)) / 2`
//! - `readiness = (recovery + performance) / 2`
//! - `fatigue = 10 - readiness`, clamped into `[0, 10]`
//!
//! Over the window, the trend compares the mean fatigue of the older half of
//! the sessions with the newer half. A deload is flagged when the mean fatigue
//! is high, or when enough of the most recent sessions are individually high.
#![allow(clippy::cast_precision_loss)] // Safe: session counts are small
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: clamped into 3..=7

use crate::config::intelligence::FatigueConfig;
use chrono::NaiveDate;
use periodization_core::constants::feedback::{NEUTRAL_FATIGUE, SCALE_MAX};
use periodization_core::models::{AutoRegulationFeedback, SessionId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Direction of fatigue across the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FatigueTrend {
    /// Fatigue is falling
    Improving,
    /// No meaningful change
    Stable,
    /// Fatigue is rising
    Declining,
}

impl FatigueTrend {
    /// Stable string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }
}

impl fmt::Display for FatigueTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores derived from one feedback record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScore {
    /// Session scored
    pub session_id: SessionId,
    /// Date of the session
    pub date: NaiveDate,
    /// Recovery component (0-10)
    pub recovery: f64,
    /// Performance component (0-10)
    pub performance: f64,
    /// Readiness (0-10)
    pub readiness: f64,
    /// Fatigue (0-10)
    pub fatigue: f64,
}

impl SessionScore {
    /// Score one feedback record; ratings outside 1-10 are clamped first
    #[must_use]
    pub fn from_feedback(feedback: &AutoRegulationFeedback) -> Self {
        let feedback = if feedback.is_within_scale() {
            feedback.clone()
        } else {
            warn!(
                session_id = %feedback.session_id,
                user_id = %feedback.user_id,
                "Feedback ratings outside 1-10, clamping"
            );
            feedback.clamped()
        };

        let energy = f64::from(feedback.energy_level);
        let sleep = f64::from(feedback.sleep_quality);
        let soreness = f64::from(feedback.muscle_soreness);
        let pump = f64::from(feedback.pump_quality);
        let effort = f64::from(feedback.perceived_effort);

        let recovery = (energy + sleep + (SCALE_MAX - soreness)) / 3.0;
        let performance = (pump + (SCALE_MAX - effort)) / 2.0;
        let readiness = (recovery + performance) / 2.0;
        let fatigue = (SCALE_MAX - readiness).clamp(0.0, SCALE_MAX);

        Self {
            session_id: feedback.session_id,
            date: feedback.date,
            recovery,
            performance,
            readiness,
            fatigue,
        }
    }
}

/// Fatigue picture over an analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueAnalysis {
    /// Feedback records analyzed
    pub session_count: usize,
    /// Mean fatigue (0-10)
    pub mean_fatigue: f64,
    /// Mean readiness (0-10)
    pub mean_readiness: f64,
    /// Direction of fatigue across the window
    pub trend: FatigueTrend,
    /// Whether a recovery week is due
    pub deload_recommended: bool,
    /// Days until the deload should start, when one is due
    pub days_until_deload: Option<u32>,
    /// Per-session scores, oldest first
    pub sessions: Vec<SessionScore>,
    /// Human-readable observations
    pub insights: Vec<String>,
}

impl FatigueAnalysis {
    /// Analysis reported when no feedback exists
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            session_count: 0,
            mean_fatigue: NEUTRAL_FATIGUE,
            mean_readiness: SCALE_MAX - NEUTRAL_FATIGUE,
            trend: FatigueTrend::Stable,
            deload_recommended: false,
            days_until_deload: None,
            sessions: Vec::new(),
            insights: vec!["No feedback recorded in the window; assuming neutral fatigue".to_owned()],
        }
    }

    /// Whether the analysis is the neutral default
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.session_count == 0
    }
}

/// Fatigue analysis over feedback records
#[derive(Debug, Clone, Default)]
pub struct FatigueAnalyzer {
    config: FatigueConfig,
}

impl FatigueAnalyzer {
    /// Create an analyzer with the given thresholds
    #[must_use]
    pub const fn new(config: FatigueConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn config(&self) -> &FatigueConfig {
        &self.config
    }

    /// Analyze feedback records of one window
    ///
    /// Records may arrive in any order; they are analyzed oldest first.
    #[must_use]
    pub fn analyze(&self, feedback: &[AutoRegulationFeedback]) -> FatigueAnalysis {
        if feedback.is_empty() {
            return FatigueAnalysis::neutral();
        }

        let mut sessions: Vec<SessionScore> =
            feedback.iter().map(SessionScore::from_feedback).collect();
        sessions.sort_by_key(|score| (score.date, score.session_id));

        let fatigues: Vec<f64> = sessions.iter().map(|s| s.fatigue).collect();
        let mean_fatigue = mean(&fatigues);
        let mean_readiness = mean(&sessions.iter().map(|s| s.readiness).collect::<Vec<_>>());
        let trend = self.trend(&fatigues);

        let recent_flags = fatigues
            .iter()
            .rev()
            .take(self.config.recent_sessions)
            .filter(|fatigue| **fatigue >= self.config.session_flag_threshold)
            .count();
        let deload_recommended = mean_fatigue >= self.config.deload_mean_threshold
            || recent_flags >= self.config.recent_flags_required;

        let days_until_deload = deload_recommended.then(|| {
            let days = mean_fatigue.round().clamp(
                f64::from(self.config.deload_days_min),
                f64::from(self.config.deload_days_max),
            );
            days as u32
        });

        debug!(
            sessions = sessions.len(),
            mean_fatigue,
            trend = %trend,
            deload_recommended,
            "Fatigue analyzed"
        );

        let insights = self.insights(mean_fatigue, trend, recent_flags, days_until_deload);

        FatigueAnalysis {
            session_count: sessions.len(),
            mean_fatigue,
            mean_readiness,
            trend,
            deload_recommended,
            days_until_deload,
            sessions,
            insights,
        }
    }

    /// Mean readiness of a set of feedback records, `None` when empty
    #[must_use]
    pub fn mean_readiness(feedback: &[AutoRegulationFeedback]) -> Option<f64> {
        if feedback.is_empty() {
            return None;
        }
        let readiness: Vec<f64> = feedback
            .iter()
            .map(|record| SessionScore::from_feedback(record).readiness)
            .collect();
        Some(mean(&readiness))
    }

    fn trend(&self, fatigues: &[f64]) -> FatigueTrend {
        if fatigues.len() < 2 {
            return FatigueTrend::Stable;
        }
        let (older, newer) = fatigues.split_at(fatigues.len() / 2);
        let change = mean(newer) - mean(older);
        if change > self.config.trend_tolerance {
            FatigueTrend::Declining
        } else if change < -self.config.trend_tolerance {
            FatigueTrend::Improving
        } else {
            FatigueTrend::Stable
        }
    }

    fn insights(
        &self,
        mean_fatigue: f64,
        trend: FatigueTrend,
        recent_flags: usize,
        days_until_deload: Option<u32>,
    ) -> Vec<String> {
        let mut insights = vec![format!("Mean fatigue {mean_fatigue:.1}/10, trend {trend}")];

        if recent_flags >= self.config.recent_flags_required {
            insights.push(format!(
                "{recent_flags} of the last {} sessions reported high fatigue",
                self.config.recent_sessions
            ));
        }
        match trend {
            FatigueTrend::Declining => {
                insights.push("Fatigue is accumulating faster than it dissipates".to_owned());
            }
            FatigueTrend::Improving => {
                insights.push("Recovery is keeping up with training".to_owned());
            }
            FatigueTrend::Stable => {}
        }
        if let Some(days) = days_until_deload {
            insights.push(format!("Schedule a deload within {days} days"));
        }

        insights
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
