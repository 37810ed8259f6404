// ABOUTME: Ordered load progression rules keyed on mean RPE and prescribed set count
// ABOUTME: The exactly-two-sets rule is an explicit row ahead of the general effort rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Load Progression Rules
//!
//! Rules are evaluated top to bottom against the mean RPE of recent
//! occurrences and the prescribed set count; the first match decides whether
//! the next session adds load, adds a set, or holds.
//!
//! The two-set prescription progresses on its own curve: any mean RPE up to
//! the high-effort threshold earns the full increment, with no intermediate
//! 1.25% step. It sits above the general rules so it is never inferred from
//! them.

use crate::config::intelligence::ProgressionConfig;
use periodization_core::models::ProgressionRuleKind;
use serde::{Deserialize, Serialize};

/// Predicate over the mean RPE of recent occurrences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffortCondition {
    /// `rpe < max`
    Below {
        /// Exclusive upper bound
        max: f64,
    },
    /// `min <= rpe <= max`
    Within {
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
    /// `rpe <= max`
    AtMost {
        /// Inclusive upper bound
        max: f64,
    },
    /// `rpe > min`
    Above {
        /// Exclusive lower bound
        min: f64,
    },
}

impl EffortCondition {
    /// Whether the predicate holds
    #[must_use]
    pub fn matches(&self, rpe: f64) -> bool {
        match *self {
            Self::Below { max } => rpe < max,
            Self::Within { min, max } => (min..=max).contains(&rpe),
            Self::AtMost { max } => rpe <= max,
            Self::Above { min } => rpe > min,
        }
    }
}

/// Predicate over the prescribed set count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SetCondition {
    /// Any set count
    Any,
    /// Exactly `n` sets
    Exactly {
        /// Required set count
        n: u32,
    },
    /// Fewer than `n` sets
    Below {
        /// Exclusive upper bound
        n: u32,
    },
}

impl SetCondition {
    /// Whether the predicate holds
    #[must_use]
    pub const fn matches(&self, sets: u32) -> bool {
        match *self {
            Self::Any => true,
            Self::Exactly { n } => sets == n,
            Self::Below { n } => sets < n,
        }
    }
}

/// What a matched rule does to the prescription
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressionAction {
    /// Multiply the most recent weight by `1 + percent / 100`
    IncreaseWeight {
        /// Increase in percent
        percent: f64,
    },
    /// Keep the weight and add one working set
    AddSet,
    /// Keep weight and sets
    Hold,
}

/// One row of the progression table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRule {
    /// Rule identity reported on the target
    pub kind: ProgressionRuleKind,
    /// Effort predicate
    pub effort: EffortCondition,
    /// Set-count predicate
    pub sets: SetCondition,
    /// Effect on the prescription
    pub action: ProgressionAction,
}

/// Ordered progression table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRuleTable {
    /// Rules in evaluation order
    pub rules: Vec<ProgressionRule>,
}

impl ProgressionRuleTable {
    /// Build the standard table from configured thresholds
    #[must_use]
    pub fn from_config(config: &ProgressionConfig) -> Self {
        Self {
            rules: vec![
                ProgressionRule {
                    kind: ProgressionRuleKind::TwoSetIncrease,
                    effort: EffortCondition::AtMost {
                        max: config.high_effort_rpe,
                    },
                    sets: SetCondition::Exactly { n: 2 },
                    action: ProgressionAction::IncreaseWeight {
                        percent: config.two_set_increase_percent,
                    },
                },
                ProgressionRule {
                    kind: ProgressionRuleKind::LowEffortIncrease,
                    effort: EffortCondition::Below {
                        max: config.low_effort_rpe,
                    },
                    sets: SetCondition::Any,
                    action: ProgressionAction::IncreaseWeight {
                        percent: config.low_effort_increase_percent,
                    },
                },
                ProgressionRule {
                    kind: ProgressionRuleKind::ModerateEffortIncrease,
                    effort: EffortCondition::Within {
                        min: config.low_effort_rpe,
                        max: config.high_effort_rpe,
                    },
                    sets: SetCondition::Any,
                    action: ProgressionAction::IncreaseWeight {
                        percent: config.moderate_effort_increase_percent,
                    },
                },
                ProgressionRule {
                    kind: ProgressionRuleKind::HighEffortAddSet,
                    effort: EffortCondition::Above {
                        min: config.high_effort_rpe,
                    },
                    sets: SetCondition::Below {
                        n: config.max_sets_before_hold,
                    },
                    action: ProgressionAction::AddSet,
                },
                ProgressionRule {
                    kind: ProgressionRuleKind::HighEffortHold,
                    effort: EffortCondition::Above {
                        min: config.high_effort_rpe,
                    },
                    sets: SetCondition::Any,
                    action: ProgressionAction::Hold,
                },
            ],
        }
    }

    /// First rule matching the mean RPE and set count
    #[must_use]
    pub fn evaluate(&self, mean_rpe: f64, sets: u32) -> Option<&ProgressionRule> {
        self.rules
            .iter()
            .find(|rule| rule.effort.matches(mean_rpe) && rule.sets.matches(sets))
    }
}
