// ABOUTME: Ordered (predicate, action) rule tables for weekly volume directives
// ABOUTME: Readiness-based table and volume-only fallback table, evaluated first-match-wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Volume Rule Tables
//!
//! Each rule pairs a readiness predicate and a volume predicate with the
//! directive to emit. Tables are evaluated top to bottom and the first rule
//! whose predicates both hold wins, so new thresholds are added by inserting a
//! row rather than by restructuring control flow.
//!
//! Volume predicates are expressed against the user's landmarks (MEV, MAV), so
//! the same table serves every muscle group.

use periodization_core::models::{RecommendationCategory, VolumeLandmark};
use serde::{Deserialize, Serialize};

/// Predicate over the readiness score (0-10)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadinessCondition {
    /// Matches any readiness, including none
    Any,
    /// `readiness >= min`
    AtLeast {
        /// Inclusive lower bound
        min: f64,
    },
    /// `readiness <= max`
    AtMost {
        /// Inclusive upper bound
        max: f64,
    },
    /// `above < readiness <= up_to`
    AboveUpTo {
        /// Exclusive lower bound
        above: f64,
        /// Inclusive upper bound
        up_to: f64,
    },
    /// `above < readiness < below`
    Between {
        /// Exclusive lower bound
        above: f64,
        /// Exclusive upper bound
        below: f64,
    },
}

impl ReadinessCondition {
    /// Whether the predicate holds; only `Any` matches an absent readiness
    #[must_use]
    pub fn matches(&self, readiness: Option<f64>) -> bool {
        match (self, readiness) {
            (Self::Any, _) => true,
            (_, None) => false,
            (Self::AtLeast { min }, Some(r)) => r >= *min,
            (Self::AtMost { max }, Some(r)) => r <= *max,
            (Self::AboveUpTo { above, up_to }, Some(r)) => r > *above && r <= *up_to,
            (Self::Between { above, below }, Some(r)) => r > *above && r < *below,
        }
    }
}

/// Predicate over the current weekly set count, relative to landmarks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VolumeCondition {
    /// Always matches
    Any,
    /// No sets performed
    Zero,
    /// `volume < MEV`
    BelowMev,
    /// `volume <= MEV`
    AtOrBelowMev,
    /// `volume > MEV`
    AboveMev,
    /// `volume < MAV`
    BelowMav,
    /// `volume >= MAV`
    AtOrAboveMav,
    /// `volume > MAV`
    AboveMav,
    /// `volume > fraction * MAV`
    AboveMavFraction {
        /// Fraction of MAV
        fraction: f64,
    },
    /// `volume < fraction * MAV`
    BelowMavFraction {
        /// Fraction of MAV
        fraction: f64,
    },
}

impl VolumeCondition {
    /// Whether the predicate holds for `volume` against `landmark`
    #[must_use]
    pub fn matches(&self, volume: u32, landmark: &VolumeLandmark) -> bool {
        let mav = f64::from(landmark.mav);
        match self {
            Self::Any => true,
            Self::Zero => volume == 0,
            Self::BelowMev => volume < landmark.mev,
            Self::AtOrBelowMev => volume <= landmark.mev,
            Self::AboveMev => volume > landmark.mev,
            Self::BelowMav => volume < landmark.mav,
            Self::AtOrAboveMav => volume >= landmark.mav,
            Self::AboveMav => volume > landmark.mav,
            Self::AboveMavFraction { fraction } => f64::from(volume) > fraction * mav,
            Self::BelowMavFraction { fraction } => f64::from(volume) < fraction * mav,
        }
    }
}

/// How the suggested weekly set count is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// Scale the current volume by the adjustment
    #[default]
    ScaleCurrent,
    /// Bring volume up to MEV
    RaiseToMev,
}

/// One row of a rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRule {
    /// Stable rule name, used in logs
    pub name: String,
    /// Readiness predicate
    pub readiness: ReadinessCondition,
    /// Volume predicate
    pub volume: VolumeCondition,
    /// Directive emitted when both predicates hold
    pub category: RecommendationCategory,
    /// Signed adjustment in percent
    pub adjustment_percent: f64,
    /// Confidence (1-10)
    pub confidence: u8,
    /// How to derive the suggested set count
    #[serde(default)]
    pub target: TargetPolicy,
    /// Reason template; `{volume}`, `{readiness}`, `{mev}`, `{mav}`, `{mrv}` are substituted
    pub reason: String,
}

impl VolumeRule {
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: &str,
        readiness: ReadinessCondition,
        volume: VolumeCondition,
        category: RecommendationCategory,
        adjustment_percent: f64,
        confidence: u8,
        target: TargetPolicy,
        reason: &str,
    ) -> Self {
        Self {
            name: name.to_owned(),
            readiness,
            volume,
            category,
            adjustment_percent,
            confidence,
            target,
            reason: reason.to_owned(),
        }
    }

    /// Render the reason template
    #[must_use]
    pub fn render_reason(
        &self,
        volume: u32,
        readiness: Option<f64>,
        landmark: &VolumeLandmark,
    ) -> String {
        let readiness_text = readiness.map_or_else(|| "n/a".to_owned(), |r| format!("{r:.1}"));
        self.reason
            .replace("{volume}", &volume.to_string())
            .replace("{readiness}", &readiness_text)
            .replace("{mev}", &landmark.mev.to_string())
            .replace("{mav}", &landmark.mav.to_string())
            .replace("{mrv}", &landmark.mrv.to_string())
    }

    /// Suggested weekly set count after applying this rule
    #[must_use]
    pub fn target_sets(&self, volume: u32, landmark: &VolumeLandmark) -> u32 {
        match self.target {
            TargetPolicy::RaiseToMev => landmark.mev.max(volume),
            TargetPolicy::ScaleCurrent => {
                let scaled = f64::from(volume) * (1.0 + self.adjustment_percent / 100.0);
                scaled.round().max(0.0) as u32
            }
        }
    }
}

/// Ordered rule table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRuleTable {
    /// Rules in evaluation order
    pub rules: Vec<VolumeRule>,
}

impl VolumeRuleTable {
    /// First rule whose predicates both hold
    #[must_use]
    pub fn evaluate(
        &self,
        readiness: Option<f64>,
        volume: u32,
        landmark: &VolumeLandmark,
    ) -> Option<&VolumeRule> {
        self.rules
            .iter()
            .find(|rule| rule.readiness.matches(readiness) && rule.volume.matches(volume, landmark))
    }

    /// Readiness-driven table used when feedback is available
    #[must_use]
    pub fn feedback_default() -> Self {
        use RecommendationCategory::{Decrease, Deload, Increase, Maintain};
        use TargetPolicy::ScaleCurrent;

        let high = ReadinessCondition::AtLeast { min: 8.0 };
        let low = ReadinessCondition::AtMost { max: 4.0 };
        let moderate = ReadinessCondition::AboveUpTo {
            above: 4.0,
            up_to: 6.0,
        };
        let good = ReadinessCondition::Between {
            above: 6.0,
            below: 8.0,
        };

        Self {
            rules: vec![
                VolumeRule::new(
                    "high_readiness_below_mav",
                    high,
                    VolumeCondition::BelowMav,
                    Increase,
                    10.0,
                    8,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is high and {volume} sets is below MAV ({mav}); add volume",
                ),
                VolumeRule::new(
                    "high_readiness_at_mav",
                    high,
                    VolumeCondition::AtOrAboveMav,
                    Maintain,
                    0.0,
                    9,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is high but {volume} sets already reaches MAV ({mav}); hold volume",
                ),
                VolumeRule::new(
                    "low_readiness_above_mev",
                    low,
                    VolumeCondition::AboveMev,
                    Decrease,
                    -15.0,
                    8,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is low with {volume} sets above MEV ({mev}); reduce volume to recover",
                ),
                VolumeRule::new(
                    "low_readiness_at_mev",
                    low,
                    VolumeCondition::AtOrBelowMev,
                    Deload,
                    -30.0,
                    9,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is low even at {volume} sets (MEV {mev}); deload to dissipate fatigue",
                ),
                VolumeRule::new(
                    "moderate_readiness_near_mav",
                    moderate,
                    VolumeCondition::AboveMavFraction { fraction: 0.9 },
                    Decrease,
                    -5.0,
                    6,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is moderate and {volume} sets is close to MAV ({mav}); trim volume slightly",
                ),
                VolumeRule::new(
                    "moderate_readiness",
                    moderate,
                    VolumeCondition::Any,
                    Maintain,
                    0.0,
                    7,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is moderate; keep {volume} sets",
                ),
                VolumeRule::new(
                    "good_readiness_well_below_mav",
                    good,
                    VolumeCondition::BelowMavFraction { fraction: 0.8 },
                    Increase,
                    5.0,
                    7,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is good and {volume} sets leaves room below MAV ({mav}); add a little volume",
                ),
                VolumeRule::new(
                    "good_readiness",
                    good,
                    VolumeCondition::Any,
                    Maintain,
                    0.0,
                    8,
                    ScaleCurrent,
                    "Readiness {readiness}/10 is good and {volume} sets is near MAV ({mav}); keep volume",
                ),
            ],
        }
    }

    /// Volume-only table used when no feedback exists for the window
    #[must_use]
    pub fn fallback_default() -> Self {
        use RecommendationCategory::{Increase, Maintain};

        Self {
            rules: vec![
                VolumeRule::new(
                    "no_volume",
                    ReadinessCondition::Any,
                    VolumeCondition::Zero,
                    Increase,
                    100.0,
                    5,
                    TargetPolicy::RaiseToMev,
                    "No sets logged this week; start at MEV ({mev} sets)",
                ),
                VolumeRule::new(
                    "below_mev",
                    ReadinessCondition::Any,
                    VolumeCondition::BelowMev,
                    Increase,
                    25.0,
                    6,
                    TargetPolicy::ScaleCurrent,
                    "{volume} sets is below MEV ({mev}); increase volume",
                ),
                VolumeRule::new(
                    "above_mav",
                    ReadinessCondition::Any,
                    VolumeCondition::AboveMav,
                    Maintain,
                    0.0,
                    8,
                    TargetPolicy::ScaleCurrent,
                    "{volume} sets is above MAV ({mav}); hold volume until feedback is available",
                ),
                VolumeRule::new(
                    "within_range",
                    ReadinessCondition::Any,
                    VolumeCondition::Any,
                    Maintain,
                    0.0,
                    7,
                    TargetPolicy::ScaleCurrent,
                    "{volume} sets is between MEV ({mev}) and MAV ({mav}); keep volume",
                ),
            ],
        }
    }
}
