// ABOUTME: Analysis commands for periodization-cli
// ABOUTME: Volume recommendations, fatigue, progression targets, and mesocycle advances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::print_json;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use periodization_engine::engine::PeriodizationEngine;
use periodization_engine::models::{ExerciseId, PriorPrescription, RepRange, UserId};

/// Prescription overrides accepted on the command line
pub struct PriorArgs {
    pub sets: Option<u32>,
    pub rep_min: Option<u32>,
    pub rep_max: Option<u32>,
    pub base_weight: Option<f64>,
}

impl PriorArgs {
    fn into_prescription(self) -> PriorPrescription {
        let defaults = PriorPrescription::default();
        PriorPrescription {
            sets: self.sets.unwrap_or(defaults.sets),
            rep_range: RepRange {
                min: self.rep_min.unwrap_or(defaults.rep_range.min),
                max: self.rep_max.unwrap_or(defaults.rep_range.max),
            },
            base_weight: self.base_weight,
            rpe_band: defaults.rpe_band,
        }
    }
}

fn day(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Utc::now().date_naive())
}

pub async fn recommend(
    engine: &PeriodizationEngine,
    user_id: UserId,
    as_of: Option<NaiveDate>,
) -> Result<()> {
    let report = engine
        .compute_volume_recommendations_as_of(user_id, None, day(as_of))
        .await;
    print_json(&report)
}

pub async fn fatigue(
    engine: &PeriodizationEngine,
    user_id: UserId,
    window_days: Option<u32>,
    as_of: Option<NaiveDate>,
) -> Result<()> {
    let window_days = window_days.unwrap_or(engine.config().fatigue.window_days);
    let analysis = engine
        .compute_fatigue_analysis_as_of(user_id, window_days, day(as_of))
        .await;
    print_json(&analysis)
}

pub async fn progress(
    engine: &PeriodizationEngine,
    user_id: UserId,
    exercise_id: ExerciseId,
    prior: PriorArgs,
    as_of: Option<NaiveDate>,
) -> Result<()> {
    let prior = prior.into_prescription();
    let target = engine
        .compute_progression_target_as_of(user_id, exercise_id, &prior, day(as_of))
        .await?;
    print_json(&target)
}

pub async fn advance(
    engine: &PeriodizationEngine,
    user_id: UserId,
    as_of: Option<NaiveDate>,
) -> Result<()> {
    let advance = engine.advance_mesocycle_as_of(user_id, day(as_of)).await?;
    print_json(&advance)
}
