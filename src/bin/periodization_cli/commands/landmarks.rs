// ABOUTME: Landmark commands for periodization-cli
// ABOUTME: Lists landmarks with default seeding and applies validated overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::print_json;
use anyhow::Result;
use periodization_engine::engine::PeriodizationEngine;
use periodization_engine::models::{LandmarkPatch, MuscleGroupId, UserId};

/// Print every landmark of a user
pub async fn list(engine: &PeriodizationEngine, user_id: UserId) -> Result<()> {
    let landmarks = engine.landmarks(user_id).await?;
    print_json(&landmarks)
}

/// Override one muscle group's landmarks
pub async fn override_one(
    engine: &PeriodizationEngine,
    user_id: UserId,
    muscle_group_id: MuscleGroupId,
    patch: &LandmarkPatch,
) -> Result<()> {
    let landmark = engine
        .override_landmark(user_id, muscle_group_id, patch)
        .await?;
    print_json(&landmark)
}
