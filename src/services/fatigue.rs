// ABOUTME: Fatigue analysis over a user's recent feedback
// ABOUTME: Store failures degrade to the neutral analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::TrainingStore;
use crate::models::UserId;
use chrono::NaiveDate;
use periodization_intelligence::{FatigueAnalysis, FatigueAnalyzer, VolumeAggregator};
use tracing::warn;

/// Fatigue picture of the `window_days` ending `today`
pub async fn fatigue_analysis(
    store: &dyn TrainingStore,
    analyzer: &FatigueAnalyzer,
    user_id: UserId,
    window_days: u32,
    today: NaiveDate,
) -> FatigueAnalysis {
    let since = VolumeAggregator::window_start(today, window_days);
    match store.list_feedback(user_id, since).await {
        Ok(mut feedback) => {
            feedback.retain(|record| record.date <= today);
            analyzer.analyze(&feedback)
        }
        Err(e) => {
            warn!(
                user_id = %user_id,
                error = %e,
                "Failed to read feedback, reporting neutral fatigue"
            );
            FatigueAnalysis::neutral()
        }
    }
}
