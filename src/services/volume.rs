// ABOUTME: Weekly volume counting and per-muscle-group volume recommendations
// ABOUTME: Batch evaluation that reports failures as skipped items instead of failing the call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::history::load_volume_window;
use super::landmarks::ResolvedLandmarks;
use crate::database::TrainingStore;
use crate::errors::AppResult;
use crate::models::{
    AutoRegulationFeedback, MuscleGroup, MuscleGroupId, SkippedItem, UserId,
    VolumeRecommendationReport,
};
use chrono::NaiveDate;
use periodization_intelligence::{
    MuscleGroupVolume, VolumeAggregator, VolumeInput, VolumeRecommendationEngine,
};
use tracing::{debug, warn};

/// Who and when a batch of recommendations is computed for
#[derive(Debug, Clone, Copy)]
pub struct VolumeRequest<'a> {
    /// User being evaluated
    pub user_id: UserId,
    /// Feedback record supplied by the caller, if any
    pub feedback: Option<&'a AutoRegulationFeedback>,
    /// Last day of the window
    pub today: NaiveDate,
    /// Window length in days
    pub window_days: u32,
}

/// Completed sets for one muscle group over the window ending `today`
///
/// # Errors
///
/// Returns an error if the session listing fails
pub async fn weekly_volume(
    store: &dyn TrainingStore,
    user_id: UserId,
    muscle_group_id: MuscleGroupId,
    window_days: u32,
    today: NaiveDate,
) -> AppResult<u32> {
    let since = VolumeAggregator::window_start(today, window_days);
    let window = load_volume_window(store, user_id, since, today).await?;
    let volume =
        VolumeAggregator::count_for_muscle_group(&window.sets, &window.index, muscle_group_id);
    debug!(
        user_id = %user_id,
        muscle_group_id = %muscle_group_id,
        window_days,
        volume,
        "Counted weekly volume"
    );
    Ok(volume)
}

/// Recommendations for the given muscle groups
///
/// Never fails: readiness falls back to the no-feedback table when feedback
/// cannot be read, and muscle groups that cannot be evaluated are reported
/// in `skipped`.
pub async fn build_recommendations(
    store: &dyn TrainingStore,
    engine: &VolumeRecommendationEngine,
    request: VolumeRequest<'_>,
    groups: &[MuscleGroup],
    landmarks: ResolvedLandmarks,
) -> VolumeRecommendationReport {
    let user_id = request.user_id;
    let since = VolumeAggregator::window_start(request.today, request.window_days);
    let input = resolve_input(store, request, since).await;

    let ResolvedLandmarks {
        by_muscle_group,
        mut skipped,
    } = landmarks;

    let window = match load_volume_window(store, user_id, since, request.today).await {
        Ok(window) => window,
        Err(e) => {
            warn!(
                user_id = %user_id,
                error = %e,
                "Failed to read training history, skipping every muscle group"
            );
            skipped.extend(groups.iter().map(|group| SkippedItem {
                id: group.id.to_string(),
                reason: e.message.clone(),
            }));
            return engine.recommend_batch(user_id, input, &[], skipped);
        }
    };
    skipped.extend(window.skipped);

    let totals = VolumeAggregator::count_all(&window.sets, &window.index);
    let mut entries = Vec::with_capacity(groups.len());
    for group in groups {
        let id = group.id.to_string();
        match by_muscle_group.get(&group.id) {
            Some(landmark) => entries.push(MuscleGroupVolume {
                muscle_group: group.clone(),
                volume: totals.get(&group.id).copied().unwrap_or(0),
                landmark: landmark.clone(),
            }),
            None if skipped.iter().any(|item| item.id == id) => {}
            None => skipped.push(SkippedItem {
                id,
                reason: "No landmarks available".into(),
            }),
        }
    }

    let report = engine.recommend_batch(user_id, input, &entries, skipped);
    debug!(
        user_id = %user_id,
        mode = ?report.feedback_mode,
        recommendations = report.recommendations.len(),
        skipped = report.skipped_count(),
        "Computed volume recommendations"
    );
    report
}

async fn resolve_input(
    store: &dyn TrainingStore,
    request: VolumeRequest<'_>,
    since: NaiveDate,
) -> VolumeInput {
    if request.feedback.is_some() {
        return VolumeInput::resolve(request.feedback, &[]);
    }

    match store.list_feedback(request.user_id, since).await {
        Ok(mut window) => {
            window.retain(|record| record.date <= request.today);
            VolumeInput::resolve(None, &window)
        }
        Err(e) => {
            warn!(
                user_id = %request.user_id,
                error = %e,
                "Failed to read feedback, using volume-only rules"
            );
            VolumeInput::WithoutFeedback
        }
    }
}
