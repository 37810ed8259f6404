// ABOUTME: Landmark store operations - default seeding on first use and validated overrides
// ABOUTME: All writes happen under the user's write lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::locks::UserWriteLocks;
use crate::database::TrainingStore;
use crate::errors::{AppError, AppResult};
use crate::models::{
    LandmarkPatch, MuscleGroup, MuscleGroupId, SkippedItem, UserId, VolumeLandmark,
};
use periodization_intelligence::config::intelligence::LandmarkDefaults;
use periodization_intelligence::landmark_calibration::default_landmark;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Landmarks of a user keyed by muscle group, plus groups that could not be seeded
#[derive(Debug, Default)]
pub struct ResolvedLandmarks {
    /// Landmark per muscle group
    pub by_muscle_group: HashMap<MuscleGroupId, VolumeLandmark>,
    /// Muscle groups whose seeding failed
    pub skipped: Vec<SkippedItem>,
}

/// Landmarks for every given muscle group, seeding defaults where missing
///
/// Reads without the lock first; only when seeding is needed is the user's
/// write lock taken and the landmarks re-read.
///
/// # Errors
///
/// Returns an error if the landmark listing fails
pub async fn resolve_landmarks(
    store: &dyn TrainingStore,
    locks: &UserWriteLocks,
    defaults: &LandmarkDefaults,
    user_id: UserId,
    groups: &[MuscleGroup],
) -> AppResult<ResolvedLandmarks> {
    let existing = store.get_landmarks(user_id).await?;
    let missing = groups
        .iter()
        .any(|group| !existing.iter().any(|l| l.muscle_group_id == group.id));
    if !missing {
        return Ok(ResolvedLandmarks {
            by_muscle_group: existing
                .into_iter()
                .map(|l| (l.muscle_group_id, l))
                .collect(),
            skipped: Vec::new(),
        });
    }

    let _guard = locks.acquire(user_id).await;
    resolve_landmarks_locked(store, defaults, user_id, groups).await
}

/// Same as [`resolve_landmarks`] for callers already holding the user's write lock
///
/// # Errors
///
/// Returns an error if the landmark listing fails
pub async fn resolve_landmarks_locked(
    store: &dyn TrainingStore,
    defaults: &LandmarkDefaults,
    user_id: UserId,
    groups: &[MuscleGroup],
) -> AppResult<ResolvedLandmarks> {
    let mut resolved = ResolvedLandmarks {
        by_muscle_group: store
            .get_landmarks(user_id)
            .await?
            .into_iter()
            .map(|l| (l.muscle_group_id, l))
            .collect(),
        skipped: Vec::new(),
    };

    for group in groups {
        if resolved.by_muscle_group.contains_key(&group.id) {
            continue;
        }
        let seed = default_landmark(user_id, group, defaults);
        let patch = LandmarkPatch::all(seed.mv, seed.mev, seed.mav, seed.mrv);
        match store.update_landmark(user_id, group.id, &patch).await {
            Ok(stored) => {
                debug!(
                    user_id = %user_id,
                    muscle_group = %group.name,
                    mv = stored.mv,
                    mev = stored.mev,
                    mav = stored.mav,
                    mrv = stored.mrv,
                    "Seeded default landmarks"
                );
                resolved.by_muscle_group.insert(group.id, stored);
            }
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    muscle_group_id = %group.id,
                    error = %e,
                    "Failed to seed landmarks, skipping muscle group"
                );
                resolved.skipped.push(SkippedItem {
                    id: group.id.to_string(),
                    reason: e.message,
                });
            }
        }
    }

    Ok(resolved)
}

/// Apply a user override to one landmark
///
/// A partial patch on a muscle group without landmarks is applied on top of
/// the seeded defaults.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty patch or one that breaks landmark
/// ordering, `ResourceNotFound` for an unknown muscle group, and store
/// errors as they occur.
pub async fn override_landmark(
    store: &dyn TrainingStore,
    locks: &UserWriteLocks,
    defaults: &LandmarkDefaults,
    user_id: UserId,
    muscle_group_id: MuscleGroupId,
    patch: &LandmarkPatch,
) -> AppResult<VolumeLandmark> {
    if patch.is_empty() {
        return Err(AppError::invalid_input("Landmark override sets no thresholds")
            .with_user_id(user_id)
            .with_resource_id(muscle_group_id.to_string()));
    }

    let _guard = locks.acquire(user_id).await;

    let groups = store.list_muscle_groups().await?;
    let group = groups
        .iter()
        .find(|g| g.id == muscle_group_id)
        .ok_or_else(|| {
            AppError::not_found(format!("Muscle group {muscle_group_id}")).with_user_id(user_id)
        })?;

    let current = store
        .get_landmarks(user_id)
        .await?
        .into_iter()
        .find(|l| l.muscle_group_id == muscle_group_id)
        .unwrap_or_else(|| default_landmark(user_id, group, defaults));

    // A rejected override leaves no row behind
    let updated = current.apply(patch)?;
    let stored = store
        .update_landmark(
            user_id,
            muscle_group_id,
            &LandmarkPatch::all(updated.mv, updated.mev, updated.mav, updated.mrv),
        )
        .await?;

    info!(
        user_id = %user_id,
        muscle_group = %group.name,
        mv = stored.mv,
        mev = stored.mev,
        mav = stored.mav,
        mrv = stored.mrv,
        "Landmark override applied"
    );
    Ok(stored)
}
