// ABOUTME: Volume landmarks (MV, MEV, MAV, MRV) per user and muscle group
// ABOUTME: Enforces the mv <= mev <= mav <= mrv ordering on every patch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ids::{MuscleGroupId, UserId};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weekly set-count thresholds for one muscle group of one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeLandmark {
    /// Owner
    pub user_id: UserId,
    /// Muscle group the thresholds apply to
    pub muscle_group_id: MuscleGroupId,
    /// Maintenance volume
    pub mv: u32,
    /// Minimum effective volume
    pub mev: u32,
    /// Maximum adaptive volume
    pub mav: u32,
    /// Maximum recoverable volume
    pub mrv: u32,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a landmark; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkPatch {
    /// New maintenance volume
    pub mv: Option<u32>,
    /// New minimum effective volume
    pub mev: Option<u32>,
    /// New maximum adaptive volume
    pub mav: Option<u32>,
    /// New maximum recoverable volume
    pub mrv: Option<u32>,
}

impl LandmarkPatch {
    /// Patch that replaces all four thresholds
    #[must_use]
    pub const fn all(mv: u32, mev: u32, mav: u32, mrv: u32) -> Self {
        Self {
            mv: Some(mv),
            mev: Some(mev),
            mav: Some(mav),
            mrv: Some(mrv),
        }
    }

    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.mv.is_none() && self.mev.is_none() && self.mav.is_none() && self.mrv.is_none()
    }
}

impl VolumeLandmark {
    /// Whether `mv <= mev <= mav <= mrv` holds
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.mv <= self.mev && self.mev <= self.mav && self.mav <= self.mrv
    }

    /// Thresholds as a tuple, mostly for logging and comparisons
    #[must_use]
    pub const fn thresholds(&self) -> (u32, u32, u32, u32) {
        (self.mv, self.mev, self.mav, self.mrv)
    }

    /// Apply a patch, rejecting results that break the ordering invariant
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the patched thresholds are not ordered.
    pub fn apply(&self, patch: &LandmarkPatch) -> AppResult<Self> {
        let patched = Self {
            mv: patch.mv.unwrap_or(self.mv),
            mev: patch.mev.unwrap_or(self.mev),
            mav: patch.mav.unwrap_or(self.mav),
            mrv: patch.mrv.unwrap_or(self.mrv),
            updated_at: Utc::now(),
            ..self.clone()
        };

        if !patched.is_ordered() {
            return Err(AppError::invalid_input(format!(
                "Landmarks for muscle group {} must satisfy mv <= mev <= mav <= mrv, got {}/{}/{}/{}",
                self.muscle_group_id, patched.mv, patched.mev, patched.mav, patched.mrv
            ))
            .with_user_id(self.user_id));
        }

        Ok(patched)
    }

    /// Patch describing the difference from `self` to `other`
    #[must_use]
    pub fn diff(&self, other: &Self) -> LandmarkPatch {
        let changed = |before: u32, after: u32| (before != after).then_some(after);
        LandmarkPatch {
            mv: changed(self.mv, other.mv),
            mev: changed(self.mev, other.mev),
            mav: changed(self.mav, other.mav),
            mrv: changed(self.mrv, other.mrv),
        }
    }
}
