// ABOUTME: Landmark seeding, post-deload contraction, and fatigue-driven MAV recalibration
// ABOUTME: Every adjustment preserves the mv <= mev <= mav <= mrv ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: scaled down from u32

use crate::config::intelligence::{LandmarkDefaults, MesocycleConfig};
use crate::fatigue_analyzer::{FatigueAnalysis, FatigueTrend};
use chrono::Utc;
use periodization_core::models::{MuscleGroup, UserId, VolumeLandmark};

/// Seed landmark for a muscle group the user has no landmark for yet
#[must_use]
pub fn default_landmark(
    user_id: UserId,
    muscle_group: &MuscleGroup,
    defaults: &LandmarkDefaults,
) -> VolumeLandmark {
    let seed = defaults.for_muscle_group(&muscle_group.name);
    VolumeLandmark {
        user_id,
        muscle_group_id: muscle_group.id,
        mv: seed.mv,
        mev: seed.mev,
        mav: seed.mav,
        mrv: seed.mrv,
        updated_at: Utc::now(),
    }
}

/// Nudge MEV and MAV down by `percent` after a completed deload
///
/// MEV never drops below MV and MAV never drops below the new MEV.
#[must_use]
pub fn contract(landmark: &VolumeLandmark, percent: f64) -> VolumeLandmark {
    let factor = (1.0 - percent.abs() / 100.0).max(0.0);
    let scale = |value: u32| (f64::from(value) * factor).round() as u32;

    let mev = landmark.mv.max(scale(landmark.mev));
    let mav = mev.max(scale(landmark.mav));
    VolumeLandmark {
        mev,
        mav,
        updated_at: Utc::now(),
        ..landmark.clone()
    }
}

/// MAV adjustment from a week's fatigue picture, `None` when nothing changes
///
/// Low fatigue without a worsening trend expands MAV toward MRV; high fatigue
/// contracts it toward MEV.
#[must_use]
pub fn recalibrate(
    landmark: &VolumeLandmark,
    analysis: &FatigueAnalysis,
    config: &MesocycleConfig,
) -> Option<VolumeLandmark> {
    if analysis.is_neutral() {
        return None;
    }

    let mav = if analysis.mean_fatigue <= config.expansion_fatigue_ceiling
        && analysis.trend != FatigueTrend::Declining
    {
        landmark
            .mav
            .saturating_add(config.recalibration_step)
            .min(landmark.mrv)
    } else if analysis.mean_fatigue >= config.contraction_fatigue_floor {
        landmark
            .mav
            .saturating_sub(config.recalibration_step)
            .max(landmark.mev)
    } else {
        landmark.mav
    };

    (mav != landmark.mav).then(|| VolumeLandmark {
        mav,
        updated_at: Utc::now(),
        ..landmark.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use periodization_core::models::{BodyRegion, MuscleGroupId, PriorityTier};
    use uuid::Uuid;

    fn landmark(mv: u32, mev: u32, mav: u32, mrv: u32) -> VolumeLandmark {
        VolumeLandmark {
            user_id: Uuid::nil(),
            muscle_group_id: MuscleGroupId(1),
            mv,
            mev,
            mav,
            mrv,
            updated_at: Utc::now(),
        }
    }

    fn analysis(mean_fatigue: f64, trend: FatigueTrend) -> FatigueAnalysis {
        FatigueAnalysis {
            session_count: 3,
            mean_fatigue,
            mean_readiness: 10.0 - mean_fatigue,
            trend,
            deload_recommended: mean_fatigue >= 7.0,
            days_until_deload: None,
            sessions: Vec::new(),
            insights: Vec::new(),
        }
    }

    #[test]
    fn test_default_landmark_by_name() {
        let group = MuscleGroup {
            id: MuscleGroupId(3),
            name: "Quads".to_owned(),
            body_region: BodyRegion::Lower,
            priority_tier: PriorityTier::Primary,
        };
        let seeded = default_landmark(Uuid::nil(), &group, &LandmarkDefaults::default());
        assert_eq!(seeded.thresholds(), (6, 8, 15, 20));
        assert_eq!(seeded.muscle_group_id, MuscleGroupId(3));
    }

    #[test]
    fn test_contract_scales_and_floors() {
        let contracted = contract(&landmark(8, 10, 16, 22), -3.0);
        // 10 * 0.97 = 9.7 -> 10, 16 * 0.97 = 15.52 -> 16
        assert_eq!(contracted.thresholds(), (8, 10, 16, 22));

        let contracted = contract(&landmark(8, 10, 20, 22), -30.0);
        // mev 7 floored at mv 8, mav 14
        assert_eq!(contracted.thresholds(), (8, 8, 14, 22));
        assert!(contracted.is_ordered());
    }

    #[test]
    fn test_contract_keeps_ordering() {
        for mv in 0..6 {
            for gap in 0..6 {
                let lm = landmark(mv, mv + gap, mv + gap * 2, mv + gap * 3);
                for percent in [0.0, 3.0, 30.0, 100.0] {
                    assert!(contract(&lm, percent).is_ordered());
                }
            }
        }
    }

    #[test]
    fn test_recalibrate_expands_and_caps() {
        let config = MesocycleConfig::default();
        let lm = landmark(8, 10, 16, 22);
        let expanded = recalibrate(&lm, &analysis(2.0, FatigueTrend::Stable), &config).unwrap();
        assert_eq!(expanded.mav, 17);

        assert!(recalibrate(&lm, &analysis(2.0, FatigueTrend::Declining), &config).is_none());

        let capped = landmark(8, 10, 22, 22);
        assert!(recalibrate(&capped, &analysis(2.0, FatigueTrend::Improving), &config).is_none());
    }

    #[test]
    fn test_recalibrate_contracts_and_floors() {
        let config = MesocycleConfig::default();
        let contracted =
            recalibrate(&landmark(8, 10, 16, 22), &analysis(8.0, FatigueTrend::Stable), &config)
                .unwrap();
        assert_eq!(contracted.mav, 15);

        let floored = landmark(8, 10, 10, 22);
        assert!(recalibrate(&floored, &analysis(8.0, FatigueTrend::Stable), &config).is_none());
        assert!(recalibrate(&floored, &FatigueAnalysis::neutral(), &config).is_none());
    }
}
