// ABOUTME: Volume aggregation and recommendation configuration
// ABOUTME: Holds the counting window and both ordered volume rule tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::algorithms::VolumeRuleTable;
use periodization_core::constants::windows;
use serde::{Deserialize, Serialize};

/// Volume Recommendation Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Rolling window for weekly set counts, in days
    pub window_days: u32,
    /// Rules applied when a readiness score is available
    pub feedback_rules: VolumeRuleTable,
    /// Rules applied on volume alone
    pub fallback_rules: VolumeRuleTable,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            window_days: windows::VOLUME_WINDOW_DAYS,
            feedback_rules: VolumeRuleTable::feedback_default(),
            fallback_rules: VolumeRuleTable::fallback_default(),
        }
    }
}
