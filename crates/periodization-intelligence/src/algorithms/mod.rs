// ABOUTME: Rule tables for volume directives and load progression
// ABOUTME: Data-driven (predicate, action) rows evaluated first-match-wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Algorithm Tables Module
//!
//! Decision thresholds are expressed as ordered, serializable tables rather
//! than nested conditionals. Each table is plain data: it can be built from
//! configuration, inspected in tests, and extended by inserting rows.

pub mod progression_rules;
pub mod volume_rules;

pub use progression_rules::{
    EffortCondition, ProgressionAction, ProgressionRule, ProgressionRuleTable, SetCondition,
};
pub use volume_rules::{
    ReadinessCondition, TargetPolicy, VolumeCondition, VolumeRule, VolumeRuleTable,
};
