// ABOUTME: Configuration module for periodization-intelligence crate
// ABOUTME: Re-exports intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Intelligence configuration (volume rules, fatigue, progression, mesocycle, landmarks)
pub mod intelligence;

pub use intelligence::IntelligenceConfig;
