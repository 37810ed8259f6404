// ABOUTME: Domain models for the periodization engine, re-exported from periodization-core
// ABOUTME: Sessions, set records, feedback, landmarks, mesocycle state, and engine outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use periodization_core::models::*;
