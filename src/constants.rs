// ABOUTME: Engine constants, re-exported from periodization-core
// ABOUTME: Feedback scale, analysis windows, progression defaults, and landmark seeds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use periodization_core::constants::*;
