// ABOUTME: Command modules for periodization-cli
// ABOUTME: History management, analysis, and landmark commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod analysis;
pub mod history;
pub mod landmarks;
