// ABOUTME: Configuration module for the periodization engine
// ABOUTME: Environment-driven engine settings plus the intelligence decision thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the periodization engine
//!
//! - **environment**: Database location and engine settings from environment variables
//! - **intelligence**: Decision thresholds, re-exported from periodization-intelligence

/// Environment and engine configuration
pub mod environment;

/// Decision thresholds and rule tables
pub mod intelligence {
    pub use periodization_intelligence::config::intelligence::*;
}

pub use environment::{DatabaseUrl, EngineConfig};
pub use intelligence::IntelligenceConfig;
