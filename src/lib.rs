// ABOUTME: Main library entry point for the periodization engine
// ABOUTME: Storage contract and stores, engine facade, services, configuration, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Periodization Engine
//!
//! A periodized-training decision engine. Given a user's workout history and
//! post-session feedback it computes:
//!
//! - how many weekly sets each muscle group should get, relative to the
//!   user's volume landmarks (MV, MEV, MAV, MRV)
//! - how fatigued the user is and whether a deload week is due
//! - the load, sets, reps and effort for the next occurrence of an exercise
//!
//! and it steps a mesocycle through accumulation and deload weeks, adjusting
//! landmarks as it goes.
//!
//! ## Architecture
//!
//! - **`periodization-core`**: errors, domain models, constants
//! - **`periodization-intelligence`**: pure, synchronous analysis and rule tables
//! - **Database**: the [`database::TrainingStore`] contract with `SQLite` and
//!   in-memory implementations
//! - **Services**: async operations composing store reads, analysis, and
//!   per-user serialized writes
//! - **Engine**: the [`engine::PeriodizationEngine`] facade
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use periodization_engine::config::EngineConfig;
//! use periodization_engine::database::SqliteStore;
//! use periodization_engine::engine::PeriodizationEngine;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::from_env()?;
//!     let store = SqliteStore::connect(&config.database_url, config.max_connections).await?;
//!     store.migrate().await?;
//!
//!     let engine = PeriodizationEngine::new(Arc::new(store), config.intelligence);
//!     let report = engine
//!         .compute_volume_recommendations(uuid::Uuid::new_v4(), None)
//!         .await;
//!     println!("{} recommendations", report.recommendations.len());
//!     Ok(())
//! }
//! ```

/// Environment and analysis configuration
pub mod config;

/// Constants shared with the core crate
pub mod constants;

/// Storage contract and implementations
pub mod database;

/// Engine facade
pub mod engine;

/// Error types
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Domain models
pub mod models;

/// Engine operations over a store
pub mod services;

pub use engine::PeriodizationEngine;
pub use errors::{AppError, AppResult, ErrorCode};
