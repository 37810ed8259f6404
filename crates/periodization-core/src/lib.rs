// ABOUTME: Core types and constants for the periodized training decision engine
// ABOUTME: Foundation crate with error handling, domain models, identifiers, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Periodization Core
//!
//! Foundation crate providing shared types and constants for the periodization
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ErrorKind`
//! - **constants**: Defaults and fixed scales organized by domain
//! - **models**: Records exchanged with the storage collaborator and returned to callers

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (sessions, feedback, landmarks, mesocycle state, outputs)
pub mod models;
