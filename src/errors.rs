// ABOUTME: Error types for the periodization engine, re-exported from periodization-core
// ABOUTME: Keeps crate::errors paths stable for the storage, service, and CLI layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! `AppError` carries an `ErrorCode`, a message, and optional context. Codes
//! map onto the four recovery kinds in `ErrorKind`.

pub use periodization_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorKind,
};
