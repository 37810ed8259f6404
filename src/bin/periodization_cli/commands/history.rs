// ABOUTME: Schema and history import commands for periodization-cli
// ABOUTME: Reads a JSON history export and loads it in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::helpers::display::print_json;
use anyhow::{Context, Result};
use periodization_engine::config::DatabaseUrl;
use periodization_engine::database::{HistoryImport, SqliteStore};
use serde_json::json;
use std::path::Path;
use tracing::info;

/// Report a completed migration
pub fn migrated(database_url: &DatabaseUrl) -> Result<()> {
    info!(database = %database_url, "Schema migrated");
    print_json(&json!({ "migrated": database_url.to_string() }))
}

/// Import a history export
pub async fn import(store: &SqliteStore, file: &Path) -> Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let history: HistoryImport = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse history export {}", file.display()))?;

    let imported = store.import_history(&history).await?;
    print_json(&json!({
        "imported": imported,
        "muscle_groups": history.muscle_groups.len(),
        "contributions": history.contributions.len(),
        "sessions": history.sessions.len(),
        "exercise_logs": history.exercise_logs.len(),
        "feedback": history.feedback.len(),
    }))
}
