// ABOUTME: periodization-cli - command-line front end for the periodization engine over SQLite
// ABOUTME: Migrates and imports history, then prints recommendations, fatigue, targets, and mesocycle advances as JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create the schema
//! periodization-cli migrate
//!
//! # Load exported history
//! periodization-cli import history.json
//!
//! # Weekly volume directives for a user
//! periodization-cli recommend --user 6f1c... --as-of 2025-03-10
//!
//! # Next-session target for exercise 12 at 3 sets
//! periodization-cli progress --user 6f1c... --exercise 12 --sets 3
//!
//! # Advance the mesocycle one week
//! periodization-cli advance --user 6f1c...
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use periodization_engine::config::{DatabaseUrl, EngineConfig};
use periodization_engine::database::SqliteStore;
use periodization_engine::engine::PeriodizationEngine;
use periodization_engine::logging::LoggingConfig;
use periodization_engine::models::{ExerciseId, LandmarkPatch, MuscleGroupId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "periodization-cli",
    about = "Periodized training decision engine",
    long_about = "Computes weekly volume directives, fatigue, load progression targets, and mesocycle transitions from training history stored in SQLite."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create or update the database schema
    Migrate,

    /// Import a JSON history export
    Import {
        /// Path to the export
        file: PathBuf,
    },

    /// Volume directives for every muscle group
    Recommend {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Last day of the window (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Fatigue analysis over recent feedback
    Fatigue {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Window length in days (defaults to the configured fatigue window)
        #[arg(long)]
        window_days: Option<u32>,

        /// Last day of the window (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Next-session target for one exercise
    Progress {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Exercise id
        #[arg(long)]
        exercise: ExerciseId,

        /// Prescribed working sets
        #[arg(long)]
        sets: Option<u32>,

        /// Lowest reps per set
        #[arg(long)]
        rep_min: Option<u32>,

        /// Highest reps per set
        #[arg(long)]
        rep_max: Option<u32>,

        /// Starting weight when no history exists
        #[arg(long)]
        base_weight: Option<f64>,

        /// Reference day for the lookback (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Advance the mesocycle one week
    Advance {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Day of the advance (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Landmarks of every muscle group, seeding defaults on first use
    Landmarks {
        /// User id
        #[arg(long)]
        user: Uuid,
    },

    /// Override landmarks of one muscle group
    OverrideLandmark {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Muscle group id
        #[arg(long)]
        muscle_group: MuscleGroupId,

        /// Maintenance volume
        #[arg(long)]
        mv: Option<u32>,

        /// Minimum effective volume
        #[arg(long)]
        mev: Option<u32>,

        /// Maximum adaptive volume
        #[arg(long)]
        mav: Option<u32>,

        /// Maximum recoverable volume
        #[arg(long)]
        mrv: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let mut config = EngineConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database_url = DatabaseUrl::parse_url(url)?;
    }

    info!(database = %config.database_url, "Opening training store");
    let store = SqliteStore::connect(&config.database_url, config.max_connections).await?;
    if config.auto_migrate || matches!(cli.command, Command::Migrate) {
        store.migrate().await?;
    }

    let engine = PeriodizationEngine::new(Arc::new(store.clone()), config.intelligence.clone());

    match cli.command {
        Command::Migrate => commands::history::migrated(&config.database_url)?,
        Command::Import { file } => commands::history::import(&store, &file).await?,
        Command::Recommend { user, as_of } => {
            commands::analysis::recommend(&engine, user, as_of).await?;
        }
        Command::Fatigue {
            user,
            window_days,
            as_of,
        } => commands::analysis::fatigue(&engine, user, window_days, as_of).await?,
        Command::Progress {
            user,
            exercise,
            sets,
            rep_min,
            rep_max,
            base_weight,
            as_of,
        } => {
            let prior = commands::analysis::PriorArgs {
                sets,
                rep_min,
                rep_max,
                base_weight,
            };
            commands::analysis::progress(&engine, user, exercise, prior, as_of).await?;
        }
        Command::Advance { user, as_of } => {
            commands::analysis::advance(&engine, user, as_of).await?;
        }
        Command::Landmarks { user } => commands::landmarks::list(&engine, user).await?,
        Command::OverrideLandmark {
            user,
            muscle_group,
            mv,
            mev,
            mav,
            mrv,
        } => {
            let patch = LandmarkPatch { mv, mev, mav, mrv };
            commands::landmarks::override_one(&engine, user, muscle_group, &patch).await?;
        }
    }

    Ok(())
}
