// ABOUTME: Environment configuration for the engine - database location and intelligence thresholds
// ABOUTME: Parses DATABASE_URL and related variables into strongly typed settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::config::intelligence::IntelligenceConfig;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use tracing::info;

/// Default database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:periodization.db";

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns a config error for non-`SQLite` URLs
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.contains("://") {
            Err(AppError::config(format!(
                "Unsupported database URL '{s}': only sqlite: URLs are supported"
            )))
        } else {
            // Fallback: treat as SQLite file path
            Ok(Self::SQLite {
                path: PathBuf::from(s),
            })
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("periodization.db"),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Database location
    pub database_url: DatabaseUrl,
    /// Create tables on startup
    pub auto_migrate: bool,
    /// `SQLite` pool size for file databases
    pub max_connections: u32,
    /// Decision thresholds
    pub intelligence: IntelligenceConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_url: DatabaseUrl::default(),
            auto_migrate: true,
            max_connections: 5,
            intelligence: IntelligenceConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value or the
    /// intelligence thresholds fail validation
    pub fn from_env() -> AppResult<Self> {
        let database_url = DatabaseUrl::parse_url(
            &env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
        )?;
        let auto_migrate = env::var("AUTO_MIGRATE")
            .unwrap_or_else(|_| "true".to_owned())
            .parse()
            .map_err(|e| AppError::config(format!("Invalid AUTO_MIGRATE value: {e}")))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .map(|v| {
                v.parse::<u32>().map_err(|e| {
                    AppError::config(format!("Invalid DATABASE_MAX_CONNECTIONS value: {e}"))
                })
            })
            .transpose()?
            .unwrap_or(5)
            .max(1);
        let intelligence = IntelligenceConfig::load()
            .map_err(|e| AppError::config(format!("Invalid intelligence configuration: {e}")))?;

        let config = Self {
            database_url,
            auto_migrate,
            max_connections,
            intelligence,
        };
        info!(
            database = %config.database_url,
            auto_migrate = config.auto_migrate,
            "Engine configuration loaded"
        );
        Ok(config)
    }

    /// In-memory configuration with default thresholds, for tests and embedding
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: DatabaseUrl::Memory,
            max_connections: 1,
            ..Self::default()
        }
    }
}
