// ABOUTME: SQLite implementation of the training store using sqlx
// ABOUTME: Owns schema creation, row mapping, landmark upserts, and bulk history import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{resolve_landmark_patch, HistoryImport, TrainingStore};
use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use crate::models::{
    AutoRegulationFeedback, BodyRegion, ContributionRole, ExerciseId, ExerciseLog,
    ExerciseMuscleContribution, LandmarkPatch, MesocyclePhase, MesocycleState, MuscleGroup,
    MuscleGroupId, PriorityTier, SessionId, UserId, VolumeLandmark, WorkoutSession,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

/// `SQLite`-backed store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an existing pool
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for the given database
    ///
    /// File databases are created when missing. In-memory databases are
    /// pinned to a single connection that never expires, since every new
    /// connection would otherwise see an empty database.
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection cannot be established
    pub async fn connect(database_url: &DatabaseUrl, max_connections: u32) -> AppResult<Self> {
        let connection_string = database_url.to_connection_string();

        let pool = if database_url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&connection_string)
                .await
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect(&format!("{connection_string}?mode=rwc"))
                .await
        }
        .map_err(|e| {
            AppError::database(format!("Failed to connect to {database_url}: {e}")).with_source(e)
        })?;

        info!(database = %database_url, "Connected to training store");
        Ok(Self::new(pool))
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create all tables and indexes if they don't exist
    ///
    /// # Errors
    ///
    /// Returns a database error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_reference_data().await?;
        self.migrate_history().await?;
        self.migrate_engine_state().await?;
        debug!("Training store schema is up to date");
        Ok(())
    }

    async fn execute_ddl(&self, statement: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to run migration: {e}")))?;
        Ok(())
    }

    async fn migrate_reference_data(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS muscle_groups (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                body_region TEXT NOT NULL DEFAULT 'upper',
                priority_tier TEXT NOT NULL DEFAULT 'secondary'
            )
            ",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS exercise_muscle_contributions (
                exercise_id INTEGER NOT NULL,
                muscle_group_id INTEGER NOT NULL,
                contribution_percent REAL NOT NULL,
                role TEXT NOT NULL DEFAULT 'primary',
                PRIMARY KEY (exercise_id, muscle_group_id)
            )
            ",
        )
        .await
    }

    async fn migrate_history(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                duration_minutes INTEGER,
                total_volume REAL NOT NULL DEFAULT 0
            )
            ",
        )
        .await?;
        self.execute_ddl(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_date ON workout_sessions(user_id, date)",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS exercise_logs (
                session_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL,
                sets INTEGER NOT NULL DEFAULT 0,
                sets_data TEXT,
                PRIMARY KEY (session_id, exercise_id)
            )
            ",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS auto_regulation_feedback (
                session_id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                pump_quality INTEGER NOT NULL,
                muscle_soreness INTEGER NOT NULL,
                perceived_effort INTEGER NOT NULL,
                energy_level INTEGER NOT NULL,
                sleep_quality INTEGER NOT NULL
            )
            ",
        )
        .await?;
        self.execute_ddl(
            "CREATE INDEX IF NOT EXISTS idx_feedback_user_date ON auto_regulation_feedback(user_id, date)",
        )
        .await
    }

    async fn migrate_engine_state(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS volume_landmarks (
                user_id TEXT NOT NULL,
                muscle_group_id INTEGER NOT NULL,
                mv INTEGER NOT NULL,
                mev INTEGER NOT NULL,
                mav INTEGER NOT NULL,
                mrv INTEGER NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (user_id, muscle_group_id),
                CHECK (mv <= mev AND mev <= mav AND mav <= mrv)
            )
            ",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS mesocycle_states (
                user_id TEXT PRIMARY KEY,
                current_week INTEGER NOT NULL,
                total_weeks INTEGER NOT NULL,
                phase TEXT NOT NULL,
                start_date TEXT NOT NULL,
                mesocycle_number INTEGER NOT NULL,
                fatigue_flag_streak INTEGER NOT NULL DEFAULT 0,
                last_deload_adjustment_pct REAL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .await
    }

    // ================================================================================================
    // History writes (owned by the logging application, exposed for import and tests)
    // ================================================================================================

    /// Insert or replace a muscle group
    ///
    /// # Errors
    ///
    /// Returns a database error if the write fails
    pub async fn insert_muscle_group(&self, group: &MuscleGroup) -> AppResult<()> {
        let mut tx = self.begin().await?;
        write_muscle_group(&mut tx, group).await?;
        commit(tx).await
    }

    /// Insert or replace an exercise contribution row
    ///
    /// # Errors
    ///
    /// Returns a database error if the write fails
    pub async fn insert_contribution(
        &self,
        contribution: &ExerciseMuscleContribution,
    ) -> AppResult<()> {
        let mut tx = self.begin().await?;
        write_contribution(&mut tx, contribution).await?;
        commit(tx).await
    }

    /// Insert or replace a workout session
    ///
    /// # Errors
    ///
    /// Returns a database error if the write fails
    pub async fn insert_session(&self, session: &WorkoutSession) -> AppResult<()> {
        let mut tx = self.begin().await?;
        write_session(&mut tx, session).await?;
        commit(tx).await
    }

    /// Insert or replace an exercise log
    ///
    /// # Errors
    ///
    /// Returns a database error if the write fails
    pub async fn insert_exercise_log(&self, log: &ExerciseLog) -> AppResult<()> {
        let mut tx = self.begin().await?;
        write_exercise_log(&mut tx, log).await?;
        commit(tx).await
    }

    /// Insert or replace session feedback
    ///
    /// # Errors
    ///
    /// Returns a database error if the write fails
    pub async fn insert_feedback(&self, feedback: &AutoRegulationFeedback) -> AppResult<()> {
        let mut tx = self.begin().await?;
        write_feedback(&mut tx, feedback).await?;
        commit(tx).await
    }

    /// Import a full history payload in one transaction
    ///
    /// # Errors
    ///
    /// Returns a database error if any write fails; nothing is imported then
    pub async fn import_history(&self, import: &HistoryImport) -> AppResult<usize> {
        let mut tx = self.begin().await?;
        for group in &import.muscle_groups {
            write_muscle_group(&mut tx, group).await?;
        }
        for contribution in &import.contributions {
            write_contribution(&mut tx, contribution).await?;
        }
        for session in &import.sessions {
            write_session(&mut tx, session).await?;
        }
        for log in &import.exercise_logs {
            write_exercise_log(&mut tx, log).await?;
        }
        for feedback in &import.feedback {
            write_feedback(&mut tx, feedback).await?;
        }
        commit(tx).await?;

        info!(records = import.len(), "Imported training history");
        Ok(import.len())
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
    }
}

#[async_trait]
impl TrainingStore for SqliteStore {
    async fn list_completed_sessions(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> AppResult<Vec<WorkoutSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, date, completed, duration_minutes, total_volume
            FROM workout_sessions
            WHERE user_id = $1 AND completed = 1 AND date >= $2
            ORDER BY date ASC, id ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(since.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list sessions: {e}")))?;

        rows.iter().map(row_to_session).collect()
    }

    async fn list_set_records(&self, session_id: SessionId) -> AppResult<Vec<ExerciseLog>> {
        let rows = sqlx::query(
            r"
            SELECT session_id, exercise_id, sets, sets_data
            FROM exercise_logs
            WHERE session_id = $1
            ORDER BY exercise_id ASC
            ",
        )
        .bind(session_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!(
                "Failed to list exercise logs for session {session_id}: {e}"
            ))
        })?;

        rows.iter().map(row_to_exercise_log).collect()
    }

    async fn get_exercise_muscle_contributions(
        &self,
        exercise_id: ExerciseId,
    ) -> AppResult<Vec<ExerciseMuscleContribution>> {
        let rows = sqlx::query(
            r"
            SELECT exercise_id, muscle_group_id, contribution_percent, role
            FROM exercise_muscle_contributions
            WHERE exercise_id = $1
            ORDER BY muscle_group_id ASC
            ",
        )
        .bind(exercise_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::database(format!(
                "Failed to get contributions for exercise {exercise_id}: {e}"
            ))
        })?;

        Ok(rows.iter().map(row_to_contribution).collect())
    }

    async fn list_muscle_groups(&self) -> AppResult<Vec<MuscleGroup>> {
        let rows = sqlx::query(
            "SELECT id, name, body_region, priority_tier FROM muscle_groups ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list muscle groups: {e}")))?;

        Ok(rows.iter().map(row_to_muscle_group).collect())
    }

    async fn get_landmarks(&self, user_id: UserId) -> AppResult<Vec<VolumeLandmark>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, muscle_group_id, mv, mev, mav, mrv, updated_at
            FROM volume_landmarks
            WHERE user_id = $1
            ORDER BY muscle_group_id ASC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get landmarks: {e}")))?;

        rows.iter().map(row_to_landmark).collect()
    }

    async fn update_landmark(
        &self,
        user_id: UserId,
        muscle_group_id: MuscleGroupId,
        patch: &LandmarkPatch,
    ) -> AppResult<VolumeLandmark> {
        let mut tx = self.begin().await?;

        let existing = sqlx::query(
            r"
            SELECT user_id, muscle_group_id, mv, mev, mav, mrv, updated_at
            FROM volume_landmarks
            WHERE user_id = $1 AND muscle_group_id = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(muscle_group_id.get())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to read landmark: {e}")))?
        .map(|row| row_to_landmark(&row))
        .transpose()?;

        let updated = resolve_landmark_patch(existing.as_ref(), user_id, muscle_group_id, patch)?;

        sqlx::query(
            r"
            INSERT INTO volume_landmarks (user_id, muscle_group_id, mv, mev, mav, mrv, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(user_id, muscle_group_id) DO UPDATE SET
                mv = excluded.mv,
                mev = excluded.mev,
                mav = excluded.mav,
                mrv = excluded.mrv,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(muscle_group_id.get())
        .bind(i64::from(updated.mv))
        .bind(i64::from(updated.mev))
        .bind(i64::from(updated.mav))
        .bind(i64::from(updated.mrv))
        .bind(updated.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to write landmark: {e}")))?;

        commit(tx).await?;
        Ok(updated)
    }

    async fn list_feedback(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> AppResult<Vec<AutoRegulationFeedback>> {
        let rows = sqlx::query(
            r"
            SELECT session_id, user_id, date, pump_quality, muscle_soreness,
                   perceived_effort, energy_level, sleep_quality
            FROM auto_regulation_feedback
            WHERE user_id = $1 AND date >= $2
            ORDER BY date ASC, session_id ASC
            ",
        )
        .bind(user_id.to_string())
        .bind(since.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list feedback: {e}")))?;

        rows.iter().map(row_to_feedback).collect()
    }

    async fn get_mesocycle_state(&self, user_id: UserId) -> AppResult<Option<MesocycleState>> {
        let row = sqlx::query(
            r"
            SELECT user_id, current_week, total_weeks, phase, start_date,
                   mesocycle_number, fatigue_flag_streak, last_deload_adjustment_pct
            FROM mesocycle_states
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get mesocycle state: {e}")))?;

        row.map(|r| row_to_mesocycle_state(&r)).transpose()
    }

    async fn update_mesocycle_state(
        &self,
        user_id: UserId,
        state: &MesocycleState,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO mesocycle_states (
                user_id, current_week, total_weeks, phase, start_date,
                mesocycle_number, fatigue_flag_streak, last_deload_adjustment_pct, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT(user_id) DO UPDATE SET
                current_week = excluded.current_week,
                total_weeks = excluded.total_weeks,
                phase = excluded.phase,
                start_date = excluded.start_date,
                mesocycle_number = excluded.mesocycle_number,
                fatigue_flag_streak = excluded.fatigue_flag_streak,
                last_deload_adjustment_pct = excluded.last_deload_adjustment_pct,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(state.current_week))
        .bind(i64::from(state.total_weeks))
        .bind(state.phase.as_str())
        .bind(state.start_date.to_string())
        .bind(i64::from(state.mesocycle_number))
        .bind(i64::from(state.fatigue_flag_streak))
        .bind(state.last_deload_adjustment_pct)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to write mesocycle state: {e}")))?;

        Ok(())
    }
}

// ================================================================================================
// Transactional writers
// ================================================================================================

async fn commit(tx: Transaction<'_, Sqlite>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))
}

async fn write_muscle_group(tx: &mut Transaction<'_, Sqlite>, group: &MuscleGroup) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT OR REPLACE INTO muscle_groups (id, name, body_region, priority_tier)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(group.id.get())
    .bind(&group.name)
    .bind(group.body_region.as_str())
    .bind(group.priority_tier.as_str())
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert muscle group {}: {e}", group.name)))?;
    Ok(())
}

async fn write_contribution(
    tx: &mut Transaction<'_, Sqlite>,
    contribution: &ExerciseMuscleContribution,
) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT OR REPLACE INTO exercise_muscle_contributions
            (exercise_id, muscle_group_id, contribution_percent, role)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(contribution.exercise_id.get())
    .bind(contribution.muscle_group_id.get())
    .bind(contribution.contribution_percent)
    .bind(contribution.role.as_str())
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert contribution: {e}")))?;
    Ok(())
}

async fn write_session(tx: &mut Transaction<'_, Sqlite>, session: &WorkoutSession) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT OR REPLACE INTO workout_sessions
            (id, user_id, date, completed, duration_minutes, total_volume)
        VALUES ($1, $2, $3, $4, $5, $6)
        ",
    )
    .bind(session.id.get())
    .bind(session.user_id.to_string())
    .bind(session.date.to_string())
    .bind(session.completed)
    .bind(session.duration_minutes.map(i64::from))
    .bind(session.total_volume)
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert session {}: {e}", session.id)))?;
    Ok(())
}

async fn write_exercise_log(tx: &mut Transaction<'_, Sqlite>, log: &ExerciseLog) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT OR REPLACE INTO exercise_logs (session_id, exercise_id, sets, sets_data)
        VALUES ($1, $2, $3, $4)
        ",
    )
    .bind(log.session_id.get())
    .bind(log.exercise_id.get())
    .bind(i64::from(log.sets))
    .bind(log.sets_data.as_deref())
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert exercise log: {e}")))?;
    Ok(())
}

async fn write_feedback(
    tx: &mut Transaction<'_, Sqlite>,
    feedback: &AutoRegulationFeedback,
) -> AppResult<()> {
    sqlx::query(
        r"
        INSERT OR REPLACE INTO auto_regulation_feedback (
            session_id, user_id, date, pump_quality, muscle_soreness,
            perceived_effort, energy_level, sleep_quality
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ",
    )
    .bind(feedback.session_id.get())
    .bind(feedback.user_id.to_string())
    .bind(feedback.date.to_string())
    .bind(i64::from(feedback.pump_quality))
    .bind(i64::from(feedback.muscle_soreness))
    .bind(i64::from(feedback.perceived_effort))
    .bind(i64::from(feedback.energy_level))
    .bind(i64::from(feedback.sleep_quality))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::database(format!("Failed to insert feedback: {e}")))?;
    Ok(())
}

// ================================================================================================
// Row mapping
// ================================================================================================

fn parse_user_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| AppError::invalid_format(format!("Invalid stored user id '{value}': {e}")))
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    Ok(value.parse::<NaiveDate>()?)
}

fn to_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| {
        AppError::invalid_format(format!("Column {column} holds out-of-range value {value}"))
    })
}

fn to_rating(value: i64) -> u8 {
    u8::try_from(value.clamp(0, i64::from(u8::MAX))).unwrap_or(u8::MAX)
}

fn row_to_muscle_group(row: &SqliteRow) -> MuscleGroup {
    let body_region: String = row.get("body_region");
    let priority_tier: String = row.get("priority_tier");
    MuscleGroup {
        id: MuscleGroupId(row.get("id")),
        name: row.get("name"),
        body_region: BodyRegion::parse(&body_region),
        priority_tier: PriorityTier::parse(&priority_tier),
    }
}

fn row_to_contribution(row: &SqliteRow) -> ExerciseMuscleContribution {
    let role: String = row.get("role");
    ExerciseMuscleContribution {
        exercise_id: ExerciseId(row.get("exercise_id")),
        muscle_group_id: MuscleGroupId(row.get("muscle_group_id")),
        contribution_percent: row.get("contribution_percent"),
        role: ContributionRole::parse(&role),
    }
}

fn row_to_session(row: &SqliteRow) -> AppResult<WorkoutSession> {
    let user_id: String = row.get("user_id");
    let date: String = row.get("date");
    let duration: Option<i64> = row.get("duration_minutes");
    Ok(WorkoutSession {
        id: SessionId(row.get("id")),
        user_id: parse_user_id(&user_id)?,
        date: parse_date(&date)?,
        completed: row.get("completed"),
        duration_minutes: duration
            .map(|minutes| to_u32(minutes, "duration_minutes"))
            .transpose()?,
        total_volume: row.get("total_volume"),
    })
}

fn row_to_exercise_log(row: &SqliteRow) -> AppResult<ExerciseLog> {
    let sets: i64 = row.get("sets");
    Ok(ExerciseLog {
        session_id: SessionId(row.get("session_id")),
        exercise_id: ExerciseId(row.get("exercise_id")),
        sets: to_u32(sets, "sets")?,
        sets_data: row.get("sets_data"),
    })
}

fn row_to_feedback(row: &SqliteRow) -> AppResult<AutoRegulationFeedback> {
    let user_id: String = row.get("user_id");
    let date: String = row.get("date");
    Ok(AutoRegulationFeedback {
        session_id: SessionId(row.get("session_id")),
        user_id: parse_user_id(&user_id)?,
        date: parse_date(&date)?,
        pump_quality: to_rating(row.get("pump_quality")),
        muscle_soreness: to_rating(row.get("muscle_soreness")),
        perceived_effort: to_rating(row.get("perceived_effort")),
        energy_level: to_rating(row.get("energy_level")),
        sleep_quality: to_rating(row.get("sleep_quality")),
    })
}

fn row_to_landmark(row: &SqliteRow) -> AppResult<VolumeLandmark> {
    let user_id: String = row.get("user_id");
    let updated_at: String = row.get("updated_at");
    Ok(VolumeLandmark {
        user_id: parse_user_id(&user_id)?,
        muscle_group_id: MuscleGroupId(row.get("muscle_group_id")),
        mv: to_u32(row.get("mv"), "mv")?,
        mev: to_u32(row.get("mev"), "mev")?,
        mav: to_u32(row.get("mav"), "mav")?,
        mrv: to_u32(row.get("mrv"), "mrv")?,
        updated_at: DateTime::parse_from_rfc3339(&updated_at)?.with_timezone(&Utc),
    })
}

fn row_to_mesocycle_state(row: &SqliteRow) -> AppResult<MesocycleState> {
    let user_id: String = row.get("user_id");
    let phase: String = row.get("phase");
    let start_date: String = row.get("start_date");
    Ok(MesocycleState {
        user_id: parse_user_id(&user_id)?,
        current_week: to_u32(row.get("current_week"), "current_week")?,
        total_weeks: to_u32(row.get("total_weeks"), "total_weeks")?,
        phase: MesocyclePhase::parse(&phase),
        start_date: parse_date(&start_date)?,
        mesocycle_number: to_u32(row.get("mesocycle_number"), "mesocycle_number")?,
        fatigue_flag_streak: to_u32(row.get("fatigue_flag_streak"), "fatigue_flag_streak")?,
        last_deload_adjustment_pct: row.get("last_deload_adjustment_pct"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        let store = SqliteStore::connect(&DatabaseUrl::Memory, 1).await.unwrap();
        store.migrate().await.unwrap();
        store
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[tokio::test]
    async fn test_sessions_are_scoped_by_user_window_and_completion() {
        let store = store().await;
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        for (id, owner, day, completed) in [
            (1, user, 1, true),
            (2, user, 10, true),
            (3, user, 12, false),
            (4, other, 12, true),
        ] {
            store
                .insert_session(&WorkoutSession {
                    id: SessionId(id),
                    user_id: owner,
                    date: date(day),
                    completed,
                    duration_minutes: Some(60),
                    total_volume: 0.0,
                })
                .await
                .unwrap();
        }

        let sessions = store.list_completed_sessions(user, date(5)).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, SessionId(2));
        assert_eq!(sessions[0].duration_minutes, Some(60));
    }

    #[tokio::test]
    async fn test_update_landmark_creates_then_patches() {
        let store = store().await;
        let user = Uuid::new_v4();
        let group = MuscleGroupId(3);

        let missing = store
            .update_landmark(
                user,
                group,
                &LandmarkPatch {
                    mav: Some(12),
                    ..LandmarkPatch::default()
                },
            )
            .await;
        assert!(missing.is_err());

        store
            .update_landmark(user, group, &LandmarkPatch::all(6, 8, 16, 22))
            .await
            .unwrap();
        let patched = store
            .update_landmark(
                user,
                group,
                &LandmarkPatch {
                    mav: Some(18),
                    ..LandmarkPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.thresholds(), (6, 8, 18, 22));

        let rejected = store
            .update_landmark(
                user,
                group,
                &LandmarkPatch {
                    mev: Some(30),
                    ..LandmarkPatch::default()
                },
            )
            .await;
        assert!(rejected.is_err());

        let stored = store.get_landmarks(user).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].thresholds(), (6, 8, 18, 22));
    }

    #[tokio::test]
    async fn test_mesocycle_state_round_trips_through_upsert() {
        let store = store().await;
        let user = Uuid::new_v4();
        assert!(store.get_mesocycle_state(user).await.unwrap().is_none());

        let mut state = MesocycleState::initial(user, 5, date(3));
        store.update_mesocycle_state(user, &state).await.unwrap();

        state.current_week = 5;
        state.phase = MesocyclePhase::Deload;
        state.last_deload_adjustment_pct = Some(-30.0);
        store.update_mesocycle_state(user, &state).await.unwrap();

        let loaded = store.get_mesocycle_state(user).await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }
}
