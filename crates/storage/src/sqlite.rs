//! SQLite-backed meeting history.
//!
//! One `meetings` table holds the transcript, the ordered tool
//! artifacts as a JSON array, and the closing summary of each
//! completed analysis run.

use meetagent_core::error::StorageError;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// A fully loaded meeting record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    pub title: String,
    pub transcript: String,
    /// Tool artifacts in emission order.
    pub results: Vec<serde_json::Value>,
    pub summary: String,
    /// RFC 3339 UTC timestamp.
    pub created_at: String,
}

/// A list row: everything except the transcript and artifact payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingSummary {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub created_at: String,
}

/// Persistent store for completed analyses.
pub struct MeetingStore {
    pool: SqlitePool,
}

impl MeetingStore {
    /// Open (or create) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StorageError::Storage(format!("Create data dir: {e}")))?;
            }
        }
        let store = Self::connect(&format!("sqlite://{}", path.display())).await?;
        info!("Meeting store initialized at {}", path.display());
        Ok(store)
    }

    /// In-process ephemeral database, for tests.
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::connect("sqlite::memory:").await
    }

    async fn connect(url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| StorageError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::Storage(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS meetings (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                title        TEXT NOT NULL DEFAULT 'Untitled Meeting',
                transcript   TEXT NOT NULL,
                results_json TEXT NOT NULL DEFAULT '[]',
                summary      TEXT DEFAULT '',
                created_at   TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::MigrationFailed(format!("meetings table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_meetings_created_at ON meetings(created_at DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::MigrationFailed(format!("created_at index: {e}")))?;

        debug!("Meeting store migrations complete");
        Ok(())
    }

    /// Persist a completed analysis. Returns the new meeting id.
    pub async fn save_meeting(
        &self,
        transcript: &str,
        results: &[serde_json::Value],
        summary: &str,
        title: &str,
    ) -> Result<i64, StorageError> {
        let results_json = serde_json::to_string(results)
            .map_err(|e| StorageError::Storage(format!("Results serialization: {e}")))?;
        let created_at = chrono::Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO meetings (title, transcript, results_json, summary, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(title)
        .bind(transcript)
        .bind(&results_json)
        .bind(summary)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Storage(format!("INSERT failed: {e}")))?;

        let id = result.last_insert_rowid();
        debug!(meeting_id = id, "Saved meeting");
        Ok(id)
    }

    /// List stored meetings, newest first.
    ///
    /// `search` filters with a substring match over title, transcript,
    /// and summary.
    pub async fn list_meetings(
        &self,
        limit: i64,
        offset: i64,
        search: Option<&str>,
    ) -> Result<Vec<MeetingSummary>, StorageError> {
        let rows = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let pattern = format!("%{term}%");
                sqlx::query(
                    r#"
                    SELECT id, title, summary, created_at FROM meetings
                    WHERE title LIKE ?1 OR transcript LIKE ?1 OR summary LIKE ?1
                    ORDER BY created_at DESC
                    LIMIT ?2 OFFSET ?3
                    "#,
                )
                .bind(&pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, title, summary, created_at FROM meetings
                    ORDER BY created_at DESC
                    LIMIT ?1 OFFSET ?2
                    "#,
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StorageError::QueryFailed(format!("LIST: {e}")))?;

        rows.iter().map(Self::row_to_summary).collect()
    }

    /// Load a single meeting with its transcript and artifacts.
    pub async fn get_meeting(&self, id: i64) -> Result<Option<Meeting>, StorageError> {
        let row = sqlx::query("SELECT * FROM meetings WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("GET by id: {e}")))?;

        match row {
            Some(ref r) => Ok(Some(Self::row_to_meeting(r)?)),
            None => Ok(None),
        }
    }

    /// Delete a meeting. Returns whether a row was removed.
    pub async fn delete_meeting(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM meetings WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Storage(format!("DELETE failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored meetings.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM meetings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StorageError::QueryFailed(format!("COUNT: {e}")))?;

        row.try_get("cnt")
            .map_err(|e| StorageError::QueryFailed(format!("cnt column: {e}")))
    }

    fn row_to_summary(row: &sqlx::sqlite::SqliteRow) -> Result<MeetingSummary, StorageError> {
        Ok(MeetingSummary {
            id: row
                .try_get("id")
                .map_err(|e| StorageError::QueryFailed(format!("id column: {e}")))?,
            title: row
                .try_get("title")
                .map_err(|e| StorageError::QueryFailed(format!("title column: {e}")))?,
            summary: row
                .try_get("summary")
                .map_err(|e| StorageError::QueryFailed(format!("summary column: {e}")))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| StorageError::QueryFailed(format!("created_at column: {e}")))?,
        })
    }

    fn row_to_meeting(row: &sqlx::sqlite::SqliteRow) -> Result<Meeting, StorageError> {
        let results_json: String = row
            .try_get("results_json")
            .map_err(|e| StorageError::QueryFailed(format!("results_json column: {e}")))?;
        let results: Vec<serde_json::Value> =
            serde_json::from_str(&results_json).unwrap_or_default();

        Ok(Meeting {
            id: row
                .try_get("id")
                .map_err(|e| StorageError::QueryFailed(format!("id column: {e}")))?,
            title: row
                .try_get("title")
                .map_err(|e| StorageError::QueryFailed(format!("title column: {e}")))?,
            transcript: row
                .try_get("transcript")
                .map_err(|e| StorageError::QueryFailed(format!("transcript column: {e}")))?,
            results,
            summary: row
                .try_get("summary")
                .map_err(|e| StorageError::QueryFailed(format!("summary column: {e}")))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| StorageError::QueryFailed(format!("created_at column: {e}")))?,
        })
    }
}
