//! Local history store
//!
//! SQLite-backed persistence for scoring history, daily scores, and cached
//! assistant replies. This is the concrete form of the persistence
//! collaborator: the scoring core never touches it — callers fetch inputs
//! here, run the pure pipeline, and hand results back for storage.
//!
//! History items are retained for the rolling 30-day window; callers prune
//! on their own schedule via [`HistoryStore::prune_items_before`]. Assistant
//! replies are cached keyed by a SHA-256 digest of the verbatim question and
//! served only within a freshness window.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::models::{DailyFitnessScore, FitnessLevel, HistoryItem, ScoreCategory};

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
    #[error("Data not found: {0}")]
    NotFound(String),
}

/// SQLite connection and schema management
pub struct HistoryStore {
    conn: Connection,
}

impl HistoryStore {
    /// Create or open a store at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = HistoryStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store, used by tests and dry runs
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = HistoryStore { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS history_items (
                id TEXT PRIMARY KEY,
                category TEXT NOT NULL,
                metric TEXT NOT NULL,
                points INTEGER NOT NULL,
                max_points INTEGER NOT NULL,
                reason TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_history_items_timestamp
                ON history_items(timestamp);

            CREATE TABLE IF NOT EXISTS daily_scores (
                date TEXT PRIMARY KEY,
                total_score INTEGER NOT NULL,
                cardiovascular_points INTEGER NOT NULL,
                recovery_points INTEGER NOT NULL,
                activity_points INTEGER NOT NULL,
                bonus_points INTEGER NOT NULL,
                level TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS assistant_replies (
                question_hash TEXT PRIMARY KEY,
                question TEXT NOT NULL,
                reply TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Persist a batch of history items in one transaction.
    pub fn save_items(&mut self, items: &[HistoryItem]) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO history_items
                 (id, category, metric, points, max_points, reason, timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for item in items {
                stmt.execute(params![
                    item.id.to_string(),
                    item.category.as_str(),
                    item.metric,
                    item.points,
                    item.max_points,
                    item.reason,
                    item.timestamp,
                ])?;
            }
        }
        tx.commit()?;
        debug!(count = items.len(), "history items saved");
        Ok(())
    }

    /// Load all items at or after the cutoff, newest first.
    pub fn items_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<HistoryItem>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, metric, points, max_points, reason, timestamp
             FROM history_items
             WHERE timestamp >= ?1
             ORDER BY timestamp DESC",
        )?;

        let rows = stmt.query_map(params![cutoff], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, DateTime<Utc>>(6)?,
            ))
        })?;

        let mut items = Vec::new();
        for row in rows {
            let (id, category, metric, points, max_points, reason, timestamp) = row?;
            items.push(HistoryItem {
                id: Uuid::parse_str(&id)
                    .map_err(|e| StorageError::InvalidRecord(format!("item id: {}", e)))?,
                category: category
                    .parse::<ScoreCategory>()
                    .map_err(StorageError::InvalidRecord)?,
                metric,
                points,
                max_points,
                reason,
                timestamp,
            });
        }
        Ok(items)
    }

    /// Delete items older than the cutoff; returns how many were removed.
    pub fn prune_items_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM history_items WHERE timestamp < ?1",
            params![cutoff],
        )?;
        debug!(removed, "history items pruned");
        Ok(removed)
    }

    /// Persist a daily score, replacing any earlier run for the same day.
    ///
    /// `history_items` travel separately through [`Self::save_items`].
    pub fn save_daily_score(&mut self, score: &DailyFitnessScore) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO daily_scores
             (date, total_score, cardiovascular_points, recovery_points,
              activity_points, bonus_points, level)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                score.date,
                score.total_score,
                score.cardiovascular_points,
                score.recovery_points,
                score.activity_points,
                score.bonus_points,
                score.level.as_str(),
            ],
        )?;
        Ok(())
    }

    /// Load daily scores at or after the cutoff date, newest first.
    ///
    /// Loaded scores carry no history items; those live in their own table.
    pub fn daily_scores_since(
        &self,
        cutoff: NaiveDate,
    ) -> Result<Vec<DailyFitnessScore>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, total_score, cardiovascular_points, recovery_points,
                    activity_points, bonus_points, level
             FROM daily_scores
             WHERE date >= ?1
             ORDER BY date DESC",
        )?;

        let rows = stmt.query_map(params![cutoff], |row| {
            Ok((
                row.get::<_, NaiveDate>(0)?,
                row.get::<_, u8>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
                row.get::<_, u8>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut scores = Vec::new();
        for row in rows {
            let (date, total, cardio, recovery, activity, bonus, level) = row?;
            scores.push(DailyFitnessScore {
                date,
                total_score: total,
                cardiovascular_points: cardio,
                recovery_points: recovery,
                activity_points: activity,
                bonus_points: bonus,
                level: level
                    .parse::<FitnessLevel>()
                    .map_err(StorageError::InvalidRecord)?,
                history_items: Vec::new(),
            });
        }
        Ok(scores)
    }

    /// Look up a cached assistant reply for the verbatim question.
    ///
    /// Replies older than `max_age` are treated as absent.
    pub fn cached_reply(
        &self,
        question: &str,
        max_age: Duration,
    ) -> Result<Option<String>, StorageError> {
        let row: Option<(String, DateTime<Utc>)> = self
            .conn
            .query_row(
                "SELECT reply, created_at FROM assistant_replies WHERE question_hash = ?1",
                params![question_key(question)],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(row.and_then(|(reply, created_at)| {
            if Utc::now() - created_at <= max_age {
                Some(reply)
            } else {
                None
            }
        }))
    }

    /// Cache an assistant reply for the verbatim question.
    pub fn store_reply(&mut self, question: &str, reply: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO assistant_replies
             (question_hash, question, reply, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![question_key(question), question, reply, Utc::now()],
        )?;
        Ok(())
    }
}

/// Cache key: hex SHA-256 of the verbatim question text.
fn question_key(question: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(question.as_bytes());
    format!("{:x}", hasher.finalize())
}
