//! Focus record storage.
//!
//! Persists completed focus intervals to the local database.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};

use super::record::{CompletedFocusRecord, RecordSink};
use crate::error::StudyError;
use crate::storage::Database;

/// SQLite-backed storage for completed focus intervals.
pub struct FocusStorage {
    db: Database,
}

impl FocusStorage {
    /// Open storage at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, StudyError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert a record and assign its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the record already has an ID or the insert fails.
    pub fn insert(&self, record: &mut CompletedFocusRecord) -> Result<(), StudyError> {
        if let Some(id) = record.id {
            return Err(StudyError::Database(format!(
                "Focus record {id} is already stored"
            )));
        }

        let conn = self.db.connection();
        conn.execute(
            r"INSERT INTO focus_records (started_at, ended_at, duration_seconds)
              VALUES (?1, ?2, ?3)",
            params![
                to_db_time(&record.started_at),
                to_db_time(&record.ended_at),
                record.duration_seconds(),
            ],
        )
        .map_err(|e| StudyError::Database(format!("Failed to insert focus record: {e}")))?;

        record.id = Some(conn.last_insert_rowid());
        Ok(())
    }

    /// Get a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<CompletedFocusRecord>, StudyError> {
        self.db
            .connection()
            .query_row(
                "SELECT id, started_at, ended_at FROM focus_records WHERE id = ?1",
                [id],
                row_to_record,
            )
            .optional()
            .map_err(|e| StudyError::Database(format!("Failed to query focus record: {e}")))
    }

    /// Most recently ended records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_recent(&self, limit: usize) -> Result<Vec<CompletedFocusRecord>, StudyError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, started_at, ended_at
                  FROM focus_records
                  ORDER BY ended_at DESC, id DESC
                  LIMIT ?1",
            )
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], row_to_record)
            .map_err(|e| StudyError::Database(format!("Failed to query focus records: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<usize, StudyError> {
        let count: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM focus_records", [], |row| row.get(0))
            .map_err(|e| StudyError::Database(format!("Failed to count focus records: {e}")))?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Delete one record. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: i64) -> Result<bool, StudyError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM focus_records WHERE id = ?1", [id])
            .map_err(|e| StudyError::Database(format!("Failed to delete focus record: {e}")))?;

        Ok(rows > 0)
    }

    /// Delete every record. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, StudyError> {
        self.db
            .connection()
            .execute("DELETE FROM focus_records", [])
            .map_err(|e| StudyError::Database(format!("Failed to clear focus records: {e}")))
    }
}

impl RecordSink for FocusStorage {
    fn save(&mut self, record: &mut CompletedFocusRecord) -> Result<(), StudyError> {
        self.insert(record)
    }

    fn records_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CompletedFocusRecord>, StudyError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, started_at, ended_at
                  FROM focus_records
                  WHERE ended_at >= ?1 AND ended_at < ?2
                  ORDER BY ended_at DESC, id DESC",
            )
            .map_err(|e| StudyError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([to_db_time(&start), to_db_time(&end)], row_to_record)
            .map_err(|e| StudyError::Database(format!("Failed to query focus records: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| StudyError::Database(e.to_string()))
    }
}

fn to_db_time(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_db_time(idx: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn row_to_record(row: &Row<'_>) -> Result<CompletedFocusRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let started_at: String = row.get(1)?;
    let ended_at: String = row.get(2)?;

    Ok(CompletedFocusRecord {
        id: Some(id),
        started_at: parse_db_time(1, &started_at)?,
        ended_at: parse_db_time(2, &ended_at)?,
    })
}
