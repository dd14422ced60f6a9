//! `SQLite` database connection.
//!
//! The database lives at `~/.studybuddy/studybuddy.db` and holds the history
//! of completed focus intervals.

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::StudyError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, StudyError> {
        let paths = Paths::new()?;
        Self::open_with(&paths)
    }

    /// Open the database inside a resolved [`Paths`] root.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created, the database
    /// cannot be opened, or migrations fail.
    pub fn open_with(paths: &Paths) -> Result<Self, StudyError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StudyError> {
        let conn = Connection::open(path).map_err(|e| {
            StudyError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::init(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, StudyError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StudyError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StudyError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| StudyError::Database(format!("Failed to enable foreign keys: {e}")))?;

        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(version = db.schema_version()?, "database ready");

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), StudyError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, StudyError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    ///
    /// This is primarily for use by feature modules that need direct access.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
