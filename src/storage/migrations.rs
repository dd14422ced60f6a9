//! Database migrations.
//!
//! Each migration upgrades the schema by one version and runs automatically
//! when the database is opened.

use rusqlite::Connection;

use crate::error::StudyError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, StudyError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StudyError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StudyError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| StudyError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), StudyError> {
    let current = get_version(conn)?;

    if current > CURRENT_VERSION {
        return Err(StudyError::Database(format!(
            "Database schema v{current} is newer than this build supports (v{CURRENT_VERSION})"
        )));
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::info!(version, "running database migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), StudyError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(StudyError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: completed focus intervals.
///
/// Timestamps are RFC 3339 UTC strings with millisecond precision, so
/// string order matches time order.
fn migrate_v1(conn: &Connection) -> Result<(), StudyError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS focus_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            ended_at TEXT NOT NULL,
            duration_seconds INTEGER NOT NULL CHECK (duration_seconds >= 0)
        );

        CREATE INDEX IF NOT EXISTS idx_focus_records_ended
        ON focus_records(ended_at);
        ",
    )
    .map_err(|e| StudyError::Database(format!("Migration v1 failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_v1() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO focus_records (started_at, ended_at, duration_seconds)
             VALUES ('2024-01-01T10:00:00.000Z', '2024-01-01T10:25:00.000Z', 1500)",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_negative_duration_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        run(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO focus_records (started_at, ended_at, duration_seconds)
             VALUES ('2024-01-01T10:25:00.000Z', '2024-01-01T10:00:00.000Z', -1500)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_migration_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        run(&conn).unwrap();
        run(&conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_get_version_new_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let conn = Connection::open_in_memory().unwrap();
        set_version(&conn, CURRENT_VERSION + 1).unwrap();

        assert!(run(&conn).is_err());
    }
}
