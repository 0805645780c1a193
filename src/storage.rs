//! # Storage
//!
//! Location of the SQLite database, per-connection settings, and the schema migration
//! that runs once at startup.
//!
//! Every table actor opens its own connection to the same file. WAL journaling and a
//! busy timeout let the two writers take turns instead of failing with `SQLITE_BUSY`.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Version recorded in `PRAGMA user_version` once the schema is applied.
const SCHEMA_VERSION: i64 = 1;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const INITIAL_SCHEMA: &str = include_str!("../migrations/001_initial_schema.sql");

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to create database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: i64, supported: i64 },
}

/// Handle to the database file. Cheap to clone; opens connections on demand.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a configured connection, creating the file and its directory if needed.
    pub fn connect(&self) -> Result<Connection, StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(path = %self.path.display(), journal_mode = %mode, "Connection opened");
        Ok(conn)
    }

    /// Applies the schema. Safe to run on every startup.
    pub fn migrate(&self) -> Result<(), StorageError> {
        let mut conn = self.connect()?;
        let found: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        if found > SCHEMA_VERSION {
            return Err(StorageError::SchemaTooNew {
                found,
                supported: SCHEMA_VERSION,
            });
        }

        let tx = conn.transaction()?;
        tx.execute_batch(INITIAL_SCHEMA)?;
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;

        info!(path = %self.path.display(), from = found, to = SCHEMA_VERSION, "Schema ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<rusqlite::Result<Vec<String>>>()
            .unwrap()
    }

    #[test]
    fn migrate_creates_directory_and_tables() {
        let temp = tempfile::tempdir().expect("tempdir");
        let db = Database::new(temp.path().join("instance").join("database.db"));

        db.migrate().unwrap();

        assert!(db.path().exists());
        let conn = db.connect().unwrap();
        assert_eq!(table_names(&conn), vec!["logs", "orders"]);
    }

    #[test]
    fn migrate_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let db = Database::new(temp.path().join("database.db"));

        db.migrate().unwrap();
        let conn = db.connect().unwrap();
        conn.execute(
            "INSERT INTO logs (type, performer, timestamp) VALUES ('Add Order', 'Alice', '2024-05-01 00:00:00+00:00')",
            [],
        )
        .unwrap();
        drop(conn);

        db.migrate().unwrap();
        let conn = db.connect().unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn migrate_refuses_newer_schema() {
        let temp = tempfile::tempdir().expect("tempdir");
        let db = Database::new(temp.path().join("database.db"));
        let conn = db.connect().unwrap();
        conn.pragma_update(None, "user_version", 99).unwrap();
        drop(conn);

        let err = db.migrate().unwrap_err();
        assert!(matches!(err, StorageError::SchemaTooNew { found: 99, .. }));
    }
}
