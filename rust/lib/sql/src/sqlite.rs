use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::Connection;
use tracing::debug;

use crate::error::SQLError;
use crate::traits::SQLConnection;

/// SqliteStore is a SQLConnection backed by rusqlite (bundled SQLite).
///
/// Statements are compiled with `sqlite3_prepare_v2` and finalized when the
/// `Statement` is dropped; nothing is ever stepped.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        let conn = Connection::open(path).map_err(|e| SQLError::Connection(e.to_string()))?;

        // Enable WAL mode for better concurrent read performance.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SQLError> {
        let conn =
            Connection::open_in_memory().map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl SQLConnection for SqliteStore {
    async fn prepare(&self, sql: &str) -> Result<(), SQLError> {
        // Parse-only and local; nothing below may `.await` while the lock is held.
        let conn = self
            .conn
            .lock()
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        let stmt = conn.prepare(sql).map_err(|e| SQLError::Query(e.to_string()))?;
        debug!(params = stmt.parameter_count(), "sqlite: statement prepared");
        drop(stmt);
        Ok(())
    }

    fn dialect(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_prepare_valid_statement() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.prepare("SELECT 1").await.unwrap();
        store
            .prepare("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT)")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_prepare_syntax_error_is_query_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.prepare("CREATE TABL t (id INTEGER)").await.unwrap_err();
        match err {
            SQLError::Query(msg) => assert!(msg.contains("syntax error"), "got: {msg}"),
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prepare_does_not_execute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.sqlite");
        let store = SqliteStore::open(&path).unwrap();

        store.prepare("CREATE TABLE probe (id INTEGER)").await.unwrap();

        let check = Connection::open(&path).unwrap();
        let count: i64 = check
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE name = 'probe'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_prepare_is_repeatable() {
        let store = SqliteStore::open_in_memory().unwrap();
        for _ in 0..3 {
            store.prepare("SELECT 'foo', 'bar'").await.unwrap();
        }
        assert_eq!(store.dialect(), "sqlite");
    }
}
