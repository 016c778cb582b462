//! Embedded key-value store.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value BLOB NOT NULL
);
"#;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("store operation failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// A key-value store backed by a single local database file.
///
/// Opened once at process start and closed once at process end; the server
/// core only depends on that ordering, never on the contents.
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Open (creating if needed) the store at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

        conn.execute_batch(SCHEMA)?;

        tracing::info!(path = %path.display(), "Store opened");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Insert or overwrite `value` under `key`.
    pub fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    /// Fetch the value under `key`, or `None` if absent.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self.conn.query_row(
            "SELECT value FROM kv WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
        ) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Close the store explicitly.
    ///
    /// Dropping would close it too; the explicit form surfaces close errors
    /// instead of swallowing them.
    pub fn close(self) -> Result<(), StoreError> {
        let path = self.path;
        self.conn
            .close()
            .map_err(|(_conn, e)| StoreError::Query(e))?;
        tracing::info!(path = %path.display(), "Store closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_roundtrip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.db")).unwrap();

        assert!(store.get("missing").unwrap().is_none());

        store.put("session-1/last", b"ping").unwrap();
        assert_eq!(store.get("session-1/last").unwrap().unwrap(), b"ping");

        store.put("session-1/last", b"pong").unwrap();
        assert_eq!(store.get("session-1/last").unwrap().unwrap(), b"pong");

        store.close().unwrap();
    }

    #[test]
    fn reopen_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let store = Store::open(&path).unwrap();
        store.put("k", b"v").unwrap();
        store.close().unwrap();

        let store = Store::open(&path).unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), b"v");
    }
}
