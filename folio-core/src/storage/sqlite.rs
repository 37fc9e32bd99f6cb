use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{FolioError, StorageError};

use super::SlotStorage;
use super::schema;

/// SQLite-backed implementation of `SlotStorage`.
#[derive(Debug)]
pub struct SqliteSlots {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteSlots {
    /// Open (or create) a slot database at the given path.
    pub fn open(path: &Path) -> crate::error::Result<Self> {
        let conn = Connection::open(path).map_err(StorageError::Sqlite)?;
        let slots = Self {
            conn: Mutex::new(conn),
            db_path: Some(path.to_path_buf()),
        };
        slots.initialize()?;
        Ok(slots)
    }

    /// Create an in-memory slot database (for testing).
    pub fn in_memory() -> crate::error::Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::Sqlite)?;
        let slots = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        slots.initialize()?;
        Ok(slots)
    }

    /// Path of the backing file, `None` for in-memory databases.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn initialize(&self) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("folio storage mutex poisoned");

        conn.execute_batch("PRAGMA synchronous = NORMAL;")
            .map_err(StorageError::Sqlite)?;

        // WAL is ignored for in-memory databases
        let _ = conn.execute_batch("PRAGMA journal_mode = WAL;");

        conn.execute_batch(schema::SCHEMA_SQL)
            .map_err(StorageError::Sqlite)?;

        let existing: Option<String> = conn
            .query_row(
                "SELECT value FROM folio_meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(StorageError::Sqlite)?;

        match existing {
            None => {
                conn.execute(
                    "INSERT INTO folio_meta (key, value) VALUES ('schema_version', ?1)",
                    params![schema::SCHEMA_VERSION],
                )
                .map_err(StorageError::Sqlite)?;
            }
            Some(v) if v == schema::SCHEMA_VERSION => {}
            Some(v) => {
                return Err(StorageError::Migration(format!(
                    "database schema version {v} is not supported (expected {})",
                    schema::SCHEMA_VERSION
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl SlotStorage for SqliteSlots {
    async fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        let conn = self.conn.lock().expect("folio storage mutex poisoned");
        conn.query_row(
            "SELECT value FROM slots WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(StorageError::Sqlite)
        .map_err(FolioError::Storage)
    }

    async fn set(&self, key: &str, value: &str) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("folio storage mutex poisoned");
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .map_err(StorageError::Sqlite)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> crate::error::Result<()> {
        let conn = self.conn.lock().expect("folio storage mutex poisoned");
        conn.execute("DELETE FROM slots WHERE key = ?1", params![key])
            .map_err(StorageError::Sqlite)?;
        Ok(())
    }

    async fn keys(&self) -> crate::error::Result<Vec<String>> {
        let conn = self.conn.lock().expect("folio storage mutex poisoned");
        let mut stmt = conn
            .prepare("SELECT key FROM slots ORDER BY key")
            .map_err(StorageError::Sqlite)?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(StorageError::Sqlite)?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(StorageError::Sqlite)?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slot_operations() {
        let slots = SqliteSlots::in_memory().unwrap();

        assert!(slots.get("projects").await.unwrap().is_none());

        slots.set("projects", "[]").await.unwrap();
        assert_eq!(slots.get("projects").await.unwrap().as_deref(), Some("[]"));

        slots.set("projects", "[1]").await.unwrap();
        assert_eq!(slots.get("projects").await.unwrap().as_deref(), Some("[1]"));

        slots.remove("projects").await.unwrap();
        assert!(slots.get("projects").await.unwrap().is_none());

        // Removing again is fine
        slots.remove("projects").await.unwrap();
    }

    #[tokio::test]
    async fn keys_are_sorted() {
        let slots = SqliteSlots::in_memory().unwrap();
        slots.set("projects", "[]").await.unwrap();
        slots.set("auth_user", "{}").await.unwrap();
        assert_eq!(slots.keys().await.unwrap(), vec!["auth_user", "projects"]);
    }

    #[tokio::test]
    async fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.db");
        {
            let slots = SqliteSlots::open(&path).unwrap();
            slots.set("auth_user", "{\"id\":\"1\"}").await.unwrap();
        }
        let slots = SqliteSlots::open(&path).unwrap();
        assert_eq!(slots.db_path(), Some(path.as_path()));
        assert_eq!(
            slots.get("auth_user").await.unwrap().as_deref(),
            Some("{\"id\":\"1\"}")
        );
    }

    #[tokio::test]
    async fn unknown_schema_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch(schema::SCHEMA_SQL).unwrap();
            conn.execute(
                "INSERT INTO folio_meta (key, value) VALUES ('schema_version', '99')",
                [],
            )
            .unwrap();
        }
        let err = SqliteSlots::open(&path).unwrap_err();
        assert!(matches!(
            err,
            FolioError::Storage(StorageError::Migration(_))
        ));
    }
}
