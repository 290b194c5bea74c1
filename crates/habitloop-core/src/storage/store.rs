//! Abstract key-value store and its SQLite implementation.
//!
//! The tracker persists JSON values by string key: the full ledger under
//! one key, the progress log and rollover marker under their own keys.
//! Semantics are last-write-wins with a single writer. An unparseable
//! stored value reads as absent so that corruption degrades to defaults
//! instead of aborting the session.

use std::collections::HashMap;
use std::path::Path;

use rusqlite::{params, Connection};
use serde_json::Value;

use crate::error::StorageError;

use super::data_dir;

/// Store key for the full habit ledger.
pub const KEY_HABITS: &str = "habits";
/// Store key for the percentage-per-day progress log.
pub const KEY_PROGRESS: &str = "daily_progress";
/// Store key for the rollover marker.
pub const KEY_LAST_RESET: &str = "last_reset_date";

/// Abstract get/set of JSON values by string key.
pub trait KvStore {
    /// Read a value. Absent keys and unparseable stored text both return
    /// `None`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &Value) -> Result<(), StorageError>;
}

/// SQLite-backed store at `~/.config/habitloop/habitloop.db`.
///
/// Values are stored as JSON text in a single `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store in the data directory, creating schema if needed.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created or the
    /// database cannot be opened or migrated.
    pub fn open() -> crate::error::Result<Self> {
        let path = data_dir()?.join("habitloop.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Option<Value> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .ok()?;
        let text = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .ok()?;
        // Corrupt stored text degrades to absent.
        serde_json::from_str(&text).ok()
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value.to_string()],
            )
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.clone());
        Ok(())
    }
}
