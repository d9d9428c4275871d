//! String-keyed blob stores.
//!
//! A blob store holds whole serialized values under string keys. The session
//! history is written to a single key on every change and read once at start.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::Database;
use crate::error::LapwatchError;

/// A string-keyed persistent slot for whole-value serialization.
pub trait BlobStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, LapwatchError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), LapwatchError>;

    /// Remove `key`. Returns whether a value was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<bool, LapwatchError>;
}

/// Blob store backed by the `blobs` table of the lapwatch database.
pub struct SqliteBlobStore {
    db: Database,
}

impl SqliteBlobStore {
    /// Create a blob store over an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open a blob store in a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self, LapwatchError> {
        Ok(Self::new(Database::open_in_memory()?))
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, LapwatchError> {
        self.db
            .connection()
            .query_row("SELECT value FROM blobs WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| LapwatchError::Database(format!("Failed to read blob {key}: {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LapwatchError> {
        self.db
            .connection()
            .execute(
                r"INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map_err(|e| LapwatchError::Database(format!("Failed to write blob {key}: {e}")))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, LapwatchError> {
        let rows = self
            .db
            .connection()
            .execute("DELETE FROM blobs WHERE key = ?1", [key])
            .map_err(|e| LapwatchError::Database(format!("Failed to remove blob {key}: {e}")))?;

        Ok(rows > 0)
    }
}

/// Blob store kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }

    /// Check whether `key` holds a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, LapwatchError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), LapwatchError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, LapwatchError> {
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_get_missing() {
        let store = SqliteBlobStore::in_memory().unwrap();
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_set_overwrites() {
        let mut store = SqliteBlobStore::in_memory().unwrap();

        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_sqlite_remove() {
        let mut store = SqliteBlobStore::in_memory().unwrap();
        store.set("k", "v").unwrap();

        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_persists_across_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("blobs.db");

        {
            let mut store = SqliteBlobStore::new(Database::open_at(&path).unwrap());
            store.set("stopwatch-sessions", "[]").unwrap();
        }

        let store = SqliteBlobStore::new(Database::open_at(&path).unwrap());
        assert_eq!(
            store.get("stopwatch-sessions").unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryBlobStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.set("k", "v").unwrap();
        assert!(store.contains("k"));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        assert!(store.remove("k").unwrap());
        assert!(!store.contains("k"));
    }
}
