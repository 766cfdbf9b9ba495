//! Veracity Storage Layer
//!
//! Durable keyed storage and the resilience score store.
//!
//! # Architecture
//!
//! - [`SqliteStorage`]: SQLite-backed `KeyValueStorage` for persisted values
//! - [`MemoryStorage`]: in-process `KeyValueStorage` for tests and throwaway runs
//! - [`ScoreStore`]: owns the resilience score, persists every change and
//!   notifies subscribers
//!
//! # Examples
//!
//! ```
//! use veracity_store::{ScoreStore, SqliteStorage};
//!
//! let storage = SqliteStorage::new(":memory:").unwrap();
//! let store = ScoreStore::open(storage).unwrap();
//! assert_eq!(store.score().value(), 50);
//! ```

#![warn(missing_docs)]

mod memory;
mod score;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;
use veracity_domain::traits::KeyValueStorage;

pub use memory::MemoryStorage;
pub use score::{ScoreStore, SubscriptionId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O error while preparing the database location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding store state was poisoned
    #[error("Store lock poisoned")]
    Lock,

    /// Error reported by a storage backend
    #[error("Storage error: {0}")]
    Storage(String),
}

/// SQLite-based implementation of `KeyValueStorage`
///
/// Values are stored as plain text in a single `kv` table.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a `SqliteStorage` through a
/// [`ScoreStore`], which serializes access.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing). The
    /// parent directory of a file path is created when missing.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if path != Path::new(":memory:") {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        let mut storage = Self { conn };
        storage.initialize_schema()?;
        Ok(storage)
    }

    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }
}

impl KeyValueStorage for SqliteStorage {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, strftime('%s', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }
}
