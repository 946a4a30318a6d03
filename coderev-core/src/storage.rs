//! Durable storage behind the history cache.
//!
//! [`crate::history::HistoryStore`] is written against the narrow
//! [`Storage`] trait — read one record, rewrite one record — so the
//! persistence medium is an injected dependency. [`SqliteStorage`] is the
//! production implementation; [`MemoryStorage`] backs tests and ephemeral
//! runs.

use std::time::Duration;

use rusqlite::OptionalExtension;

use crate::error::StorageError;

/// The fixed key the serialized history array lives under.
pub const HISTORY_KEY: &str = "codereview_history";

/// One named durable record. `read` returns `None` when the record has
/// never been written; `write` replaces it wholesale.
pub trait Storage {
    /// Reads the full record, or `None` if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying medium fails. The caller
    /// (`HistoryStore`) treats that as "no history", never as fatal.
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrites the full record with `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying medium fails.
    fn write(&mut self, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Single-record store in a WAL-mode SQLite database.
///
/// The key/value layout mirrors browser local storage: one `local_store`
/// table, the history under the fixed [`HISTORY_KEY`] row, full rewrite on
/// every change.
pub struct SqliteStorage {
    conn: rusqlite::Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path`, configures WAL mode, and
    /// applies schema migrations via the `schema_version` table.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file cannot be opened, WAL
    /// configuration fails, or schema DDL fails.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let mut conn = rusqlite::Connection::open(path)?;

        // Connection-level pragmas, re-applied on every open.
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;",
        )?;
        // busy_timeout via Connection method (not a PRAGMA string) so the
        // setting takes effect regardless of pragma caching.
        conn.busy_timeout(Duration::from_secs(5))?;

        crate::schema::migrate(&mut conn)?;

        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM local_store WHERE key = ?1",
                rusqlite::params![HISTORY_KEY],
                |r| r.get(0),
            )
            .optional()?;
        Ok(value.map(String::into_bytes))
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        // The record is JSON produced by HistoryStore; store it as TEXT.
        let value = String::from_utf8_lossy(bytes).into_owned();
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO local_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![HISTORY_KEY, value],
        )?;
        tx.commit()?;
        Ok(())
    }
}

/// In-process store with no durability. The injection point for test
/// doubles, also usable when a run should leave no trace on disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    record: Option<Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.record.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        self.record = Some(bytes.to_vec());
        Ok(())
    }
}
