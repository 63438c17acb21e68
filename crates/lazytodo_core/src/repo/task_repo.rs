//! Task collection storage contracts and implementations.
//!
//! # Responsibility
//! - Read and write the serialized collection under one namespace key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - A write replaces the whole payload; there are no partial updates.
//! - Reads return the raw payload; decoding is the caller's concern.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Namespace key the task list is persisted under.
pub const STORAGE_KEY: &str = "todo-items-v1";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level error for payload reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Collection could not be serialized.
    Encode(serde_json::Error),
    /// Backend refused the operation.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "task storage requires schema version {expected_version}, found {actual_version}"
            ),
            Self::Encode(err) => write!(f, "failed to encode task payload: {err}"),
            Self::Unavailable(message) => write!(f, "task storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Whole-payload storage for the task collection.
pub trait TaskStorage {
    /// Returns the stored payload, or `None` when nothing was written yet.
    fn read_payload(&self) -> RepoResult<Option<String>>;
    /// Replaces the stored payload.
    fn write_payload(&self, payload: &str) -> RepoResult<()>;
}

impl<T: TaskStorage + ?Sized> TaskStorage for &T {
    fn read_payload(&self) -> RepoResult<Option<String>> {
        (**self).read_payload()
    }

    fn write_payload(&self, payload: &str) -> RepoResult<()> {
        (**self).write_payload(payload)
    }
}

/// SQLite-backed storage using the `kv_entries` table.
pub struct SqliteTaskStorage<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteTaskStorage<'conn> {
    /// Creates storage under the default namespace.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::try_with_key(conn, STORAGE_KEY)
    }

    /// Creates storage under a caller-chosen namespace.
    pub fn try_with_key(conn: &'conn Connection, key: impl Into<String>) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl TaskStorage for SqliteTaskStorage<'_> {
    fn read_payload(&self) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn write_payload(&self, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), payload],
        )?;
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTaskStorage {
    payload: RefCell<Option<String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryTaskStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with an already-stored payload, valid or not.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.payload.replace(Some(payload.into()));
        storage
    }

    /// Current raw payload.
    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Makes subsequent writes fail until switched off again.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl TaskStorage for MemoryTaskStorage {
    fn read_payload(&self) -> RepoResult<Option<String>> {
        Ok(self.payload.borrow().clone())
    }

    fn write_payload(&self, payload: &str) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::Unavailable("writes disabled".to_string()));
        }
        self.payload.replace(Some(payload.to_string()));
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{MemoryTaskStorage, TaskStorage};

    #[test]
    fn memory_storage_round_trips_and_counts_writes() {
        let storage = MemoryTaskStorage::new();
        assert_eq!(storage.read_payload().unwrap(), None);

        storage.write_payload("[]").unwrap();
        storage.write_payload("[1]").unwrap();
        assert_eq!(storage.read_payload().unwrap().as_deref(), Some("[1]"));
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn memory_storage_can_refuse_writes() {
        let storage = MemoryTaskStorage::with_payload("[]");
        storage.set_fail_writes(true);
        assert!(storage.write_payload("[1]").is_err());
        assert_eq!(storage.payload().as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 0);
    }
}
