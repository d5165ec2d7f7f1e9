//! The single write connection. Every mutation is serialized through it.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use buddy_core::config::defaults::DEFAULT_BUSY_TIMEOUT_MS;
use buddy_core::errors::{BuddyError, BuddyResult, StorageError};

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path, busy_timeout_ms: u32) -> BuddyResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> BuddyResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure while holding the writer lock.
    pub fn with_conn<F, T>(&self, f: F) -> BuddyResult<T>
    where
        F: FnOnce(&Connection) -> BuddyResult<T>,
    {
        let guard = self.conn.lock().map_err(|e| {
            BuddyError::PersistenceUnavailable(StorageError::LockPoisoned {
                details: format!("write connection: {e}"),
            })
        })?;
        f(&guard)
    }
}
