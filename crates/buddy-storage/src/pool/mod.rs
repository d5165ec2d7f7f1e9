//! Connection pool: one serialized writer plus round-robin readers.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use buddy_core::errors::BuddyResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    /// `None` for in-memory pools: a second in-memory connection would be a
    /// separate, empty database.
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a pool against a database file.
    pub fn open(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> BuddyResult<Self> {
        // The writer goes first so the file and WAL exist before readers open read-only.
        let writer = WriteConnection::open(path, busy_timeout_ms)?;
        let readers = ReadPool::open(path, read_pool_size, busy_timeout_ms)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// In-memory pool. All reads go through the writer.
    pub fn open_in_memory() -> BuddyResult<Self> {
        Ok(Self {
            writer: WriteConnection::open_in_memory()?,
            readers: None,
            db_path: None,
        })
    }

    /// Run a read on the next pooled reader, or on the writer when there is
    /// no read pool.
    pub fn with_reader<F, T>(&self, f: F) -> BuddyResult<T>
    where
        F: FnOnce(&Connection) -> BuddyResult<T>,
    {
        match &self.readers {
            Some(readers) => readers.with_conn(f),
            None => self.writer.with_conn(f),
        }
    }
}
