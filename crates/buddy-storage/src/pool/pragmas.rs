//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, configurable busy_timeout, foreign_keys ON.

use rusqlite::Connection;

use buddy_core::errors::BuddyResult;

use crate::to_storage_err;

/// Apply the write-side pragmas.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> BuddyResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply the pragmas a read-only connection needs.
pub fn apply_read_pragmas(conn: &Connection, busy_timeout_ms: u32) -> BuddyResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        PRAGMA query_only = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Whether WAL journaling is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> BuddyResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
