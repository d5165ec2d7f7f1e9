//! # buddy-storage
//!
//! SQLite persistence for the buddy matching engine: one serialized write
//! connection, a read pool, numbered migrations, and raw query modules.
//! [`StorageEngine`] implements the collaborator traits from `buddy-core`.
//!
//! Group membership writes are guarded twice: the write path re-checks
//! capacity inside a `BEGIN IMMEDIATE` transaction, and schema triggers reject
//! any insert that would overfill a group or double-book a user.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use buddy_core::errors::{BuddyError, StorageError};
use chrono::{DateTime, SecondsFormat, Utc};

/// Wrap a low-level message as a persistence failure.
pub(crate) fn to_storage_err(message: impl Into<String>) -> BuddyError {
    BuddyError::PersistenceUnavailable(StorageError::SqliteError {
        message: message.into(),
    })
}

/// Fixed-width RFC 3339 so that lexical order equals chronological order.
pub(crate) fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_ts(raw: &str) -> Result<DateTime<Utc>, BuddyError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp {raw:?}: {e}")))
}
