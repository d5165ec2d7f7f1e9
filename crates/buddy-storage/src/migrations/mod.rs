//! Numbered schema migrations, applied in order and recorded in `schema_version`.

pub mod v001_assessment_tables;
pub mod v002_group_tables;

use rusqlite::{params, Connection, OptionalExtension};

use buddy_core::errors::{BuddyError, BuddyResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> BuddyResult<()>;

/// All migrations, ordered by version.
const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_assessment_tables::migrate),
    (2, v002_group_tables::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the recorded schema version.
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> BuddyResult<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    let mut applied = 0;
    for &(version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| migration_err(version, e.to_string()))?;
        migrate(&tx).map_err(|e| migration_err(version, e.to_string()))?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| migration_err(version, e.to_string()))?;
        tx.commit()
            .map_err(|e| migration_err(version, e.to_string()))?;
        applied += 1;
    }
    Ok(applied)
}

/// Highest applied migration, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> BuddyResult<u32> {
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?
        .flatten();
    Ok(version.unwrap_or(0))
}

fn migration_err(version: u32, reason: String) -> BuddyError {
    BuddyError::PersistenceUnavailable(StorageError::MigrationFailed { version, reason })
}
