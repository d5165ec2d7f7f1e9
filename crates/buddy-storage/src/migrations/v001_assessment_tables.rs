//! v001: assessment history and mood log.

use rusqlite::Connection;

use buddy_core::errors::BuddyResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> BuddyResult<()> {
    tracing::info!("v001: creating assessment and mood tables");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS loneliness_assessments (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            responses  TEXT NOT NULL,
            score      INTEGER NOT NULL CHECK (score BETWEEN 6 AND 24),
            category   TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_loneliness_user_created
            ON loneliness_assessments(user_id, created_at);

        CREATE TABLE IF NOT EXISTS leisure_assessments (
            id             TEXT PRIMARY KEY,
            user_id        TEXT NOT NULL,
            responses      TEXT NOT NULL,
            weights        TEXT NOT NULL,
            top_categories TEXT NOT NULL,
            created_at     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_leisure_user_created
            ON leisure_assessments(user_id, created_at);

        CREATE TABLE IF NOT EXISTS mood_entries (
            id         TEXT PRIMARY KEY,
            user_id    TEXT NOT NULL,
            mood       INTEGER NOT NULL CHECK (mood BETWEEN 1 AND 5),
            note       TEXT,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_mood_user_created
            ON mood_entries(user_id, created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}
