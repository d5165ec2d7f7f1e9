//! Mood check-ins.

use rusqlite::{params, Connection};

use buddy_core::errors::BuddyResult;
use buddy_core::models::{MoodEntry, UserId};

use crate::{format_ts, parse_ts, to_storage_err};

pub fn insert_mood(conn: &Connection, entry: &MoodEntry) -> BuddyResult<()> {
    conn.execute(
        "INSERT INTO mood_entries (id, user_id, mood, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.id,
            entry.user_id.as_str(),
            entry.mood,
            entry.note,
            format_ts(&entry.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Up to `limit` entries, newest first.
pub fn recent_moods(conn: &Connection, user_id: &UserId, limit: usize) -> BuddyResult<Vec<MoodEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, mood, note, created_at
             FROM mood_entries
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC
             LIMIT ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![user_id.as_str(), limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.into_iter()
        .map(|(id, user_id, mood, note, created_at)| {
            Ok(MoodEntry {
                id,
                user_id: UserId(user_id),
                mood,
                note,
                created_at: parse_ts(&created_at)?,
            })
        })
        .collect()
}
