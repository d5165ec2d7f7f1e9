//! Loneliness and leisure assessment history.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use buddy_core::errors::BuddyResult;
use buddy_core::models::{LeisureAssessment, LonelinessAssessment, UserId};

use crate::{format_ts, parse_ts, to_storage_err};

/// Raw loneliness row before JSON and enum decoding.
struct LonelinessRow {
    id: String,
    user_id: String,
    responses: String,
    score: u32,
    category: String,
    created_at: String,
}

impl LonelinessRow {
    fn into_assessment(self) -> BuddyResult<LonelinessAssessment> {
        Ok(LonelinessAssessment {
            id: self.id,
            user_id: UserId(self.user_id),
            responses: serde_json::from_str(&self.responses)?,
            score: self.score,
            category: self.category.parse()?,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

struct LeisureRow {
    id: String,
    user_id: String,
    responses: String,
    weights: String,
    top_categories: String,
    created_at: String,
}

impl LeisureRow {
    fn into_assessment(self) -> BuddyResult<LeisureAssessment> {
        Ok(LeisureAssessment {
            id: self.id,
            user_id: UserId(self.user_id),
            responses: serde_json::from_str(&self.responses)?,
            weights: serde_json::from_str(&self.weights)?,
            top_categories: serde_json::from_str(&self.top_categories)?,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

pub fn insert_loneliness(conn: &Connection, a: &LonelinessAssessment) -> BuddyResult<()> {
    let responses = serde_json::to_string(&a.responses)?;
    conn.execute(
        "INSERT INTO loneliness_assessments (id, user_id, responses, score, category, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            a.id,
            a.user_id.as_str(),
            responses,
            a.score,
            a.category.as_str(),
            format_ts(&a.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    debug!(user_id = %a.user_id, score = a.score, "loneliness assessment stored");
    Ok(())
}

/// Newest loneliness assessment. Same-instant ties go to the later insert.
pub fn latest_loneliness(
    conn: &Connection,
    user_id: &UserId,
) -> BuddyResult<Option<LonelinessAssessment>> {
    let row = conn
        .query_row(
            "SELECT id, user_id, responses, score, category, created_at
             FROM loneliness_assessments
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC
             LIMIT 1",
            params![user_id.as_str()],
            |row| {
                Ok(LonelinessRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    responses: row.get(2)?,
                    score: row.get(3)?,
                    category: row.get(4)?,
                    created_at: row.get(5)?,
                })
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(LonelinessRow::into_assessment).transpose()
}

pub fn insert_leisure(conn: &Connection, a: &LeisureAssessment) -> BuddyResult<()> {
    conn.execute(
        "INSERT INTO leisure_assessments
             (id, user_id, responses, weights, top_categories, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            a.id,
            a.user_id.as_str(),
            serde_json::to_string(&a.responses)?,
            serde_json::to_string(&a.weights)?,
            serde_json::to_string(&a.top_categories)?,
            format_ts(&a.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    debug!(user_id = %a.user_id, top = ?a.top_categories, "leisure assessment stored");
    Ok(())
}

pub fn latest_leisure(
    conn: &Connection,
    user_id: &UserId,
) -> BuddyResult<Option<LeisureAssessment>> {
    let row = conn
        .query_row(
            "SELECT id, user_id, responses, weights, top_categories, created_at
             FROM leisure_assessments
             WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC
             LIMIT 1",
            params![user_id.as_str()],
            |row| {
                Ok(LeisureRow {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    responses: row.get(2)?,
                    weights: row.get(3)?,
                    top_categories: row.get(4)?,
                    created_at: row.get(5)?,
                })
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(LeisureRow::into_assessment).transpose()
}

/// Users with at least one assessment of either kind, ordered by their first
/// assessment so candidate pools are stable between calls.
pub fn list_assessed_users(conn: &Connection, limit: usize) -> BuddyResult<Vec<UserId>> {
    let mut stmt = conn
        .prepare(
            "SELECT user_id FROM (
                 SELECT user_id, MIN(created_at) AS first_at FROM (
                     SELECT user_id, created_at FROM loneliness_assessments
                     UNION ALL
                     SELECT user_id, created_at FROM leisure_assessments
                 )
                 GROUP BY user_id
             )
             ORDER BY first_at ASC, user_id ASC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let users = stmt
        .query_map(params![limit as i64], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    debug!(count = users.len(), limit, "listed assessed users");
    Ok(users.into_iter().map(UserId).collect())
}

/// Whether the user has at least one of each assessment.
pub fn has_both_assessments(conn: &Connection, user_id: &UserId) -> BuddyResult<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM loneliness_assessments WHERE user_id = ?1)
            AND EXISTS (SELECT 1 FROM leisure_assessments WHERE user_id = ?1)",
        params![user_id.as_str()],
        |row| row.get::<_, bool>(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}
