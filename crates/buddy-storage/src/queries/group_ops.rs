//! Buddy group rows: creation, lookup, eligibility, and closing.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use tracing::{debug, info, warn};

use buddy_core::errors::{BuddyError, BuddyResult};
use buddy_core::models::{
    BuddyGroup, GroupId, GroupMembership, GroupStatus, LonelinessCategory, MatchingCriteria,
    MemberRole, NewGroup,
};

use super::membership_ops;
use crate::{format_ts, parse_ts, to_storage_err};

const GROUP_COLUMNS: &str = "g.group_id, g.name, g.created_by, g.criteria_category,
    g.criteria_leisure, g.status, g.capacity, g.created_at,
    (SELECT COUNT(*) FROM group_members m WHERE m.group_id = g.group_id) AS member_count";

/// Raw group row before enum and JSON decoding.
struct GroupRow {
    group_id: String,
    name: String,
    created_by: String,
    criteria_category: String,
    criteria_leisure: String,
    status: String,
    capacity: u32,
    created_at: String,
    member_count: u32,
}

impl GroupRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            group_id: row.get(0)?,
            name: row.get(1)?,
            created_by: row.get(2)?,
            criteria_category: row.get(3)?,
            criteria_leisure: row.get(4)?,
            status: row.get(5)?,
            capacity: row.get(6)?,
            created_at: row.get(7)?,
            member_count: row.get(8)?,
        })
    }

    fn into_group(self) -> BuddyResult<BuddyGroup> {
        Ok(BuddyGroup {
            group_id: GroupId(self.group_id),
            name: self.name,
            created_by: self.created_by.into(),
            matching_criteria: MatchingCriteria {
                loneliness_category: self.criteria_category.parse()?,
                leisure_categories: serde_json::from_str(&self.criteria_leisure)?,
            },
            status: self.status.parse()?,
            capacity: self.capacity,
            member_count: self.member_count,
            created_at: parse_ts(&self.created_at)?,
        })
    }
}

pub fn get_group(conn: &Connection, group_id: &GroupId) -> BuddyResult<Option<BuddyGroup>> {
    let row = conn
        .query_row(
            &format!("SELECT {GROUP_COLUMNS} FROM buddy_groups g WHERE g.group_id = ?1"),
            params![group_id.as_str()],
            GroupRow::from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(GroupRow::into_group).transpose()
}

/// Active groups for a category with at least one free seat, oldest first.
pub fn eligible_groups(
    conn: &Connection,
    category: LonelinessCategory,
) -> BuddyResult<Vec<BuddyGroup>> {
    let sql = format!(
        "SELECT {GROUP_COLUMNS} FROM buddy_groups g
         WHERE g.status = 'active'
           AND g.criteria_category = ?1
           AND (SELECT COUNT(*) FROM group_members m WHERE m.group_id = g.group_id) < g.capacity
         ORDER BY g.created_at ASC, g.rowid ASC"
    );
    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![category.as_str()], GroupRow::from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    debug!(category = %category, count = rows.len(), "eligible groups");
    rows.into_iter().map(GroupRow::into_group).collect()
}

/// Status, capacity, and current member count for the write path.
pub fn capacity_state(
    conn: &Connection,
    group_id: &GroupId,
) -> BuddyResult<Option<(GroupStatus, u32, u32)>> {
    let row = conn
        .query_row(
            "SELECT g.status, g.capacity,
                    (SELECT COUNT(*) FROM group_members m WHERE m.group_id = g.group_id)
             FROM buddy_groups g WHERE g.group_id = ?1",
            params![group_id.as_str()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            },
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(|(status, capacity, count)| -> BuddyResult<_> {
        Ok((status.parse::<GroupStatus>()?, capacity, count))
    })
    .transpose()
}

fn insert_group(conn: &Connection, group: &NewGroup, created_at: &DateTime<Utc>) -> BuddyResult<()> {
    conn.execute(
        "INSERT INTO buddy_groups
             (group_id, name, created_by, criteria_category, criteria_leisure,
              status, capacity, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'active', ?6, ?7)",
        params![
            group.group_id.as_str(),
            group.name,
            group.created_by.as_str(),
            group.matching_criteria.loneliness_category.as_str(),
            serde_json::to_string(&group.matching_criteria.leisure_categories)?,
            group.capacity,
            format_ts(created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Create a group and its creator membership in one immediate transaction.
///
/// Fails with `AlreadyGrouped` if the creator already belongs to an active
/// group; nothing is written in that case.
pub fn create_group_with_creator(
    conn: &Connection,
    group: &NewGroup,
) -> BuddyResult<(BuddyGroup, GroupMembership)> {
    buddy_core::models::validate_capacity(group.capacity)?;
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("create_group begin: {e}")))?;

    match create_group_inner(&tx, group) {
        Ok(created) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("create_group commit: {e}")))?;
            info!(
                group_id = %created.0.group_id,
                creator = %group.created_by,
                category = %group.matching_criteria.loneliness_category,
                "group created"
            );
            Ok(created)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback() {
                warn!(error = %rollback, "create_group rollback failed");
            }
            Err(e)
        }
    }
}

fn create_group_inner(
    conn: &Connection,
    group: &NewGroup,
) -> BuddyResult<(BuddyGroup, GroupMembership)> {
    let now = Utc::now();
    insert_group(conn, group, &now)?;
    let membership = membership_ops::insert_member(
        conn,
        &group.group_id,
        &group.created_by,
        MemberRole::Creator,
        &now,
    )?;
    let created = get_group(conn, &group.group_id)?.ok_or_else(|| BuddyError::GroupNotFound {
        group_id: group.group_id.to_string(),
    })?;
    Ok((created, membership))
}

/// Mark a group closed. Its members become free to join other groups.
pub fn close_group(conn: &Connection, group_id: &GroupId) -> BuddyResult<()> {
    let changed = conn
        .execute(
            "UPDATE buddy_groups SET status = 'closed' WHERE group_id = ?1",
            params![group_id.as_str()],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(BuddyError::GroupNotFound {
            group_id: group_id.to_string(),
        });
    }
    info!(group_id = %group_id, "group closed");
    Ok(())
}
