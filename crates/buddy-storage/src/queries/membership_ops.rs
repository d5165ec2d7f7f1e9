//! Group membership rows and the atomic join path.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use tracing::{debug, info, warn};

use buddy_core::errors::{BuddyError, BuddyResult, StorageError};
use buddy_core::models::{GroupId, GroupMembership, GroupStatus, MemberRole, UserId};

use super::{group_ops, map_membership_err};
use crate::{format_ts, parse_ts, to_storage_err};

type MembershipTuple = (String, String, String, String);

fn into_membership((group_id, user_id, role, joined_at): MembershipTuple) -> BuddyResult<GroupMembership> {
    Ok(GroupMembership {
        group_id: GroupId(group_id),
        user_id: UserId(user_id),
        role: role.parse()?,
        joined_at: parse_ts(&joined_at)?,
    })
}

fn tuple_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MembershipTuple> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// Insert a member row. Trigger aborts surface as typed storage errors.
pub fn insert_member(
    conn: &Connection,
    group_id: &GroupId,
    user_id: &UserId,
    role: MemberRole,
    joined_at: &DateTime<Utc>,
) -> BuddyResult<GroupMembership> {
    conn.execute(
        "INSERT INTO group_members (group_id, user_id, role, joined_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            group_id.as_str(),
            user_id.as_str(),
            role.as_str(),
            format_ts(joined_at),
        ],
    )
    .map_err(|e| map_membership_err(e, group_id, user_id))?;
    Ok(GroupMembership {
        group_id: group_id.clone(),
        user_id: user_id.clone(),
        role,
        joined_at: *joined_at,
    })
}

/// The user's membership in an active group, if any.
pub fn active_membership(conn: &Connection, user_id: &UserId) -> BuddyResult<Option<GroupMembership>> {
    let row = conn
        .query_row(
            "SELECT m.group_id, m.user_id, m.role, m.joined_at
             FROM group_members m
             JOIN buddy_groups g ON g.group_id = m.group_id
             WHERE m.user_id = ?1 AND g.status = 'active'
             ORDER BY m.joined_at DESC
             LIMIT 1",
            params![user_id.as_str()],
            tuple_from_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(into_membership).transpose()
}

/// Members in join order.
pub fn list_members(conn: &Connection, group_id: &GroupId) -> BuddyResult<Vec<GroupMembership>> {
    let mut stmt = conn
        .prepare(
            "SELECT group_id, user_id, role, joined_at
             FROM group_members
             WHERE group_id = ?1
             ORDER BY joined_at ASC, rowid ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![group_id.as_str()], tuple_from_row)
        .map_err(|e| to_storage_err(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.into_iter().map(into_membership).collect()
}

/// Join a group as `member` inside one immediate transaction.
///
/// The capacity check and the insert happen under the same write lock, so a
/// full group yields `CapacityRace` instead of an over-capacity row.
pub fn join_group(
    conn: &Connection,
    group_id: &GroupId,
    user_id: &UserId,
) -> BuddyResult<GroupMembership> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("join_group begin: {e}")))?;

    match join_group_inner(&tx, group_id, user_id) {
        Ok(membership) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("join_group commit: {e}")))?;
            info!(group_id = %group_id, user_id = %user_id, "joined group");
            Ok(membership)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback() {
                warn!(error = %rollback, "join_group rollback failed");
            }
            debug!(group_id = %group_id, user_id = %user_id, error = %e, "join rejected");
            Err(e)
        }
    }
}

fn join_group_inner(
    conn: &Connection,
    group_id: &GroupId,
    user_id: &UserId,
) -> BuddyResult<GroupMembership> {
    let (status, capacity, count) =
        group_ops::capacity_state(conn, group_id)?.ok_or_else(|| BuddyError::GroupNotFound {
            group_id: group_id.to_string(),
        })?;
    if status == GroupStatus::Closed {
        return Err(BuddyError::PersistenceUnavailable(StorageError::GroupClosed {
            group_id: group_id.to_string(),
        }));
    }
    if count >= capacity {
        return Err(BuddyError::CapacityRace {
            group_id: group_id.to_string(),
        });
    }
    if active_membership(conn, user_id)?.is_some() {
        return Err(BuddyError::PersistenceUnavailable(StorageError::AlreadyGrouped {
            user_id: user_id.to_string(),
        }));
    }

    insert_member(conn, group_id, user_id, MemberRole::Member, &Utc::now()).map_err(|e| match e {
        BuddyError::PersistenceUnavailable(StorageError::GroupFull { group_id }) => {
            BuddyError::CapacityRace { group_id }
        }
        other => other,
    })
}
