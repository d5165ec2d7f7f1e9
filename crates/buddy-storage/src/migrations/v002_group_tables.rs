//! v002: buddy groups, memberships, and the triggers that keep them consistent.
//!
//! The triggers are the last line of defence for group invariants: a member
//! row can never push a group past its capacity, land in a closed group, or
//! give a user a second active group. Matching criteria are write-once.

use rusqlite::Connection;

use buddy_core::errors::BuddyResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> BuddyResult<()> {
    tracing::info!("v002: creating group and membership tables");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS buddy_groups (
            group_id          TEXT PRIMARY KEY,
            name              TEXT NOT NULL,
            created_by        TEXT NOT NULL,
            criteria_category TEXT NOT NULL,
            criteria_leisure  TEXT NOT NULL DEFAULT '[]',
            status            TEXT NOT NULL DEFAULT 'active'
                              CHECK (status IN ('active', 'closed')),
            capacity          INTEGER NOT NULL CHECK (capacity > 0),
            created_at        TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_groups_open
            ON buddy_groups(status, criteria_category, created_at);

        CREATE TABLE IF NOT EXISTS group_members (
            group_id  TEXT NOT NULL,
            user_id   TEXT NOT NULL,
            role      TEXT NOT NULL CHECK (role IN ('creator', 'member')),
            joined_at TEXT NOT NULL,
            PRIMARY KEY (group_id, user_id),
            FOREIGN KEY (group_id) REFERENCES buddy_groups(group_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_members_user ON group_members(user_id);

        CREATE TRIGGER IF NOT EXISTS trg_group_active
        BEFORE INSERT ON group_members
        WHEN (SELECT status FROM buddy_groups WHERE group_id = NEW.group_id) <> 'active'
        BEGIN
            SELECT RAISE(ABORT, 'group_closed');
        END;

        CREATE TRIGGER IF NOT EXISTS trg_group_capacity
        BEFORE INSERT ON group_members
        WHEN (SELECT COUNT(*) FROM group_members WHERE group_id = NEW.group_id)
             >= (SELECT capacity FROM buddy_groups WHERE group_id = NEW.group_id)
        BEGIN
            SELECT RAISE(ABORT, 'group_full');
        END;

        CREATE TRIGGER IF NOT EXISTS trg_single_active_membership
        BEFORE INSERT ON group_members
        WHEN EXISTS (
            SELECT 1 FROM group_members m
            JOIN buddy_groups g ON g.group_id = m.group_id
            WHERE m.user_id = NEW.user_id AND g.status = 'active'
        )
        BEGIN
            SELECT RAISE(ABORT, 'already_grouped');
        END;

        CREATE TRIGGER IF NOT EXISTS trg_criteria_immutable
        BEFORE UPDATE OF criteria_category, criteria_leisure, created_by ON buddy_groups
        BEGIN
            SELECT RAISE(ABORT, 'criteria_immutable');
        END;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}
