//! Raw SQL operations, one module per table family.

pub mod assessment_ops;
pub mod group_ops;
pub mod membership_ops;
pub mod mood_ops;

use buddy_core::errors::{BuddyError, StorageError};
use buddy_core::models::{GroupId, UserId};

use crate::to_storage_err;

/// Translate a trigger abort on `group_members` into its typed storage error.
pub(crate) fn map_membership_err(
    err: rusqlite::Error,
    group_id: &GroupId,
    user_id: &UserId,
) -> BuddyError {
    if let rusqlite::Error::SqliteFailure(_, Some(message)) = &err {
        let typed = match message.as_str() {
            "group_full" => Some(StorageError::GroupFull {
                group_id: group_id.to_string(),
            }),
            "group_closed" => Some(StorageError::GroupClosed {
                group_id: group_id.to_string(),
            }),
            "already_grouped" => Some(StorageError::AlreadyGrouped {
                user_id: user_id.to_string(),
            }),
            _ => None,
        };
        if let Some(typed) = typed {
            return BuddyError::PersistenceUnavailable(typed);
        }
    }
    to_storage_err(err.to_string())
}
