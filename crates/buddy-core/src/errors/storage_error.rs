/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    /// The capacity trigger rejected a membership insert.
    #[error("group {group_id} is full")]
    GroupFull { group_id: String },

    /// The single-active-membership trigger rejected a membership insert.
    #[error("user {user_id} already belongs to an active group")]
    AlreadyGrouped { user_id: String },

    #[error("group {group_id} is not accepting members")]
    GroupClosed { group_id: String },

    #[error("connection lock poisoned: {details}")]
    LockPoisoned { details: String },
}
