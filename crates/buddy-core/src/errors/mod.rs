mod buddy_error;
mod config_error;
mod storage_error;

pub use buddy_error::BuddyError;
pub use config_error::ConfigError;
pub use storage_error::StorageError;

/// Convenience alias used throughout the workspace.
pub type BuddyResult<T> = Result<T, BuddyError>;
