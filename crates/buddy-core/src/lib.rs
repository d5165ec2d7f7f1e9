//! # buddy-core
//!
//! Foundation crate for the buddy matching engine.
//! Defines the assessment and group types, survey scoring, collaborator traits,
//! errors, config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::BuddyConfig;
pub use errors::{BuddyError, BuddyResult};
pub use models::{
    AllocationOutcome, AllocationTransition, BuddyGroup, GroupId, GroupMembership, GroupStatus,
    LeisureCategory, LonelinessCategory, MatchingCriteria, MemberRole, UserId, UserProfile,
};
