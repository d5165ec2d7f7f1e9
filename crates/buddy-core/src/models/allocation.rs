use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{BuddyGroup, GroupMembership, UserProfile};

/// Which transition of the allocation state machine a call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AllocationTransition {
    /// The user was already in an active group. Nothing was written.
    AlreadyMember,
    /// The user joined an existing group as a member.
    Joined,
    /// A new group was created with the user as creator.
    Created,
}

impl AllocationTransition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyMember => "already_member",
            Self::Joined => "joined",
            Self::Created => "created",
        }
    }
}

/// Result of `find_or_create_group`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AllocationOutcome {
    pub group: BuddyGroup,
    pub membership: GroupMembership,
    pub transition: AllocationTransition,
}

/// A discovery result: a profile and its compatibility with the requester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedProfile {
    pub profile: UserProfile,
    pub score: f64,
}
