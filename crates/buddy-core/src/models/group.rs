//! Buddy groups and their memberships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{BuddyError, BuddyResult};
use crate::models::{GroupId, LeisureCategory, LonelinessCategory, UserId, UserProfile};

/// Group lifecycle status. Only active groups accept members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Active,
    Closed,
}

impl GroupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl std::str::FromStr for GroupStatus {
    type Err = BuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "closed" | "inactive" => Ok(Self::Closed),
            other => Err(BuddyError::ValidationError(format!(
                "unknown group status: {other}"
            ))),
        }
    }
}

/// Role of a member inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Creator,
    Member,
}

impl MemberRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Member => "member",
        }
    }
}

impl std::str::FromStr for MemberRole {
    type Err = BuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "creator" => Ok(Self::Creator),
            "member" => Ok(Self::Member),
            other => Err(BuddyError::ValidationError(format!(
                "unknown member role: {other}"
            ))),
        }
    }
}

/// Snapshot of the creator's profile taken when the group is created.
/// Never recomputed as membership changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchingCriteria {
    pub loneliness_category: LonelinessCategory,
    pub leisure_categories: Vec<LeisureCategory>,
}

impl MatchingCriteria {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            loneliness_category: profile.loneliness_category,
            leisure_categories: profile.top_leisure_categories.clone(),
        }
    }
}

/// A capacity-limited buddy group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BuddyGroup {
    pub group_id: GroupId,
    pub name: String,
    pub created_by: UserId,
    pub matching_criteria: MatchingCriteria,
    pub status: GroupStatus,
    pub capacity: u32,
    /// Member count at read time.
    pub member_count: u32,
    pub created_at: DateTime<Utc>,
}

impl BuddyGroup {
    pub fn is_full(&self) -> bool {
        self.member_count >= self.capacity
    }

    pub fn has_capacity(&self) -> bool {
        self.status == GroupStatus::Active && !self.is_full()
    }

    /// Fewer than `minimum` members. Such groups keep recruiting.
    pub fn below_minimum(&self, minimum: u32) -> bool {
        self.member_count < minimum
    }
}

/// A user's membership in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupMembership {
    pub group_id: GroupId,
    pub user_id: UserId,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// Everything needed to insert a new group together with its creator.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub group_id: GroupId,
    pub name: String,
    pub created_by: UserId,
    pub matching_criteria: MatchingCriteria,
    pub capacity: u32,
}

impl NewGroup {
    pub fn for_creator(profile: &UserProfile, capacity: u32) -> Self {
        let group_id = GroupId::new();
        let short: String = group_id.0.chars().take(8).collect();
        Self {
            name: format!("{} buddies {short}", profile.loneliness_category),
            group_id,
            created_by: profile.user_id.clone(),
            matching_criteria: MatchingCriteria::from_profile(profile),
            capacity,
        }
    }
}

/// Reject capacities the store cannot honour.
pub fn validate_capacity(capacity: u32) -> BuddyResult<()> {
    if capacity == 0 {
        return Err(BuddyError::ValidationError(
            "group capacity must be at least 1".to_string(),
        ));
    }
    Ok(())
}
