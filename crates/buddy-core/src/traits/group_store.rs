use crate::errors::BuddyResult;
use crate::models::{
    BuddyGroup, GroupId, GroupMembership, LonelinessCategory, NewGroup, UserId,
};

/// Persistence of buddy groups and memberships.
///
/// `join_group` and `create_group_with_creator` must be atomic with respect to
/// the group's member count: a join never leaves a group above its capacity,
/// and a user never ends up in two active groups.
pub trait IGroupStore: Send + Sync {
    /// The user's membership in an active group, if any.
    fn active_membership(&self, user_id: &UserId) -> BuddyResult<Option<GroupMembership>>;

    fn get_group(&self, group_id: &GroupId) -> BuddyResult<Option<BuddyGroup>>;

    /// Active groups for `category` with spare capacity, oldest first.
    fn eligible_groups(&self, category: LonelinessCategory) -> BuddyResult<Vec<BuddyGroup>>;

    /// Members of a group in join order.
    fn group_members(&self, group_id: &GroupId) -> BuddyResult<Vec<GroupMembership>>;

    /// Insert a `member` row. Fails with `CapacityRace` when the group is full
    /// at write time.
    fn join_group(&self, group_id: &GroupId, user_id: &UserId) -> BuddyResult<GroupMembership>;

    /// Insert an active group and its `creator` row in one unit.
    fn create_group_with_creator(
        &self,
        group: &NewGroup,
    ) -> BuddyResult<(BuddyGroup, GroupMembership)>;

    /// Mark a group closed. Closing is an external/manual action.
    fn close_group(&self, group_id: &GroupId) -> BuddyResult<()>;
}
