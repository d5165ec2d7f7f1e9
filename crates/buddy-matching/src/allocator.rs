//! Group allocator: place a user into a buddy group.
//!
//! One call takes exactly one transition:
//! - `AlreadyMember`: the user is in an active group; nothing is written.
//! - `Joined`: the user joins the best eligible group as `member`.
//! - `Created`: no eligible group exists; a new group is created with the
//!   user as `creator` and the user's profile as its matching criteria.
//!
//! The capacity check and the membership insert happen atomically in the
//! store. A join that loses the race for the last seat comes back as
//! `CapacityRace`; the allocator retries selection a bounded number of times,
//! skipping groups that already raced, then falls back to creating a group.

use tracing::debug;

use buddy_core::config::AllocationConfig;
use buddy_core::errors::{BuddyError, BuddyResult, StorageError};
use buddy_core::models::{
    AllocationOutcome, AllocationTransition, BuddyGroup, GroupId, GroupMembership, NewGroup,
    UserId, UserProfile,
};
use buddy_core::traits::{IAssessmentStore, IGroupStore, IOnboardingGate};
use buddy_observability::tracing_setup::events;

use crate::profile::ProfileBuilder;
use crate::scoring::CompatibilityScorer;

/// An allocation outcome plus how many joins lost a capacity race on the way.
#[derive(Debug, Clone)]
pub struct AllocationReport {
    pub outcome: AllocationOutcome,
    pub capacity_races: u32,
    /// This placement brought the group up to `group_minimum` members.
    pub reached_minimum: bool,
}

pub struct GroupAllocator<'a, S: ?Sized> {
    store: &'a S,
    scorer: &'a CompatibilityScorer,
    config: &'a AllocationConfig,
    mood_window: usize,
}

impl<'a, S> GroupAllocator<'a, S>
where
    S: IAssessmentStore + IGroupStore + IOnboardingGate + ?Sized,
{
    pub fn new(
        store: &'a S,
        scorer: &'a CompatibilityScorer,
        config: &'a AllocationConfig,
        mood_window: usize,
    ) -> Self {
        Self {
            store,
            scorer,
            config,
            mood_window,
        }
    }

    pub fn find_or_create_group(&self, user_id: &UserId) -> BuddyResult<AllocationOutcome> {
        self.allocate(user_id).map(|report| report.outcome)
    }

    /// Run the allocation state machine for one user.
    pub fn allocate(&self, user_id: &UserId) -> BuddyResult<AllocationReport> {
        if let Some(membership) = self.store.active_membership(user_id)? {
            return self.already_member(membership, 0);
        }

        let builder = ProfileBuilder::new(self.store, self.mood_window);
        let profile = builder.build(user_id)?;
        if !self.store.has_completed_onboarding(user_id)? {
            let mut missing = profile.assessments.missing();
            if missing.is_empty() {
                missing.push("onboarding".to_string());
            }
            events::onboarding_refused(user_id.as_str(), &missing);
            return Err(BuddyError::OnboardingIncomplete {
                user_id: user_id.to_string(),
                missing,
            });
        }

        let mut raced: Vec<GroupId> = Vec::new();
        loop {
            let eligible: Vec<BuddyGroup> = self
                .store
                .eligible_groups(profile.loneliness_category)?
                .into_iter()
                .filter(|g| !raced.contains(&g.group_id))
                .collect();
            let Some(target) = self.select_group(&builder, &profile, eligible)? else {
                break;
            };

            match self.store.join_group(&target.group_id, user_id) {
                Ok(membership) => {
                    let group = self.refreshed(&membership.group_id)?;
                    return Ok(self.report(
                        group,
                        membership,
                        AllocationTransition::Joined,
                        raced.len(),
                    ));
                }
                Err(BuddyError::CapacityRace { .. })
                | Err(BuddyError::PersistenceUnavailable(StorageError::GroupClosed { .. })) => {
                    let attempt = raced.len() as u32 + 1;
                    events::capacity_race(user_id.as_str(), target.group_id.as_str(), attempt);
                    raced.push(target.group_id);
                    if attempt > self.config.max_capacity_retries {
                        break;
                    }
                }
                Err(BuddyError::PersistenceUnavailable(StorageError::AlreadyGrouped { .. })) => {
                    return self.grouped_concurrently(user_id, raced.len());
                }
                Err(e) => return Err(e),
            }
        }

        let new_group = NewGroup::for_creator(&profile, self.config.group_capacity);
        match self.store.create_group_with_creator(&new_group) {
            Ok((group, membership)) => Ok(self.report(
                group,
                membership,
                AllocationTransition::Created,
                raced.len(),
            )),
            Err(BuddyError::PersistenceUnavailable(StorageError::AlreadyGrouped { .. })) => {
                self.grouped_concurrently(user_id, raced.len())
            }
            Err(e) => Err(e),
        }
    }

    /// Pick the group to join: the first eligible group, or with ranking on,
    /// the group whose members score highest on average. Ties go to the
    /// earlier group.
    fn select_group(
        &self,
        builder: &ProfileBuilder<'a, S>,
        profile: &UserProfile,
        eligible: Vec<BuddyGroup>,
    ) -> BuddyResult<Option<BuddyGroup>> {
        if !self.config.rank_eligible_groups || eligible.len() < 2 {
            return Ok(eligible.into_iter().next());
        }

        let mut best: Option<(f64, BuddyGroup)> = None;
        for group in eligible {
            let member_ids: Vec<UserId> = self
                .store
                .group_members(&group.group_id)?
                .into_iter()
                .map(|m| m.user_id)
                .collect();
            let members = builder.build_many(&member_ids);
            let score = self
                .scorer
                .aggregate_group_score(profile, &members)
                .unwrap_or_else(|| self.scorer.min_score());
            debug!(group_id = %group.group_id, score, "eligible group scored");
            if best.as_ref().map_or(true, |(top, _)| score > *top) {
                best = Some((score, group));
            }
        }
        Ok(best.map(|(_, group)| group))
    }

    /// The user was placed by a concurrent call; report that placement.
    fn grouped_concurrently(&self, user_id: &UserId, races: usize) -> BuddyResult<AllocationReport> {
        match self.store.active_membership(user_id)? {
            Some(membership) => self.already_member(membership, races),
            None => Err(BuddyError::PersistenceUnavailable(StorageError::AlreadyGrouped {
                user_id: user_id.to_string(),
            })),
        }
    }

    fn already_member(
        &self,
        membership: GroupMembership,
        races: usize,
    ) -> BuddyResult<AllocationReport> {
        let group = self.refreshed(&membership.group_id)?;
        Ok(self.report(group, membership, AllocationTransition::AlreadyMember, races))
    }

    fn refreshed(&self, group_id: &GroupId) -> BuddyResult<BuddyGroup> {
        self.store
            .get_group(group_id)?
            .ok_or_else(|| BuddyError::GroupNotFound {
                group_id: group_id.to_string(),
            })
    }

    fn report(
        &self,
        group: BuddyGroup,
        membership: GroupMembership,
        transition: AllocationTransition,
        races: usize,
    ) -> AllocationReport {
        events::allocation_completed(
            membership.user_id.as_str(),
            group.group_id.as_str(),
            transition.as_str(),
            group.member_count,
        );
        let minimum = self.config.group_minimum;
        let reached_minimum =
            transition != AllocationTransition::AlreadyMember && group.member_count == minimum;
        debug!(
            group_id = %group.group_id,
            below_minimum = group.below_minimum(minimum),
            reached_minimum,
            "group size after allocation"
        );
        AllocationReport {
            outcome: AllocationOutcome {
                group,
                membership,
                transition,
            },
            capacity_races: races as u32,
            reached_minimum,
        }
    }
}
