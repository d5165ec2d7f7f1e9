//! Discovery ranking: candidates and similar users for a requester.
//!
//! Both operations score the requester against a pool of assessed users and
//! return a stable descending-score list. Ties keep pool order, which is the
//! order users first completed an assessment.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use buddy_core::config::DiscoveryConfig;
use buddy_core::errors::BuddyResult;
use buddy_core::models::{RankedProfile, UserId, UserProfile};
use buddy_core::traits::{IAssessmentStore, IGroupStore};
use buddy_observability::tracing_setup::events;

use crate::profile::ProfileBuilder;
use crate::scoring::CompatibilityScorer;

pub struct Discovery<'a, S: ?Sized> {
    store: &'a S,
    scorer: &'a CompatibilityScorer,
    config: &'a DiscoveryConfig,
}

impl<'a, S> Discovery<'a, S>
where
    S: IAssessmentStore + IGroupStore + ?Sized,
{
    pub fn new(store: &'a S, scorer: &'a CompatibilityScorer, config: &'a DiscoveryConfig) -> Self {
        Self {
            store,
            scorer,
            config,
        }
    }

    /// Every assessed user other than the requester, best match first.
    pub fn candidates(&self, user_id: &UserId) -> BuddyResult<Vec<RankedProfile>> {
        let builder = self.builder();
        let requester = builder.build(user_id)?;
        let pool = self.pool(user_id, &HashSet::new())?;
        let pool_size = pool.len();

        let mut ranked = rank(self.scorer, &requester, builder.build_many(&pool));
        ranked.truncate(self.config.max_candidates);
        events::discovery_served("candidates", user_id.as_str(), ranked.len(), pool_size);
        Ok(ranked)
    }

    /// Like [`Self::candidates`], minus the requester's current group members
    /// and anyone below `similar_min_score`.
    pub fn similar_users(&self, user_id: &UserId) -> BuddyResult<Vec<RankedProfile>> {
        let builder = self.builder();
        let requester = builder.build(user_id)?;

        let mut excluded = HashSet::new();
        if let Some(membership) = self.store.active_membership(user_id)? {
            for member in self.store.group_members(&membership.group_id)? {
                excluded.insert(member.user_id);
            }
        }
        let pool = self.pool(user_id, &excluded)?;
        let pool_size = pool.len();

        let mut ranked: Vec<RankedProfile> = rank(self.scorer, &requester, builder.build_many(&pool))
            .into_iter()
            .filter(|r| r.score >= self.config.similar_min_score)
            .collect();
        ranked.truncate(self.config.max_similar_users);
        events::discovery_served("similar", user_id.as_str(), ranked.len(), pool_size);
        Ok(ranked)
    }

    fn builder(&self) -> ProfileBuilder<'a, S> {
        ProfileBuilder::new(self.store, self.config.mood_window)
    }

    fn pool(&self, requester: &UserId, excluded: &HashSet<UserId>) -> BuddyResult<Vec<UserId>> {
        let limit = self.config.candidate_pool_limit.saturating_add(1);
        let pool: Vec<UserId> = self
            .store
            .list_assessed_users(limit)?
            .into_iter()
            .filter(|u| u != requester && !excluded.contains(u))
            .take(self.config.candidate_pool_limit)
            .collect();
        debug!(requester = %requester, pool = pool.len(), excluded = excluded.len(), "discovery pool");
        Ok(pool)
    }
}

/// Score every profile against the requester and sort best first.
/// The sort is stable, so equal scores keep pool order.
pub fn rank(
    scorer: &CompatibilityScorer,
    requester: &UserProfile,
    pool: Vec<UserProfile>,
) -> Vec<RankedProfile> {
    let mut ranked: Vec<RankedProfile> = pool
        .into_par_iter()
        .map(|profile| RankedProfile {
            score: scorer.score(requester, &profile),
            profile,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::models::{LeisureCategory::*, LonelinessCategory};

    fn profile(id: &str, category: LonelinessCategory, top: Vec<buddy_core::models::LeisureCategory>) -> UserProfile {
        let mut p = UserProfile::neutral(UserId::from(id));
        p.loneliness_category = category;
        p.assessments.loneliness = true;
        p.assessments.leisure = true;
        p.top_leisure_categories = top;
        p
    }

    #[test]
    fn rank_sorts_descending_and_keeps_tie_order() {
        let scorer = CompatibilityScorer::default();
        let me = profile("me", LonelinessCategory::Low, vec![A, B, C]);
        let pool = vec![
            profile("tie-1", LonelinessCategory::Moderate, vec![A, B, C]),
            profile("best", LonelinessCategory::Low, vec![A, B, C]),
            profile("tie-2", LonelinessCategory::Moderate, vec![A, B, C]),
            profile("worst", LonelinessCategory::High, vec![E, F, G]),
        ];
        let ids: Vec<String> = rank(&scorer, &me, pool)
            .into_iter()
            .map(|r| r.profile.user_id.0)
            .collect();
        assert_eq!(ids, vec!["best", "tie-1", "tie-2", "worst"]);
    }
}
