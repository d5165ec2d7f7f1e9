//! MatchingEngine: the consumer-facing facade.
//!
//! Owns the store, the configuration, the scorer, and the observability
//! state. Discovery is advisory: its failures are recorded and degrade to an
//! empty list. Allocation is gating: its failures are returned.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{instrument, warn};

use buddy_core::config::BuddyConfig;
use buddy_core::errors::{BuddyError, BuddyResult};
use buddy_core::models::{
    AllocationOutcome, DegradationEvent, GroupId, GroupMembership, LeisureAssessment,
    LeisureCategory, LonelinessAssessment, MoodEntry, RankedProfile, UserId, UserProfile,
};
use buddy_core::traits::{IIdentityProvider, MatchingStore};
use buddy_observability::ObservabilityEngine;
use buddy_storage::StorageEngine;

use crate::allocator::GroupAllocator;
use crate::discovery::Discovery;
use crate::profile::ProfileBuilder;
use crate::scoring::CompatibilityScorer;

const DISCOVERY_COMPONENT: &str = "discovery";
const DISCOVERY_FALLBACK: &str = "empty_list";

pub struct MatchingEngine {
    store: Arc<dyn MatchingStore>,
    config: BuddyConfig,
    scorer: CompatibilityScorer,
    observability: Mutex<ObservabilityEngine>,
}

impl MatchingEngine {
    /// Wrap `store`. Fails with `ConfigError` when `config` does not validate.
    pub fn new(store: Arc<dyn MatchingStore>, config: BuddyConfig) -> BuddyResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            scorer: CompatibilityScorer::new(config.scoring.clone()),
            config,
            observability: Mutex::new(ObservabilityEngine::new()),
        })
    }

    /// Open the SQLite store named by `config.storage` and wrap it.
    pub fn open(config: BuddyConfig) -> BuddyResult<Self> {
        config.validate()?;
        let store = StorageEngine::open_with_config(
            Path::new(&config.storage.db_path),
            &config.storage,
        )?;
        Self::new(Arc::new(store), config)
    }

    /// In-memory store with default configuration.
    pub fn open_in_memory() -> BuddyResult<Self> {
        Self::new(
            Arc::new(StorageEngine::open_in_memory()?),
            BuddyConfig::default(),
        )
    }

    pub fn store(&self) -> &dyn MatchingStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &BuddyConfig {
        &self.config
    }

    pub fn scorer(&self) -> &CompatibilityScorer {
        &self.scorer
    }

    // --- Intake ---

    /// Score and store a loneliness survey.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub fn record_loneliness(
        &self,
        user_id: &UserId,
        responses: Vec<u8>,
    ) -> BuddyResult<LonelinessAssessment> {
        let assessment = LonelinessAssessment::from_responses(user_id.clone(), responses)?;
        self.store.record_loneliness(&assessment)?;
        Ok(assessment)
    }

    /// Tally and store a leisure survey.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub fn record_leisure(
        &self,
        user_id: &UserId,
        answers: Vec<LeisureCategory>,
    ) -> BuddyResult<LeisureAssessment> {
        let assessment = LeisureAssessment::from_responses(user_id.clone(), answers)?;
        self.store.record_leisure(&assessment)?;
        Ok(assessment)
    }

    #[instrument(skip_all, fields(user_id = %user_id, mood = mood))]
    pub fn record_mood(
        &self,
        user_id: &UserId,
        mood: u8,
        note: Option<String>,
    ) -> BuddyResult<MoodEntry> {
        let entry = MoodEntry::new(user_id.clone(), mood, note)?;
        self.store.record_mood(&entry)?;
        Ok(entry)
    }

    // --- Profiles and scoring ---

    #[instrument(skip_all, fields(user_id = %user_id))]
    pub fn build_profile(&self, user_id: &UserId) -> BuddyResult<UserProfile> {
        ProfileBuilder::new(self.store.as_ref(), self.config.discovery.mood_window).build(user_id)
    }

    pub fn score(&self, a: &UserProfile, b: &UserProfile) -> f64 {
        self.scorer.score(a, b)
    }

    // --- Discovery ---

    /// Ranked candidates for `user_id`. Errors degrade to an empty list.
    pub fn get_candidates(&self, user_id: &UserId) -> Vec<RankedProfile> {
        let _span = buddy_observability::discovery_span!("candidates", user_id).entered();
        let result = self.discovery().candidates(user_id);
        self.settle_discovery(result, |obs, scores| {
            obs.metrics.discovery.record_candidates(scores)
        })
    }

    /// Ranked similar users outside the requester's group. Errors degrade to
    /// an empty list.
    pub fn get_similar_users(&self, user_id: &UserId) -> Vec<RankedProfile> {
        let _span = buddy_observability::discovery_span!("similar", user_id).entered();
        let result = self.discovery().similar_users(user_id);
        self.settle_discovery(result, |obs, scores| {
            obs.metrics.discovery.record_similar(scores)
        })
    }

    // --- Allocation ---

    pub fn find_or_create_group(&self, user_id: &UserId) -> BuddyResult<AllocationOutcome> {
        let _span = buddy_observability::allocation_span!(user_id).entered();
        let allocator = GroupAllocator::new(
            self.store.as_ref(),
            &self.scorer,
            &self.config.allocation,
            self.config.discovery.mood_window,
        );
        let result = allocator.allocate(user_id);

        let mut obs = self.observability();
        match result {
            Ok(report) => {
                obs.metrics
                    .allocation
                    .record_transition(report.outcome.transition);
                obs.metrics
                    .allocation
                    .record_capacity_races(report.capacity_races);
                if report.reached_minimum {
                    obs.metrics.allocation.record_group_completed();
                }
                Ok(report.outcome)
            }
            Err(e) => {
                match &e {
                    BuddyError::OnboardingIncomplete { .. } => {
                        obs.metrics.allocation.record_onboarding_refused()
                    }
                    _ => {
                        warn!(error = %e, retryable = e.is_retryable(), "allocation failed");
                        obs.metrics.allocation.record_failure();
                    }
                }
                Err(e)
            }
        }
    }

    pub fn group_members(&self, group_id: &GroupId) -> BuddyResult<Vec<GroupMembership>> {
        self.store.group_members(group_id)
    }

    /// Close a group. This is the only way a group stops accepting members.
    pub fn close_group(&self, group_id: &GroupId) -> BuddyResult<()> {
        self.store.close_group(group_id)
    }

    // --- Caller-resolved variants ---

    pub fn get_candidates_for_caller(
        &self,
        identity: &dyn IIdentityProvider,
    ) -> BuddyResult<Vec<RankedProfile>> {
        let user_id = caller(identity)?;
        Ok(self.get_candidates(&user_id))
    }

    pub fn get_similar_users_for_caller(
        &self,
        identity: &dyn IIdentityProvider,
    ) -> BuddyResult<Vec<RankedProfile>> {
        let user_id = caller(identity)?;
        Ok(self.get_similar_users(&user_id))
    }

    pub fn find_or_create_group_for_caller(
        &self,
        identity: &dyn IIdentityProvider,
    ) -> BuddyResult<AllocationOutcome> {
        let user_id = caller(identity)?;
        self.find_or_create_group(&user_id)
    }

    // --- Observability ---

    /// Metrics and degradation state as JSON.
    pub fn metrics_snapshot(&self) -> BuddyResult<serde_json::Value> {
        self.observability().metrics_snapshot()
    }

    fn discovery(&self) -> Discovery<'_, dyn MatchingStore> {
        Discovery::new(self.store.as_ref(), &self.scorer, &self.config.discovery)
    }

    fn settle_discovery(
        &self,
        result: BuddyResult<Vec<RankedProfile>>,
        record: impl FnOnce(&mut ObservabilityEngine, &[f64]),
    ) -> Vec<RankedProfile> {
        let mut obs = self.observability();
        match result {
            Ok(ranked) => {
                let scores: Vec<f64> = ranked.iter().map(|r| r.score).collect();
                record(&mut *obs, scores.as_slice());
                obs.mark_recovered(DISCOVERY_COMPONENT);
                ranked
            }
            Err(e) => {
                obs.record_degradation(DegradationEvent::now(
                    DISCOVERY_COMPONENT,
                    e.to_string(),
                    DISCOVERY_FALLBACK,
                ));
                Vec::new()
            }
        }
    }

    fn observability(&self) -> MutexGuard<'_, ObservabilityEngine> {
        // Metrics stay usable even if a panicking thread held the lock.
        self.observability
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn caller(identity: &dyn IIdentityProvider) -> BuddyResult<UserId> {
    identity.current_user().ok_or(BuddyError::NotAuthenticated)
}
