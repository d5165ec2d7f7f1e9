//! StorageEngine: owns the ConnectionPool and implements the assessment,
//! group, and onboarding collaborator traits.

use std::path::Path;

use tracing::instrument;

use buddy_core::config::StorageConfig;
use buddy_core::errors::BuddyResult;
use buddy_core::models::{
    BuddyGroup, GroupId, GroupMembership, LeisureAssessment, LonelinessAssessment,
    LonelinessCategory, MoodEntry, NewGroup, UserId,
};
use buddy_core::traits::{IAssessmentStore, IGroupStore, IOnboardingGate};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{assessment_ops, group_ops, membership_ops, mood_ops};

/// SQLite-backed store for everything the matching engine persists.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine with default pool settings.
    pub fn open(path: &Path) -> BuddyResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    pub fn open_with_config(path: &Path, config: &StorageConfig) -> BuddyResult<Self> {
        let pool = ConnectionPool::open(path, config.read_pool_size, config.busy_timeout_ms)?;
        let engine = Self { pool };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory engine (for tests and embedding).
    pub fn open_in_memory() -> BuddyResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> BuddyResult<()> {
        self.pool.writer.with_conn(|conn| {
            let applied = migrations::run_migrations(conn)?;
            if applied > 0 {
                tracing::info!(applied, "storage migrations applied");
            }
            Ok(())
        })
    }

    /// The underlying pool, for maintenance and tests.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn with_reader<F, T>(&self, f: F) -> BuddyResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> BuddyResult<T>,
    {
        self.pool.with_reader(f)
    }
}

impl IAssessmentStore for StorageEngine {
    fn latest_loneliness(&self, user_id: &UserId) -> BuddyResult<Option<LonelinessAssessment>> {
        self.with_reader(|conn| assessment_ops::latest_loneliness(conn, user_id))
    }

    fn latest_leisure(&self, user_id: &UserId) -> BuddyResult<Option<LeisureAssessment>> {
        self.with_reader(|conn| assessment_ops::latest_leisure(conn, user_id))
    }

    fn recent_moods(&self, user_id: &UserId, limit: usize) -> BuddyResult<Vec<MoodEntry>> {
        self.with_reader(|conn| mood_ops::recent_moods(conn, user_id, limit))
    }

    fn list_assessed_users(&self, limit: usize) -> BuddyResult<Vec<UserId>> {
        self.with_reader(|conn| assessment_ops::list_assessed_users(conn, limit))
    }

    fn record_loneliness(&self, assessment: &LonelinessAssessment) -> BuddyResult<()> {
        self.pool
            .writer
            .with_conn(|conn| assessment_ops::insert_loneliness(conn, assessment))
    }

    fn record_leisure(&self, assessment: &LeisureAssessment) -> BuddyResult<()> {
        self.pool
            .writer
            .with_conn(|conn| assessment_ops::insert_leisure(conn, assessment))
    }

    fn record_mood(&self, entry: &MoodEntry) -> BuddyResult<()> {
        self.pool
            .writer
            .with_conn(|conn| mood_ops::insert_mood(conn, entry))
    }
}

impl IGroupStore for StorageEngine {
    fn active_membership(&self, user_id: &UserId) -> BuddyResult<Option<GroupMembership>> {
        self.with_reader(|conn| membership_ops::active_membership(conn, user_id))
    }

    fn get_group(&self, group_id: &GroupId) -> BuddyResult<Option<BuddyGroup>> {
        self.with_reader(|conn| group_ops::get_group(conn, group_id))
    }

    fn eligible_groups(&self, category: LonelinessCategory) -> BuddyResult<Vec<BuddyGroup>> {
        self.with_reader(|conn| group_ops::eligible_groups(conn, category))
    }

    fn group_members(&self, group_id: &GroupId) -> BuddyResult<Vec<GroupMembership>> {
        self.with_reader(|conn| membership_ops::list_members(conn, group_id))
    }

    #[instrument(skip_all, fields(group_id = %group_id, user_id = %user_id))]
    fn join_group(&self, group_id: &GroupId, user_id: &UserId) -> BuddyResult<GroupMembership> {
        self.pool
            .writer
            .with_conn(|conn| membership_ops::join_group(conn, group_id, user_id))
    }

    #[instrument(skip_all, fields(group_id = %group.group_id))]
    fn create_group_with_creator(
        &self,
        group: &NewGroup,
    ) -> BuddyResult<(BuddyGroup, GroupMembership)> {
        self.pool
            .writer
            .with_conn(|conn| group_ops::create_group_with_creator(conn, group))
    }

    fn close_group(&self, group_id: &GroupId) -> BuddyResult<()> {
        self.pool
            .writer
            .with_conn(|conn| group_ops::close_group(conn, group_id))
    }
}

impl IOnboardingGate for StorageEngine {
    fn has_completed_onboarding(&self, user_id: &UserId) -> BuddyResult<bool> {
        self.with_reader(|conn| assessment_ops::has_both_assessments(conn, user_id))
    }
}
