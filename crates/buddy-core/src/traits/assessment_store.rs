use crate::errors::BuddyResult;
use crate::models::{LeisureAssessment, LonelinessAssessment, MoodEntry, UserId};

/// Read/write access to survey results and mood entries.
pub trait IAssessmentStore: Send + Sync {
    // --- Reads ---
    /// Most recent loneliness assessment by creation time.
    fn latest_loneliness(&self, user_id: &UserId) -> BuddyResult<Option<LonelinessAssessment>>;
    /// Most recent leisure assessment by creation time.
    fn latest_leisure(&self, user_id: &UserId) -> BuddyResult<Option<LeisureAssessment>>;
    /// Up to `limit` mood entries, newest first.
    fn recent_moods(&self, user_id: &UserId, limit: usize) -> BuddyResult<Vec<MoodEntry>>;
    /// Users with at least one assessment of either kind, oldest first.
    fn list_assessed_users(&self, limit: usize) -> BuddyResult<Vec<UserId>>;

    // --- Writes ---
    fn record_loneliness(&self, assessment: &LonelinessAssessment) -> BuddyResult<()>;
    fn record_leisure(&self, assessment: &LeisureAssessment) -> BuddyResult<()>;
    fn record_mood(&self, entry: &MoodEntry) -> BuddyResult<()>;
}
