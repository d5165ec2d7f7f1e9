//! ProfileVector builder: turns raw assessment records into a [`UserProfile`].
//!
//! Building never fails for missing data. A user with no loneliness survey is
//! treated as `Moderate` with score 15, a user with no leisure survey has no
//! weights and no top categories, and a user with no moods averages 3.0.
//! [`AssessmentPresence`] records which values were real.

use rayon::prelude::*;
use tracing::{debug, warn};

use buddy_core::constants::DEFAULT_MOOD_AVERAGE;
use buddy_core::errors::BuddyResult;
use buddy_core::models::{
    AssessmentPresence, LeisureAssessment, LonelinessAssessment, MoodEntry, UserId, UserProfile,
};
use buddy_core::traits::IAssessmentStore;

/// Reads a user's latest records through the assessment store.
pub struct ProfileBuilder<'a, S: ?Sized> {
    store: &'a S,
    mood_window: usize,
}

impl<'a, S: IAssessmentStore + ?Sized> ProfileBuilder<'a, S> {
    pub fn new(store: &'a S, mood_window: usize) -> Self {
        Self { store, mood_window }
    }

    /// Build one profile. Only store failures are errors.
    pub fn build(&self, user_id: &UserId) -> BuddyResult<UserProfile> {
        let _span = buddy_observability::profile_span!(user_id).entered();
        let loneliness = self.store.latest_loneliness(user_id)?;
        let leisure = self.store.latest_leisure(user_id)?;
        let moods = self.store.recent_moods(user_id, self.mood_window)?;
        let profile = from_records(user_id.clone(), loneliness.as_ref(), leisure.as_ref(), &moods);
        debug!(
            category = %profile.loneliness_category,
            top = ?profile.top_leisure_categories,
            mood = profile.recent_mood_average,
            "profile built"
        );
        Ok(profile)
    }

    /// Build a pool of profiles in input order. Users whose reads fail are
    /// skipped and logged.
    pub fn build_many(&self, user_ids: &[UserId]) -> Vec<UserProfile> {
        user_ids
            .par_iter()
            .filter_map(|user_id| match self.build(user_id) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    warn!(user_id = %user_id, error = %e, "skipping profile");
                    None
                }
            })
            .collect()
    }
}

/// Pure core of [`ProfileBuilder::build`].
///
/// `moods` are expected newest first and already limited to the mood window.
pub fn from_records(
    user_id: UserId,
    loneliness: Option<&LonelinessAssessment>,
    leisure: Option<&LeisureAssessment>,
    moods: &[MoodEntry],
) -> UserProfile {
    let mut profile = UserProfile::neutral(user_id);
    profile.assessments = AssessmentPresence {
        loneliness: loneliness.is_some(),
        leisure: leisure.is_some(),
    };

    if let Some(l) = loneliness {
        profile.loneliness_category = l.category;
        profile.loneliness_score = l.score;
    }
    if let Some(l) = leisure {
        profile.leisure_category_weights = l.weights.clone();
        profile.top_leisure_categories = l.top_categories.clone();
    }
    profile.recent_mood_average = mood_average(moods);
    profile
}

/// Mean mood, 3.0 when there are no entries.
pub fn mood_average(moods: &[MoodEntry]) -> f64 {
    if moods.is_empty() {
        return DEFAULT_MOOD_AVERAGE;
    }
    let sum: u32 = moods.iter().map(|m| u32::from(m.mood)).sum();
    f64::from(sum) / moods.len() as f64
}
