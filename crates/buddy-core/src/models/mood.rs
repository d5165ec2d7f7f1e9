use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::{MOOD_MAX, MOOD_MIN};
use crate::errors::{BuddyError, BuddyResult};
use crate::models::UserId;

/// A single mood check-in on a 1–5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MoodEntry {
    pub id: String,
    pub user_id: UserId,
    pub mood: u8,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(user_id: UserId, mood: u8, note: Option<String>) -> BuddyResult<Self> {
        if !(MOOD_MIN..=MOOD_MAX).contains(&mood) {
            return Err(BuddyError::ValidationError(format!(
                "mood {mood} outside {MOOD_MIN}..={MOOD_MAX}"
            )));
        }
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            mood,
            note,
            created_at: Utc::now(),
        })
    }
}
