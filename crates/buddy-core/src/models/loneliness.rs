//! Loneliness survey scoring and the ordered category scale.
//!
//! Six Likert items answered 1–4 are summed into a score in 6–24, which is
//! bucketed into one of four ordered categories.
//!
//! # Examples
//!
//! ```
//! use buddy_core::models::LonelinessCategory;
//!
//! assert_eq!(LonelinessCategory::from_score(15), LonelinessCategory::Moderate);
//! assert_eq!(LonelinessCategory::Low.distance(LonelinessCategory::High), 3);
//! assert_eq!(LonelinessCategory::ModeratelyHigh.as_str(), "Moderately High");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::{LIKERT_MAX, LIKERT_MIN, LONELINESS_ITEM_COUNT};
use crate::errors::{BuddyError, BuddyResult};
use crate::models::UserId;

/// Ordered loneliness bucket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum LonelinessCategory {
    Low,
    Moderate,
    #[serde(rename = "Moderately High")]
    ModeratelyHigh,
    High,
}

impl LonelinessCategory {
    /// Canonical ordering table. Rank and distance are derived from positions here.
    pub const ALL: [LonelinessCategory; 4] = [
        LonelinessCategory::Low,
        LonelinessCategory::Moderate,
        LonelinessCategory::ModeratelyHigh,
        LonelinessCategory::High,
    ];

    /// Position in [`Self::ALL`].
    pub fn rank(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Moderate => 1,
            Self::ModeratelyHigh => 2,
            Self::High => 3,
        }
    }

    /// Ordinal distance between two categories, 0..=3.
    pub fn distance(self, other: Self) -> usize {
        self.rank().abs_diff(other.rank())
    }

    /// Bucket a summed survey score.
    ///
    /// 6–10 Low, 11–15 Moderate, 16–20 Moderately High, 21–24 High.
    /// Scores outside 6–24 saturate at the nearest end.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=10 => Self::Low,
            11..=15 => Self::Moderate,
            16..=20 => Self::ModeratelyHigh,
            _ => Self::High,
        }
    }

    /// Storage and display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::ModeratelyHigh => "Moderately High",
            Self::High => "High",
        }
    }
}

impl Default for LonelinessCategory {
    fn default() -> Self {
        Self::Moderate
    }
}

impl std::fmt::Display for LonelinessCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LonelinessCategory {
    type Err = BuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "moderately high" | "moderately_high" => Ok(Self::ModeratelyHigh),
            "high" => Ok(Self::High),
            other => Err(BuddyError::ValidationError(format!(
                "unknown loneliness category: {other}"
            ))),
        }
    }
}

/// Sum the Likert answers after validating count and range.
pub fn score_responses(responses: &[u8]) -> BuddyResult<u32> {
    if responses.len() != LONELINESS_ITEM_COUNT {
        return Err(BuddyError::ValidationError(format!(
            "loneliness survey expects {LONELINESS_ITEM_COUNT} answers, got {}",
            responses.len()
        )));
    }
    if let Some(bad) = responses
        .iter()
        .find(|r| !(LIKERT_MIN..=LIKERT_MAX).contains(*r))
    {
        return Err(BuddyError::ValidationError(format!(
            "loneliness answer {bad} outside {LIKERT_MIN}..={LIKERT_MAX}"
        )));
    }
    Ok(responses.iter().map(|&r| u32::from(r)).sum())
}

/// A completed loneliness survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LonelinessAssessment {
    pub id: String,
    pub user_id: UserId,
    pub responses: Vec<u8>,
    pub score: u32,
    pub category: LonelinessCategory,
    pub created_at: DateTime<Utc>,
}

impl LonelinessAssessment {
    /// Score a set of survey answers into a new assessment record.
    pub fn from_responses(user_id: UserId, responses: Vec<u8>) -> BuddyResult<Self> {
        let score = score_responses(&responses)?;
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            responses,
            score,
            category: LonelinessCategory::from_score(score),
            created_at: Utc::now(),
        })
    }
}
