//! The comparable per-user profile built from raw assessment records.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::{DEFAULT_LONELINESS_SCORE, DEFAULT_MOOD_AVERAGE};
use crate::models::{LeisureCategory, LeisureWeights, LonelinessCategory, UserId};

/// Which assessments a profile was actually built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentPresence {
    pub loneliness: bool,
    pub leisure: bool,
}

impl AssessmentPresence {
    pub fn is_complete(&self) -> bool {
        self.loneliness && self.leisure
    }

    pub fn is_empty(&self) -> bool {
        !self.loneliness && !self.leisure
    }

    /// Names of the assessments still missing.
    pub fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.loneliness {
            missing.push("loneliness".to_string());
        }
        if !self.leisure {
            missing.push("leisure".to_string());
        }
        missing
    }
}

/// Immutable profile vector compared by the scorer.
///
/// Missing assessments are filled with neutral defaults; `assessments`
/// records which values are real.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserProfile {
    pub user_id: UserId,
    pub loneliness_category: LonelinessCategory,
    pub loneliness_score: u32,
    pub leisure_category_weights: LeisureWeights,
    pub top_leisure_categories: Vec<LeisureCategory>,
    pub recent_mood_average: f64,
    pub assessments: AssessmentPresence,
}

impl UserProfile {
    /// An all-default profile for a user with no assessments or moods.
    pub fn neutral(user_id: UserId) -> Self {
        Self {
            user_id,
            loneliness_category: LonelinessCategory::default(),
            loneliness_score: DEFAULT_LONELINESS_SCORE,
            leisure_category_weights: LeisureWeights::new(),
            top_leisure_categories: Vec::new(),
            recent_mood_average: DEFAULT_MOOD_AVERAGE,
            assessments: AssessmentPresence::default(),
        }
    }

    /// The loneliness category, or `None` when it is only a default.
    pub fn assessed_category(&self) -> Option<LonelinessCategory> {
        self.assessments
            .loneliness
            .then_some(self.loneliness_category)
    }
}
