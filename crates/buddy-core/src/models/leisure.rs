//! Leisure interest survey: forced-choice answers resolve to one of seven
//! categories, counted into per-category weights.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::constants::TOP_LEISURE_COUNT;
use crate::errors::{BuddyError, BuddyResult};
use crate::models::UserId;

/// One of the seven leisure activity clusters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum LeisureCategory {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl LeisureCategory {
    /// Canonical ordering table, also the tie-break order for top categories.
    pub const ALL: [LeisureCategory; 7] = [
        LeisureCategory::A,
        LeisureCategory::B,
        LeisureCategory::C,
        LeisureCategory::D,
        LeisureCategory::E,
        LeisureCategory::F,
        LeisureCategory::G,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
        }
    }
}

impl std::fmt::Display for LeisureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeisureCategory {
    type Err = BuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                BuddyError::ValidationError(format!("unknown leisure category: {trimmed}"))
            })
    }
}

/// Per-category answer counts. Zero counts are never stored.
pub type LeisureWeights = BTreeMap<LeisureCategory, u32>;

/// Count forced-choice answers per category.
pub fn tally(responses: &[LeisureCategory]) -> LeisureWeights {
    let mut weights = LeisureWeights::new();
    for &category in responses {
        *weights.entry(category).or_insert(0) += 1;
    }
    weights
}

/// The `n` heaviest categories, heaviest first.
///
/// Ties keep canonical A→G order: the stable sort runs over the map's
/// already-ordered entries.
pub fn top_categories(weights: &LeisureWeights, n: usize) -> Vec<LeisureCategory> {
    let mut entries: Vec<(LeisureCategory, u32)> = weights
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(&c, &count)| (c, count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().take(n).map(|(c, _)| c).collect()
}

/// A completed leisure survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeisureAssessment {
    pub id: String,
    pub user_id: UserId,
    pub responses: Vec<LeisureCategory>,
    pub weights: LeisureWeights,
    pub top_categories: Vec<LeisureCategory>,
    pub created_at: DateTime<Utc>,
}

impl LeisureAssessment {
    /// Tally survey answers into a new assessment record.
    pub fn from_responses(user_id: UserId, responses: Vec<LeisureCategory>) -> BuddyResult<Self> {
        if responses.is_empty() {
            return Err(BuddyError::ValidationError(
                "leisure survey has no answers".to_string(),
            ));
        }
        let weights = tally(&responses);
        let top_categories = top_categories(&weights, TOP_LEISURE_COUNT);
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            responses,
            weights,
            top_categories,
            created_at: Utc::now(),
        })
    }
}
