//! Compatibility scoring configuration.
//!
//! # Examples
//!
//! ```
//! use buddy_core::config::{OverlapFormula, ScoringConfig};
//!
//! let config = ScoringConfig::default();
//! assert_eq!(config.max_score(), 100.0);
//! assert_eq!(config.overlap_formula, OverlapFormula::OverLarger);
//! ```

use serde::{Deserialize, Serialize};

use super::defaults;

/// How the leisure-overlap ratio between two top-category lists is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapFormula {
    /// `|A ∩ B| / max(|A|, |B|, 1)`. Rewards partial overlap more generously.
    #[default]
    OverLarger,
    /// Classic set Jaccard: `|A ∩ B| / |A ∪ B|`.
    Jaccard,
}

/// Weights and neutral values for the compatibility scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the loneliness-category term. Default: 40.
    pub loneliness_weight: f64,
    /// Weight of the leisure-overlap term. Default: 60.
    pub leisure_weight: f64,
    /// Similarity by category distance 0..=3. Default: [1.0, 0.7, 0.4, 0.1].
    pub category_similarity: [f64; 4],
    /// Similarity used when either profile has no loneliness assessment. Default: 0.4.
    pub missing_category_similarity: f64,
    /// Similarity used when either top-category list is empty. Default: 0.5.
    pub empty_leisure_similarity: f64,
    /// Baseline floor applied to every score. Default: 25.
    pub min_score: f64,
    /// Overlap ratio formula. Default: over-larger-set.
    pub overlap_formula: OverlapFormula,
}

impl ScoringConfig {
    /// Highest score the weighted sum can reach.
    pub fn max_score(&self) -> f64 {
        self.loneliness_weight + self.leisure_weight
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            loneliness_weight: defaults::DEFAULT_LONELINESS_WEIGHT,
            leisure_weight: defaults::DEFAULT_LEISURE_WEIGHT,
            category_similarity: defaults::DEFAULT_CATEGORY_SIMILARITY,
            missing_category_similarity: defaults::DEFAULT_MISSING_CATEGORY_SIMILARITY,
            empty_leisure_similarity: defaults::DEFAULT_EMPTY_LEISURE_SIMILARITY,
            min_score: defaults::DEFAULT_MIN_SCORE,
            overlap_formula: OverlapFormula::default(),
        }
    }
}
