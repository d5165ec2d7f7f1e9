//! CompatibilityScorer: a bounded score between two profiles.
//!
//! Score formula: `max(Wl × sim(category) + Wk × overlap(top), floor)`
//!
//! - `sim(category)` looks up the category distance in `[1.0, 0.7, 0.4, 0.1]`,
//!   or 0.4 when either side has no loneliness assessment.
//! - `overlap(top)` is `|A ∩ B| / max(|A|, |B|, 1)`, or 0.5 when either
//!   top-category list is empty.
//! - With the default weights (40/60) and floor (25) scores fall in 25..=100.
//!
//! Two `Low` users sharing two of three top categories:
//! - Category: 1.0 × 40 = 40
//! - Leisure: 2/3 × 60 = 40
//! - Score: 80
//!
//! ```
//! use buddy_core::models::{LeisureCategory::*, LonelinessCategory, UserId, UserProfile};
//! use buddy_matching::CompatibilityScorer;
//!
//! let mut a = UserProfile::neutral(UserId::from("a"));
//! a.loneliness_category = LonelinessCategory::Low;
//! a.assessments.loneliness = true;
//! a.assessments.leisure = true;
//! a.top_leisure_categories = vec![A, B, C];
//!
//! let mut b = a.clone();
//! b.user_id = UserId::from("b");
//! b.top_leisure_categories = vec![A, B, D];
//!
//! let scorer = CompatibilityScorer::default();
//! assert!((scorer.score(&a, &b) - 80.0).abs() < 1e-9);
//! ```

use std::collections::BTreeSet;

use serde::Serialize;

use buddy_core::config::{OverlapFormula, ScoringConfig};
use buddy_core::models::{LeisureCategory, LonelinessCategory, UserProfile};

/// Per-term view of a score, for explanations and tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub loneliness_similarity: f64,
    pub loneliness_term: f64,
    pub leisure_similarity: f64,
    pub leisure_term: f64,
    /// Weighted sum before the floor.
    pub raw: f64,
    pub score: f64,
    pub floored: bool,
}

/// Pure, total, symmetric scorer over [`UserProfile`] pairs.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    config: ScoringConfig,
}

impl CompatibilityScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Highest attainable score (sum of term weights).
    pub fn max_score(&self) -> f64 {
        self.config.max_score()
    }

    pub fn min_score(&self) -> f64 {
        self.config.min_score
    }

    pub fn score(&self, a: &UserProfile, b: &UserProfile) -> f64 {
        self.score_breakdown(a, b).score
    }

    pub fn score_breakdown(&self, a: &UserProfile, b: &UserProfile) -> ScoreBreakdown {
        let loneliness_similarity =
            self.loneliness_similarity(a.assessed_category(), b.assessed_category());
        let leisure_similarity =
            self.leisure_similarity(&a.top_leisure_categories, &b.top_leisure_categories);

        let loneliness_term = loneliness_similarity * self.config.loneliness_weight;
        let leisure_term = leisure_similarity * self.config.leisure_weight;
        let raw = loneliness_term + leisure_term;
        let floored = raw < self.config.min_score;

        ScoreBreakdown {
            loneliness_similarity,
            loneliness_term,
            leisure_similarity,
            leisure_term,
            raw,
            score: if floored { self.config.min_score } else { raw },
            floored,
        }
    }

    /// Similarity of two loneliness categories; `None` means unassessed.
    pub fn loneliness_similarity(
        &self,
        a: Option<LonelinessCategory>,
        b: Option<LonelinessCategory>,
    ) -> f64 {
        match (a, b) {
            (Some(a), Some(b)) => self.config.category_similarity[a.distance(b)],
            _ => self.config.missing_category_similarity,
        }
    }

    /// Overlap ratio of two top-category lists, in `0.0..=1.0`.
    pub fn leisure_similarity(&self, a: &[LeisureCategory], b: &[LeisureCategory]) -> f64 {
        if a.is_empty() || b.is_empty() {
            return self.config.empty_leisure_similarity;
        }
        let a: BTreeSet<_> = a.iter().collect();
        let b: BTreeSet<_> = b.iter().collect();
        let shared = a.intersection(&b).count() as f64;
        let denominator = match self.config.overlap_formula {
            OverlapFormula::OverLarger => a.len().max(b.len()).max(1),
            OverlapFormula::Jaccard => a.union(&b).count().max(1),
        };
        shared / denominator as f64
    }

    /// Mean score of `candidate` against each member, `None` for no members.
    pub fn aggregate_group_score(
        &self,
        candidate: &UserProfile,
        members: &[UserProfile],
    ) -> Option<f64> {
        if members.is_empty() {
            return None;
        }
        let total: f64 = members.iter().map(|m| self.score(candidate, m)).sum();
        Some(total / members.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::models::UserId;
    use LeisureCategory::*;

    fn profile(category: Option<LonelinessCategory>, top: Vec<LeisureCategory>) -> UserProfile {
        let mut p = UserProfile::neutral(UserId::from("p"));
        if let Some(c) = category {
            p.loneliness_category = c;
            p.assessments.loneliness = true;
        }
        p.assessments.leisure = !top.is_empty();
        p.top_leisure_categories = top;
        p
    }

    #[test]
    fn missing_category_is_mid_similarity() {
        let scorer = CompatibilityScorer::default();
        assert_eq!(
            scorer.loneliness_similarity(None, Some(LonelinessCategory::High)),
            0.4
        );
        assert_eq!(scorer.loneliness_similarity(None, None), 0.4);
    }

    #[test]
    fn empty_top_list_is_neutral() {
        let scorer = CompatibilityScorer::default();
        assert_eq!(scorer.leisure_similarity(&[], &[A, B, C]), 0.5);
        assert_eq!(scorer.leisure_similarity(&[A], &[]), 0.5);
    }

    #[test]
    fn overlap_formulas_differ_on_partial_overlap() {
        let over_larger = CompatibilityScorer::default();
        let jaccard = CompatibilityScorer::new(ScoringConfig {
            overlap_formula: OverlapFormula::Jaccard,
            ..ScoringConfig::default()
        });
        // 2 shared, larger set 3, union 4.
        assert!((over_larger.leisure_similarity(&[A, B, C], &[A, B, D]) - 2.0 / 3.0).abs() < 1e-12);
        assert!((jaccard.leisure_similarity(&[A, B, C], &[A, B, D]) - 0.5).abs() < 1e-12);
        // Uneven lengths: 1 shared of max(3, 1).
        assert!((over_larger.leisure_similarity(&[A, B, C], &[A]) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_default_profiles_floor_to_baseline_or_above() {
        let scorer = CompatibilityScorer::default();
        let a = profile(None, vec![]);
        let b = profile(None, vec![]);
        let breakdown = scorer.score_breakdown(&a, &b);
        // 0.4 × 40 + 0.5 × 60 = 46.
        assert!((breakdown.raw - 46.0).abs() < 1e-9);
        assert!(!breakdown.floored);
    }

    #[test]
    fn disjoint_opposite_profiles_hit_the_floor() {
        let scorer = CompatibilityScorer::default();
        let a = profile(Some(LonelinessCategory::Low), vec![A, B, C]);
        let b = profile(Some(LonelinessCategory::High), vec![D, E, F]);
        let breakdown = scorer.score_breakdown(&a, &b);
        assert!((breakdown.raw - 4.0).abs() < 1e-9);
        assert!(breakdown.floored);
        assert_eq!(breakdown.score, 25.0);
    }

    #[test]
    fn unassessed_self_score_is_below_max() {
        let scorer = CompatibilityScorer::default();
        let a = profile(None, vec![A, B, C]);
        // 0.4 × 40 + 1.0 × 60.
        assert!((scorer.score(&a, &a) - 76.0).abs() < 1e-9);
    }

    #[test]
    fn aggregate_is_mean_over_members() {
        let scorer = CompatibilityScorer::default();
        let me = profile(Some(LonelinessCategory::Low), vec![A, B, C]);
        let twin = profile(Some(LonelinessCategory::Low), vec![A, B, C]);
        let far = profile(Some(LonelinessCategory::High), vec![D, E, F]);
        assert_eq!(scorer.aggregate_group_score(&me, &[]), None);
        let mean = scorer.aggregate_group_score(&me, &[twin, far]).unwrap();
        assert!((mean - (100.0 + 25.0) / 2.0).abs() < 1e-9);
    }
}
