//! Property tests: symmetry, self-max, boundedness, and category-distance
//! monotonicity of the compatibility scorer.

use proptest::prelude::*;

use buddy_core::config::{OverlapFormula, ScoringConfig};
use buddy_core::models::leisure::{tally, top_categories};
use buddy_core::models::{LeisureCategory, LonelinessCategory, UserId, UserProfile};
use buddy_matching::CompatibilityScorer;

fn category() -> impl Strategy<Value = LonelinessCategory> {
    prop::sample::select(LonelinessCategory::ALL.to_vec())
}

fn leisure_answers() -> impl Strategy<Value = Vec<LeisureCategory>> {
    prop::collection::vec(prop::sample::select(LeisureCategory::ALL.to_vec()), 0..12)
}

/// Arbitrary profile: category may be unassessed, leisure may be missing.
fn profile() -> impl Strategy<Value = UserProfile> {
    (prop::option::of(category()), leisure_answers(), 1.0f64..=5.0).prop_map(
        |(category, answers, mood)| {
            let mut p = UserProfile::neutral(UserId::from("p"));
            if let Some(c) = category {
                p.loneliness_category = c;
                p.assessments.loneliness = true;
            }
            if !answers.is_empty() {
                let weights = tally(&answers);
                p.top_leisure_categories = top_categories(&weights, 3);
                p.leisure_category_weights = weights;
                p.assessments.leisure = true;
            }
            p.recent_mood_average = mood;
            p
        },
    )
}

fn scorer() -> impl Strategy<Value = CompatibilityScorer> {
    prop_oneof![Just(OverlapFormula::OverLarger), Just(OverlapFormula::Jaccard)].prop_map(
        |overlap_formula| {
            CompatibilityScorer::new(ScoringConfig {
                overlap_formula,
                ..ScoringConfig::default()
            })
        },
    )
}

proptest! {
    #[test]
    fn prop_symmetric(scorer in scorer(), a in profile(), b in profile()) {
        prop_assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a));
    }

    #[test]
    fn prop_bounded(scorer in scorer(), a in profile(), b in profile()) {
        let s = scorer.score(&a, &b);
        prop_assert!(s >= scorer.min_score() - 1e-9);
        prop_assert!(s <= scorer.max_score() + 1e-9);
        prop_assert!((0.0..=100.0 + 1e-9).contains(&s));
    }

    #[test]
    fn prop_self_max_when_assessed(scorer in scorer(), a in profile()) {
        prop_assume!(a.assessments.loneliness && !a.top_leisure_categories.is_empty());
        prop_assert!((scorer.score(&a, &a) - scorer.max_score()).abs() < 1e-9);
    }

    #[test]
    fn prop_never_above_self_max(scorer in scorer(), a in profile(), b in profile()) {
        let s = scorer.score(&a, &b);
        prop_assert!(s <= scorer.max_score() + 1e-9);
    }

    #[test]
    fn prop_monotone_in_category_distance(
        scorer in scorer(),
        anchor in category(),
        answers_a in leisure_answers(),
        answers_b in leisure_answers(),
    ) {
        let make = |c: LonelinessCategory, answers: &[LeisureCategory]| {
            let mut p = UserProfile::neutral(UserId::from("m"));
            p.loneliness_category = c;
            p.assessments.loneliness = true;
            p.top_leisure_categories = top_categories(&tally(answers), 3);
            p
        };
        let a = make(anchor, &answers_a);
        let mut by_distance: Vec<(usize, f64)> = LonelinessCategory::ALL
            .iter()
            .map(|&c| (anchor.distance(c), scorer.score(&a, &make(c, &answers_b))))
            .collect();
        by_distance.sort_by_key(|(d, _)| *d);
        for pair in by_distance.windows(2) {
            if pair[0].0 < pair[1].0 {
                prop_assert!(pair[0].1 >= pair[1].1 - 1e-9);
            }
        }
    }
}
