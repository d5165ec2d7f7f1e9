use buddy_core::models::leisure::{tally, top_categories};
use buddy_core::models::loneliness::score_responses;
use buddy_core::models::*;
use proptest::prelude::*;

use LeisureCategory::*;

// --- Loneliness ---

#[test]
fn loneliness_categories_are_ordered() {
    assert!(LonelinessCategory::Low < LonelinessCategory::Moderate);
    assert!(LonelinessCategory::Moderate < LonelinessCategory::ModeratelyHigh);
    assert!(LonelinessCategory::ModeratelyHigh < LonelinessCategory::High);
    for (i, c) in LonelinessCategory::ALL.iter().enumerate() {
        assert_eq!(c.rank(), i);
    }
}

#[test]
fn loneliness_distance_is_symmetric() {
    for a in LonelinessCategory::ALL {
        for b in LonelinessCategory::ALL {
            assert_eq!(a.distance(b), b.distance(a));
        }
        assert_eq!(a.distance(a), 0);
    }
    assert_eq!(
        LonelinessCategory::Low.distance(LonelinessCategory::ModeratelyHigh),
        2
    );
}

#[test]
fn loneliness_thresholds() {
    assert_eq!(LonelinessCategory::from_score(6), LonelinessCategory::Low);
    assert_eq!(LonelinessCategory::from_score(10), LonelinessCategory::Low);
    assert_eq!(LonelinessCategory::from_score(11), LonelinessCategory::Moderate);
    assert_eq!(LonelinessCategory::from_score(15), LonelinessCategory::Moderate);
    assert_eq!(LonelinessCategory::from_score(16), LonelinessCategory::ModeratelyHigh);
    assert_eq!(LonelinessCategory::from_score(20), LonelinessCategory::ModeratelyHigh);
    assert_eq!(LonelinessCategory::from_score(21), LonelinessCategory::High);
    assert_eq!(LonelinessCategory::from_score(24), LonelinessCategory::High);
}

#[test]
fn loneliness_labels_roundtrip_through_serde_and_fromstr() {
    let json = serde_json::to_string(&LonelinessCategory::ModeratelyHigh).unwrap();
    assert_eq!(json, "\"Moderately High\"");
    let back: LonelinessCategory = serde_json::from_str(&json).unwrap();
    assert_eq!(back, LonelinessCategory::ModeratelyHigh);

    for c in LonelinessCategory::ALL {
        assert_eq!(c.as_str().parse::<LonelinessCategory>().unwrap(), c);
    }
    assert_eq!(
        "moderately_high".parse::<LonelinessCategory>().unwrap(),
        LonelinessCategory::ModeratelyHigh
    );
    assert!("extreme".parse::<LonelinessCategory>().is_err());
}

#[test]
fn loneliness_survey_rejects_wrong_length_and_range() {
    assert!(score_responses(&[1, 2, 3]).is_err());
    assert!(score_responses(&[1, 2, 3, 4, 5, 1]).is_err());
    assert!(score_responses(&[0, 2, 3, 4, 1, 1]).is_err());
    assert_eq!(score_responses(&[1, 2, 3, 4, 1, 2]).unwrap(), 13);
}

#[test]
fn loneliness_assessment_scores_and_buckets() {
    let a = LonelinessAssessment::from_responses("u1".into(), vec![4, 4, 4, 3, 3, 3]).unwrap();
    assert_eq!(a.score, 21);
    assert_eq!(a.category, LonelinessCategory::High);
    assert!(!a.id.is_empty());
}

proptest! {
    #[test]
    fn prop_valid_surveys_score_in_range(answers in proptest::collection::vec(1u8..=4, 6)) {
        let score = score_responses(&answers).unwrap();
        prop_assert!((6..=24).contains(&score));
    }
}

// --- Leisure ---

#[test]
fn leisure_tally_counts_answers() {
    let weights = tally(&[A, B, A, C, A, B]);
    assert_eq!(weights.get(&A), Some(&3));
    assert_eq!(weights.get(&B), Some(&2));
    assert_eq!(weights.get(&C), Some(&1));
    assert_eq!(weights.get(&D), None);
}

#[test]
fn leisure_top_categories_break_ties_in_canonical_order() {
    // E, B and G tie on 2; canonical order puts B before E before G.
    let weights = tally(&[G, E, B, G, E, B, D]);
    assert_eq!(top_categories(&weights, 3), vec![B, E, G]);

    let weights = tally(&[F, F, F, A, C]);
    assert_eq!(top_categories(&weights, 3), vec![F, A, C]);
}

#[test]
fn leisure_top_categories_shorter_than_three() {
    let weights = tally(&[D, D]);
    assert_eq!(top_categories(&weights, 3), vec![D]);
    assert!(top_categories(&LeisureWeights::new(), 3).is_empty());
}

#[test]
fn leisure_assessment_requires_answers() {
    assert!(LeisureAssessment::from_responses("u1".into(), vec![]).is_err());
    let a = LeisureAssessment::from_responses("u1".into(), vec![C, C, A, B, B, B]).unwrap();
    assert_eq!(a.top_categories, vec![B, C, A]);
}

#[test]
fn leisure_category_parses_case_insensitively() {
    assert_eq!("g".parse::<LeisureCategory>().unwrap(), G);
    assert!("H".parse::<LeisureCategory>().is_err());
}

// --- Mood ---

#[test]
fn mood_entry_validates_scale() {
    assert!(MoodEntry::new("u1".into(), 0, None).is_err());
    assert!(MoodEntry::new("u1".into(), 6, None).is_err());
    let m = MoodEntry::new("u1".into(), 5, Some("great day".into())).unwrap();
    assert_eq!(m.mood, 5);
}

// --- Profile ---

#[test]
fn neutral_profile_uses_defaults() {
    let p = UserProfile::neutral("u1".into());
    assert_eq!(p.loneliness_category, LonelinessCategory::Moderate);
    assert_eq!(p.loneliness_score, 15);
    assert!(p.top_leisure_categories.is_empty());
    assert_eq!(p.recent_mood_average, 3.0);
    assert!(p.assessments.is_empty());
    assert_eq!(p.assessed_category(), None);
    assert_eq!(p.assessments.missing(), vec!["loneliness", "leisure"]);
}

// --- Groups ---

fn group(member_count: u32, status: GroupStatus) -> BuddyGroup {
    BuddyGroup {
        group_id: GroupId::new(),
        name: "test".into(),
        created_by: "u1".into(),
        matching_criteria: MatchingCriteria {
            loneliness_category: LonelinessCategory::Low,
            leisure_categories: vec![A],
        },
        status,
        capacity: 5,
        member_count,
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn group_capacity_helpers() {
    assert!(group(4, GroupStatus::Active).has_capacity());
    assert!(!group(5, GroupStatus::Active).has_capacity());
    assert!(group(5, GroupStatus::Active).is_full());
    assert!(!group(1, GroupStatus::Closed).has_capacity());
    assert!(group(2, GroupStatus::Active).below_minimum(3));
    assert!(!group(3, GroupStatus::Active).below_minimum(3));
    assert!(group(3, GroupStatus::Active).below_minimum(4));
}

#[test]
fn group_status_and_role_parse() {
    assert_eq!("active".parse::<GroupStatus>().unwrap(), GroupStatus::Active);
    assert_eq!("inactive".parse::<GroupStatus>().unwrap(), GroupStatus::Closed);
    assert_eq!("creator".parse::<MemberRole>().unwrap(), MemberRole::Creator);
    assert!("owner".parse::<MemberRole>().is_err());
}

#[test]
fn new_group_snapshots_creator_profile() {
    let mut p = UserProfile::neutral("creator".into());
    p.loneliness_category = LonelinessCategory::High;
    p.top_leisure_categories = vec![B, C];
    let g = NewGroup::for_creator(&p, 5);
    assert_eq!(g.created_by, UserId::from("creator"));
    assert_eq!(g.matching_criteria.loneliness_category, LonelinessCategory::High);
    assert_eq!(g.matching_criteria.leisure_categories, vec![B, C]);
    assert!(g.name.starts_with("High buddies"));
    assert!(validate_capacity(0).is_err());
}
