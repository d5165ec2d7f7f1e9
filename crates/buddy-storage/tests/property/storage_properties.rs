//! Property tests: assessment insert→latest roundtrip and the capacity bound.

use proptest::prelude::*;

use buddy_core::models::{
    GroupId, LeisureAssessment, LeisureCategory, LonelinessAssessment, LonelinessCategory,
    MatchingCriteria, NewGroup, UserId,
};
use buddy_core::traits::{IAssessmentStore, IGroupStore};
use buddy_storage::StorageEngine;

fn leisure_category() -> impl Strategy<Value = LeisureCategory> {
    prop::sample::select(LeisureCategory::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_loneliness_roundtrip(responses in prop::collection::vec(1u8..=4, 6)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let a = LonelinessAssessment::from_responses(UserId::from("p"), responses).unwrap();
        engine.record_loneliness(&a).unwrap();
        let stored = engine.latest_loneliness(&UserId::from("p")).unwrap().unwrap();
        prop_assert_eq!(stored, a);
    }

    #[test]
    fn prop_leisure_roundtrip(answers in prop::collection::vec(leisure_category(), 1..30)) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let a = LeisureAssessment::from_responses(UserId::from("p"), answers).unwrap();
        engine.record_leisure(&a).unwrap();
        let stored = engine.latest_leisure(&UserId::from("p")).unwrap().unwrap();
        prop_assert_eq!(stored, a);
    }

    #[test]
    fn prop_member_count_never_exceeds_capacity(capacity in 1u32..8, joiners in 0usize..15) {
        let engine = StorageEngine::open_in_memory().unwrap();
        let draft = NewGroup {
            group_id: GroupId::new(),
            name: "prop".into(),
            created_by: UserId::from("creator"),
            matching_criteria: MatchingCriteria {
                loneliness_category: LonelinessCategory::Low,
                leisure_categories: vec![],
            },
            capacity,
        };
        engine.create_group_with_creator(&draft).unwrap();
        let accepted = (0..joiners)
            .filter(|i| engine.join_group(&draft.group_id, &UserId::from(format!("j{i}"))).is_ok())
            .count();
        let group = engine.get_group(&draft.group_id).unwrap().unwrap();
        prop_assert!(group.member_count <= capacity);
        prop_assert_eq!(accepted, joiners.min(capacity as usize - 1));
    }
}
