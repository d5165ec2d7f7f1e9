//! Assessment and mood persistence: latest-wins reads, pool ordering, the
//! onboarding gate, and schema checks.

use chrono::{Duration, Utc};
use buddy_core::errors::BuddyError;
use buddy_core::models::{
    LeisureAssessment, LeisureCategory, LonelinessAssessment, LonelinessCategory, MoodEntry,
    UserId,
};
use buddy_core::traits::{IAssessmentStore, IOnboardingGate};
use buddy_storage::StorageEngine;

fn engine() -> StorageEngine {
    StorageEngine::open_in_memory().unwrap()
}

fn loneliness(user: &str, responses: [u8; 6], minutes_ago: i64) -> LonelinessAssessment {
    let mut a = LonelinessAssessment::from_responses(UserId::from(user), responses.to_vec()).unwrap();
    a.created_at = Utc::now() - Duration::minutes(minutes_ago);
    a
}

fn leisure(user: &str, answers: &[LeisureCategory], minutes_ago: i64) -> LeisureAssessment {
    let mut a = LeisureAssessment::from_responses(UserId::from(user), answers.to_vec()).unwrap();
    a.created_at = Utc::now() - Duration::minutes(minutes_ago);
    a
}

#[test]
fn latest_loneliness_prefers_newest_created_at() {
    let engine = engine();
    let older = loneliness("u1", [1, 1, 1, 1, 1, 1], 60);
    let newer = loneliness("u1", [4, 4, 4, 4, 4, 4], 5);
    // Insert newest first so rowid order disagrees with time order.
    engine.record_loneliness(&newer).unwrap();
    engine.record_loneliness(&older).unwrap();

    let latest = engine.latest_loneliness(&UserId::from("u1")).unwrap().unwrap();
    assert_eq!(latest.id, newer.id);
    assert_eq!(latest.category, LonelinessCategory::High);
    assert_eq!(latest, newer);
}

#[test]
fn latest_loneliness_none_for_unknown_user() {
    let engine = engine();
    assert!(engine.latest_loneliness(&UserId::from("ghost")).unwrap().is_none());
    assert!(engine.latest_leisure(&UserId::from("ghost")).unwrap().is_none());
}

#[test]
fn leisure_roundtrip_keeps_weights_and_top_categories() {
    use LeisureCategory::*;
    let engine = engine();
    let a = leisure("u1", &[A, A, C, C, C, F], 1);
    engine.record_leisure(&a).unwrap();

    let stored = engine.latest_leisure(&UserId::from("u1")).unwrap().unwrap();
    assert_eq!(stored.top_categories, vec![C, A, F]);
    assert_eq!(stored.weights.get(&C), Some(&3));
    assert_eq!(stored, a);
}

#[test]
fn list_assessed_users_orders_by_first_assessment() {
    use LeisureCategory::*;
    let engine = engine();
    engine.record_loneliness(&loneliness("late", [2; 6], 1)).unwrap();
    engine.record_leisure(&leisure("early", &[B], 90)).unwrap();
    engine.record_loneliness(&loneliness("middle", [3; 6], 30)).unwrap();
    engine.record_leisure(&leisure("middle", &[D], 2)).unwrap();

    let users = engine.list_assessed_users(10).unwrap();
    assert_eq!(
        users,
        vec![UserId::from("early"), UserId::from("middle"), UserId::from("late")]
    );
    assert_eq!(engine.list_assessed_users(2).unwrap().len(), 2);
}

#[test]
fn onboarding_requires_both_assessments() {
    let engine = engine();
    let user = UserId::from("u1");
    assert!(!engine.has_completed_onboarding(&user).unwrap());

    engine.record_loneliness(&loneliness("u1", [2; 6], 3)).unwrap();
    assert!(!engine.has_completed_onboarding(&user).unwrap());

    engine
        .record_leisure(&leisure("u1", &[LeisureCategory::E], 1))
        .unwrap();
    assert!(engine.has_completed_onboarding(&user).unwrap());
}

#[test]
fn recent_moods_newest_first_with_limit() {
    let engine = engine();
    let user = UserId::from("u1");
    for (i, mood) in [1u8, 2, 3, 4, 5].into_iter().enumerate() {
        let mut entry = MoodEntry::new(user.clone(), mood, None).unwrap();
        entry.created_at = Utc::now() - Duration::minutes(10 - i as i64);
        engine.record_mood(&entry).unwrap();
    }

    let moods = engine.recent_moods(&user, 3).unwrap();
    let values: Vec<u8> = moods.iter().map(|m| m.mood).collect();
    assert_eq!(values, vec![5, 4, 3]);
}

#[test]
fn mood_out_of_range_rejected_by_schema() {
    let engine = engine();
    let mut entry = MoodEntry::new(UserId::from("u1"), 3, Some("fine".into())).unwrap();
    entry.mood = 9;
    let err = engine.record_mood(&entry).unwrap_err();
    assert!(matches!(err, BuddyError::PersistenceUnavailable(_)));
}

#[test]
fn duplicate_assessment_id_rejected() {
    let engine = engine();
    let a = loneliness("u1", [2; 6], 1);
    engine.record_loneliness(&a).unwrap();
    assert!(engine.record_loneliness(&a).is_err());
}
