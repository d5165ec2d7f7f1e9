//! Concurrent allocation: capacity and single-membership hold under racing
//! callers sharing one file-backed engine.

use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;

use buddy_core::config::BuddyConfig;
use buddy_core::models::{AllocationTransition, GroupId, LeisureCategory, UserId};
use buddy_matching::MatchingEngine;

fn file_engine(dir: &tempfile::TempDir) -> MatchingEngine {
    let mut config = BuddyConfig::default();
    config.storage.db_path = dir.path().join("buddy.db").display().to_string();
    MatchingEngine::open(config).unwrap()
}

fn onboard_moderate(engine: &MatchingEngine, user: &str) -> UserId {
    let user_id = UserId::from(user);
    engine
        .record_loneliness(&user_id, vec![2, 2, 2, 2, 3, 3])
        .unwrap();
    engine
        .record_leisure(
            &user_id,
            vec![LeisureCategory::A, LeisureCategory::B, LeisureCategory::C],
        )
        .unwrap();
    user_id
}

#[test]
fn racing_users_never_overfill_a_group() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(file_engine(&dir));
    let users: Vec<UserId> = (0..23)
        .map(|i| onboard_moderate(&engine, &format!("racer-{i:02}")))
        .collect();

    let barrier = Arc::new(Barrier::new(users.len()));
    let handles: Vec<_> = users
        .iter()
        .cloned()
        .map(|user| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.find_or_create_group(&user)
            })
        })
        .collect();

    let mut per_group: HashMap<GroupId, u32> = HashMap::new();
    for handle in handles {
        let outcome = handle.join().unwrap().unwrap();
        assert_ne!(outcome.transition, AllocationTransition::AlreadyMember);
        *per_group.entry(outcome.group.group_id).or_insert(0) += 1;
    }

    let capacity = engine.config().allocation.group_capacity;
    for (group_id, placed) in &per_group {
        let members = engine.group_members(group_id).unwrap();
        assert_eq!(members.len() as u32, *placed);
        assert!(members.len() as u32 <= capacity, "group {group_id} overfilled");
    }
    assert_eq!(per_group.values().sum::<u32>(), users.len() as u32);

    for user in &users {
        assert!(engine.store().active_membership(user).unwrap().is_some());
    }
}

#[test]
fn same_user_racing_itself_gets_one_membership() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(file_engine(&dir));
    let user = onboard_moderate(&engine, "twin");

    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            let user = user.clone();
            thread::spawn(move || {
                barrier.wait();
                engine.find_or_create_group(&user)
            })
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();

    let group_id = &outcomes[0].group.group_id;
    assert!(outcomes.iter().all(|o| &o.group.group_id == group_id));
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| o.transition != AllocationTransition::AlreadyMember)
            .count(),
        1
    );
    assert_eq!(engine.group_members(group_id).unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn allocation_from_async_callers() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(file_engine(&dir));
    let users: Vec<UserId> = (0..10)
        .map(|i| onboard_moderate(&engine, &format!("async-{i}")))
        .collect();

    let tasks: Vec<_> = users
        .iter()
        .cloned()
        .map(|user| {
            let engine = Arc::clone(&engine);
            tokio::task::spawn_blocking(move || engine.find_or_create_group(&user))
        })
        .collect();

    let mut placed = 0;
    for task in tasks {
        let outcome = task.await.unwrap().unwrap();
        assert!(outcome.group.member_count <= 5);
        placed += 1;
    }
    assert_eq!(placed, users.len());
}
