//! Metrics counters, degradation tracking, and the JSON snapshot.

use buddy_core::config::ObservabilityConfig;
use buddy_core::models::{AllocationTransition, DegradationEvent};
use buddy_observability::degradation::{DegradationTracker, RecoveryStatus};
use buddy_observability::metrics::{AllocationMetrics, DiscoveryMetrics, MatchingMetrics};
use buddy_observability::tracing_setup::{init_tracing, spans};
use buddy_observability::ObservabilityEngine;

#[test]
fn allocation_metrics_count_transitions() {
    let mut m = AllocationMetrics::new();
    m.record_transition(AllocationTransition::Created);
    m.record_transition(AllocationTransition::Joined);
    m.record_transition(AllocationTransition::Joined);
    m.record_transition(AllocationTransition::Joined);
    m.record_transition(AllocationTransition::AlreadyMember);
    m.record_capacity_races(2);
    m.record_onboarding_refused();
    m.record_group_completed();

    assert_eq!(m.total_placements(), 5);
    assert_eq!(m.groups_completed, 1);
    assert_eq!(m.capacity_races, 2);
    assert_eq!(m.onboarding_refused, 1);
    assert!((m.join_rate() - 0.75).abs() < 1e-9);
    assert_eq!(AllocationMetrics::new().join_rate(), 0.0);
}

#[test]
fn discovery_metrics_track_score_distribution() {
    let mut m = DiscoveryMetrics::new();
    assert_eq!(m.mean_score(), 0.0);
    assert_eq!(m.min_score(), None);

    m.record_candidates(&[80.0, 25.0]);
    m.record_similar(&[55.0]);
    m.record_similar(&[]);

    assert_eq!(m.candidate_requests, 1);
    assert_eq!(m.similar_requests, 2);
    assert_eq!(m.scores_served, 3);
    assert!((m.mean_score() - 160.0 / 3.0).abs() < 1e-9);
    assert_eq!(m.min_score(), Some(25.0));
    assert_eq!(m.max_score(), Some(80.0));
}

#[test]
fn metrics_reset_clears_everything() {
    let mut m = MatchingMetrics::new();
    m.allocation.record_transition(AllocationTransition::Created);
    m.discovery.record_degraded();
    m.reset();
    assert_eq!(m.allocation.total_placements(), 0);
    assert_eq!(m.discovery.degraded_responses, 0);
}

#[test]
fn tracker_records_and_recovers() {
    let mut tracker = DegradationTracker::new();
    tracker.record(DegradationEvent::now("discovery", "db locked", "empty_list"));
    tracker.record(DegradationEvent::now("discovery", "db locked", "empty_list"));
    tracker.record(DegradationEvent::now("profile", "bad row", "neutral"));

    assert!(tracker.is_degraded("discovery"));
    assert_eq!(tracker.count_recent("discovery", 60), 2);
    assert_eq!(tracker.active_degradations().len(), 3);

    assert_eq!(tracker.mark_recovered("discovery"), 2);
    assert!(!tracker.is_degraded("discovery"));
    assert_eq!(tracker.active_degradations().len(), 1);
    let recovered = &tracker.events()[0];
    assert_eq!(recovered.recovery_status, RecoveryStatus::Recovered);
    assert!(recovered.recovered_at.is_some());
}

#[test]
fn engine_snapshot_reports_degradations() {
    let mut engine = ObservabilityEngine::new();
    engine.metrics.discovery.record_candidates(&[40.0, 60.0]);
    engine.record_degradation(DegradationEvent::now("discovery", "timeout", "empty_list"));

    let snapshot = engine.metrics_snapshot().unwrap();
    assert_eq!(snapshot["active_degradations"], 1);
    assert_eq!(snapshot["mean_served_score"], 50.0);
    assert_eq!(snapshot["metrics"]["discovery"]["degraded_responses"], 1);

    engine.mark_recovered("discovery");
    let snapshot = engine.metrics_snapshot().unwrap();
    assert_eq!(snapshot["active_degradations"], 0);
}

#[test]
fn init_tracing_is_safe_to_call_twice() {
    let config = ObservabilityConfig::default();
    let _ = init_tracing(&config);
    assert!(!init_tracing(&config));

    let _span = buddy_observability::allocation_span!("u-1").entered();
    assert_eq!(spans::names::ALLOCATION, "buddy.allocation");
}
