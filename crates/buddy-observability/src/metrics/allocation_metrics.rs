//! Allocation outcomes: transitions taken, onboarding refusals, capacity
//! races, and groups reaching their minimum size.

use buddy_core::models::AllocationTransition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationMetrics {
    pub already_member: u64,
    pub joined: u64,
    pub created: u64,
    pub onboarding_refused: u64,
    pub capacity_races: u64,
    pub failures: u64,
    /// Groups that reached the configured minimum size.
    pub groups_completed: u64,
}

impl AllocationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_transition(&mut self, transition: AllocationTransition) {
        match transition {
            AllocationTransition::AlreadyMember => self.already_member += 1,
            AllocationTransition::Joined => self.joined += 1,
            AllocationTransition::Created => self.created += 1,
        }
    }

    pub fn record_onboarding_refused(&mut self) {
        self.onboarding_refused += 1;
    }

    pub fn record_capacity_races(&mut self, races: u32) {
        self.capacity_races += u64::from(races);
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_group_completed(&mut self) {
        self.groups_completed += 1;
    }

    /// Calls that ended in a placement.
    pub fn total_placements(&self) -> u64 {
        self.already_member + self.joined + self.created
    }

    /// Share of placements that reused an existing group, 0 when none happened.
    pub fn join_rate(&self) -> f64 {
        let fresh = self.joined + self.created;
        if fresh == 0 {
            return 0.0;
        }
        self.joined as f64 / fresh as f64
    }
}
