//! Structured log events for key matching operations.

/// A user was placed: joined, created, or already a member.
pub fn allocation_completed(user_id: &str, group_id: &str, transition: &str, member_count: u32) {
    tracing::info!(
        event = "allocation_completed",
        user_id = %user_id,
        group_id = %group_id,
        transition = %transition,
        member_count = member_count,
        "allocation completed"
    );
}

/// A join lost the race for the last seat.
pub fn capacity_race(user_id: &str, group_id: &str, attempt: u32) {
    tracing::info!(
        event = "capacity_race",
        user_id = %user_id,
        group_id = %group_id,
        attempt = attempt,
        "group filled before join"
    );
}

/// Allocation refused because an assessment is missing.
pub fn onboarding_refused(user_id: &str, missing: &[String]) {
    tracing::info!(
        event = "onboarding_refused",
        user_id = %user_id,
        missing = ?missing,
        "allocation refused, onboarding incomplete"
    );
}

pub fn discovery_served(kind: &str, user_id: &str, returned: usize, pool_size: usize) {
    tracing::debug!(
        event = "discovery_served",
        kind = %kind,
        user_id = %user_id,
        returned = returned,
        pool_size = pool_size,
        "discovery served"
    );
}

/// A component fell back to a degraded result.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}
