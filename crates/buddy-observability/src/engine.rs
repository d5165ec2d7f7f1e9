//! [`ObservabilityEngine`]: owns the metrics and degradation subsystems.

use buddy_core::errors::BuddyResult;
use buddy_core::models::DegradationEvent;

use crate::degradation::DegradationTracker;
use crate::metrics::MatchingMetrics;

#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub metrics: MatchingMetrics,
    pub degradation: DegradationTracker,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_degradation(&mut self, event: DegradationEvent) {
        self.metrics.discovery.record_degraded();
        self.degradation.record(event);
    }

    /// Close out degradations of `component` after a successful call.
    pub fn mark_recovered(&mut self, component: &str) {
        if self.degradation.is_degraded(component) {
            let closed = self.degradation.mark_recovered(component);
            tracing::info!(component, closed, "component recovered");
        }
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Current metrics and degradation state as JSON.
    pub fn metrics_snapshot(&self) -> BuddyResult<serde_json::Value> {
        let metrics = serde_json::to_value(&self.metrics)?;
        Ok(serde_json::json!({
            "metrics": metrics,
            "mean_served_score": self.metrics.discovery.mean_score(),
            "active_degradations": self.degradation.active_degradations().len(),
        }))
    }
}
