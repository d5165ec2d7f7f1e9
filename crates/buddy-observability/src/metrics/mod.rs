//! Central metrics registry.
//!
//! [`MatchingMetrics`] owns the allocation and discovery collectors.

pub mod allocation_metrics;
pub mod discovery_metrics;

pub use allocation_metrics::AllocationMetrics;
pub use discovery_metrics::DiscoveryMetrics;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct MatchingMetrics {
    pub allocation: AllocationMetrics,
    pub discovery: DiscoveryMetrics,
}

impl MatchingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
