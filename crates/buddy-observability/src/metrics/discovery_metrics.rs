//! Discovery requests, degradations, and the distribution of served scores.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryMetrics {
    pub candidate_requests: u64,
    pub similar_requests: u64,
    pub degraded_responses: u64,
    /// Number of scores returned across all responses.
    pub scores_served: u64,
    score_sum: f64,
    score_min: Option<f64>,
    score_max: Option<f64>,
}

impl DiscoveryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_candidates(&mut self, scores: &[f64]) {
        self.candidate_requests += 1;
        self.record_scores(scores);
    }

    pub fn record_similar(&mut self, scores: &[f64]) {
        self.similar_requests += 1;
        self.record_scores(scores);
    }

    pub fn record_degraded(&mut self) {
        self.degraded_responses += 1;
    }

    fn record_scores(&mut self, scores: &[f64]) {
        for &s in scores {
            self.scores_served += 1;
            self.score_sum += s;
            self.score_min = Some(self.score_min.map_or(s, |m| m.min(s)));
            self.score_max = Some(self.score_max.map_or(s, |m| m.max(s)));
        }
    }

    pub fn mean_score(&self) -> f64 {
        if self.scores_served == 0 {
            return 0.0;
        }
        self.score_sum / self.scores_served as f64
    }

    pub fn min_score(&self) -> Option<f64> {
        self.score_min
    }

    pub fn max_score(&self) -> Option<f64> {
        self.score_max
    }
}
