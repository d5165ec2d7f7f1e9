use serde::{Deserialize, Serialize};

use super::defaults;

/// Candidate and similar-user discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Length of the ranked candidate list.
    pub max_candidates: usize,
    /// Length of the ranked similar-user list.
    pub max_similar_users: usize,
    /// Similar users scoring below this are dropped. 0 disables the cut.
    pub similar_min_score: f64,
    /// Upper bound on profiles loaded into one discovery pool.
    pub candidate_pool_limit: usize,
    /// Number of recent mood entries averaged into a profile.
    pub mood_window: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_candidates: defaults::DEFAULT_MAX_CANDIDATES,
            max_similar_users: defaults::DEFAULT_MAX_SIMILAR_USERS,
            similar_min_score: defaults::DEFAULT_SIMILAR_MIN_SCORE,
            candidate_pool_limit: defaults::DEFAULT_CANDIDATE_POOL_LIMIT,
            mood_window: defaults::DEFAULT_MOOD_WINDOW,
        }
    }
}
