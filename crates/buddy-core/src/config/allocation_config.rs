use serde::{Deserialize, Serialize};

use super::defaults;

/// Group allocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Maximum members per group. Default: 5.
    pub group_capacity: u32,
    /// Size at which a group counts as complete. Default: 3.
    pub group_minimum: u32,
    /// How many times a lost join race re-runs group selection before creating. Default: 1.
    pub max_capacity_retries: u32,
    /// Rank eligible groups by mean compatibility with their members. Default: true.
    pub rank_eligible_groups: bool,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            group_capacity: defaults::DEFAULT_GROUP_CAPACITY,
            group_minimum: defaults::DEFAULT_GROUP_MINIMUM,
            max_capacity_retries: defaults::DEFAULT_MAX_CAPACITY_RETRIES,
            rank_eligible_groups: defaults::DEFAULT_RANK_ELIGIBLE_GROUPS,
        }
    }
}
