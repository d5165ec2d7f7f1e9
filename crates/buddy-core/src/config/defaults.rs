// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "buddy.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Scoring ---
pub const DEFAULT_LONELINESS_WEIGHT: f64 = 40.0;
pub const DEFAULT_LEISURE_WEIGHT: f64 = 60.0;
/// Category similarity indexed by ordinal distance 0..=3.
pub const DEFAULT_CATEGORY_SIMILARITY: [f64; 4] = [1.0, 0.7, 0.4, 0.1];
pub const DEFAULT_MISSING_CATEGORY_SIMILARITY: f64 = 0.4;
pub const DEFAULT_EMPTY_LEISURE_SIMILARITY: f64 = 0.5;
pub const DEFAULT_MIN_SCORE: f64 = 25.0;

// --- Allocation ---
pub const DEFAULT_GROUP_CAPACITY: u32 = crate::constants::GROUP_CAPACITY;
pub const DEFAULT_GROUP_MINIMUM: u32 = crate::constants::GROUP_MINIMUM;
pub const DEFAULT_MAX_CAPACITY_RETRIES: u32 = 1;
pub const DEFAULT_RANK_ELIGIBLE_GROUPS: bool = true;

// --- Discovery ---
pub const DEFAULT_MAX_CANDIDATES: usize = 20;
pub const DEFAULT_MAX_SIMILAR_USERS: usize = 10;
pub const DEFAULT_SIMILAR_MIN_SCORE: f64 = 0.0;
pub const DEFAULT_CANDIDATE_POOL_LIMIT: usize = 500;
pub const DEFAULT_MOOD_WINDOW: usize = crate::constants::MOOD_WINDOW;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
