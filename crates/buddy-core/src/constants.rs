/// Engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of Likert items in the loneliness survey.
pub const LONELINESS_ITEM_COUNT: usize = 6;

/// Lowest answer on a loneliness Likert item.
pub const LIKERT_MIN: u8 = 1;

/// Highest answer on a loneliness Likert item.
pub const LIKERT_MAX: u8 = 4;

/// Lowest attainable loneliness score (6 × 1).
pub const LONELINESS_SCORE_MIN: u32 = LONELINESS_ITEM_COUNT as u32 * LIKERT_MIN as u32;

/// Highest attainable loneliness score (6 × 4).
pub const LONELINESS_SCORE_MAX: u32 = LONELINESS_ITEM_COUNT as u32 * LIKERT_MAX as u32;

/// Neutral mid-scale loneliness score used when no assessment exists.
pub const DEFAULT_LONELINESS_SCORE: u32 = 15;

/// Number of leisure categories kept in a profile's top list.
pub const TOP_LEISURE_COUNT: usize = 3;

/// Mood scale bounds.
pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 5;

/// Mood average used when a user has no mood entries.
pub const DEFAULT_MOOD_AVERAGE: f64 = 3.0;

/// Number of recent mood entries averaged into a profile.
pub const MOOD_WINDOW: usize = 10;

/// Hard ceiling on buddy group size.
pub const GROUP_CAPACITY: u32 = 5;

/// Size at which a group is considered complete. Smaller groups keep recruiting.
pub const GROUP_MINIMUM: u32 = 3;
