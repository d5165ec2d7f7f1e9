//! Span definitions per operation: allocation, discovery, profile building.

/// Span around one `find_or_create_group` call.
#[macro_export]
macro_rules! allocation_span {
    ($user_id:expr) => {
        tracing::info_span!("buddy.allocation", user_id = %$user_id)
    };
}

/// Span around a candidate or similar-user lookup.
#[macro_export]
macro_rules! discovery_span {
    ($kind:expr, $user_id:expr) => {
        tracing::info_span!("buddy.discovery", kind = %$kind, user_id = %$user_id)
    };
}

#[macro_export]
macro_rules! profile_span {
    ($user_id:expr) => {
        tracing::debug_span!("buddy.profile", user_id = %$user_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ALLOCATION: &str = "buddy.allocation";
    pub const DISCOVERY: &str = "buddy.discovery";
    pub const PROFILE: &str = "buddy.profile";
}
