mod allocation;
mod degradation_event;
mod group;
mod ids;
pub mod leisure;
pub mod loneliness;
mod mood;
mod profile;

pub use allocation::{AllocationOutcome, AllocationTransition, RankedProfile};
pub use degradation_event::DegradationEvent;
pub use group::{
    validate_capacity, BuddyGroup, GroupMembership, GroupStatus, MatchingCriteria, MemberRole,
    NewGroup,
};
pub use ids::{GroupId, UserId};
pub use leisure::{LeisureAssessment, LeisureCategory, LeisureWeights};
pub use loneliness::{LonelinessAssessment, LonelinessCategory};
pub use mood::MoodEntry;
pub use profile::{AssessmentPresence, UserProfile};
