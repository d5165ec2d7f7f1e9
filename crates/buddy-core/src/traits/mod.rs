mod assessment_store;
mod group_store;
mod identity;
mod onboarding;

pub use assessment_store::IAssessmentStore;
pub use group_store::IGroupStore;
pub use identity::{IIdentityProvider, StaticIdentity};
pub use onboarding::IOnboardingGate;

/// Everything the matching engine needs from persistence.
pub trait MatchingStore: IAssessmentStore + IGroupStore + IOnboardingGate {}

impl<T> MatchingStore for T where T: IAssessmentStore + IGroupStore + IOnboardingGate {}
