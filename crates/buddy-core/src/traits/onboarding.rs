use crate::errors::BuddyResult;
use crate::models::UserId;

/// Answers whether a user has completed both assessments.
pub trait IOnboardingGate: Send + Sync {
    fn has_completed_onboarding(&self, user_id: &UserId) -> BuddyResult<bool>;
}
