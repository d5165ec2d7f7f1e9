use super::{ConfigError, StorageError};

/// Top-level error for every matching operation.
#[derive(Debug, thiserror::Error)]
pub enum BuddyError {
    /// No caller identity was supplied by the identity collaborator.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The caller has not completed the assessments required for allocation.
    #[error("onboarding incomplete for {user_id}: missing {missing:?}")]
    OnboardingIncomplete {
        user_id: String,
        missing: Vec<String>,
    },

    /// A membership write lost a race against a concurrent join.
    #[error("group {group_id} filled concurrently")]
    CapacityRace { group_id: String },

    /// The persistence collaborator failed.
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(#[from] StorageError),

    #[error("group not found: {group_id}")]
    GroupNotFound { group_id: String },

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BuddyError {
    /// Whether re-running the same request may succeed without user action.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::CapacityRace { .. } => true,
            Self::PersistenceUnavailable(inner) => !matches!(
                inner,
                StorageError::MigrationFailed { .. } | StorageError::LockPoisoned { .. }
            ),
            _ => false,
        }
    }

    /// Short message suitable for showing to the end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "Please sign in to continue.",
            Self::OnboardingIncomplete { .. } => {
                "Finish your assessments first so we can find your buddies."
            }
            Self::CapacityRace { .. } => "That group just filled up. Please try again.",
            Self::PersistenceUnavailable(_) => {
                "We couldn't reach the server. Please try again in a moment."
            }
            Self::GroupNotFound { .. } => "That group no longer exists.",
            Self::ValidationError(_) => "Some of your answers look invalid. Please check them.",
            Self::ConfigError(_) | Self::SerializationError(_) => "Something went wrong.",
        }
    }
}
