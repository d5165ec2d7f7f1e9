use crate::models::UserId;

/// Supplies the identity of the current caller. The engine never authenticates.
pub trait IIdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// Fixed identity, for embedding callers that already resolved the session.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<UserId>);

impl IIdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.0.clone()
    }
}
