//! Identity provider contract.
//!
//! Authentication itself happens in the shell; the core only asks who
//! is signed in right now.

use async_trait::async_trait;

use crate::gateway::SessionIdentity;

/// Supplies the current session identity, if any.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_identity(&self) -> Option<SessionIdentity>;
}

/// Fixed identity, for shells that resolve sign-in up front.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<SessionIdentity>);

impl StaticIdentity {
    pub fn signed_in(uid: impl Into<String>, contact: impl Into<String>) -> Self {
        Self(Some(SessionIdentity {
            uid: uid.into(),
            contact: contact.into(),
        }))
    }

    pub fn signed_out() -> Self {
        Self(None)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_identity(&self) -> Option<SessionIdentity> {
        self.0.clone()
    }
}
