use lodgex_auth::{Permission, Principal, Role};
use lodgex_core::UserId;

/// Authenticated caller for a request, inserted by the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_id(&self) -> UserId {
        self.principal.user_id
    }

    /// Display name, used as the actor in audit entries.
    pub fn name(&self) -> &str {
        &self.principal.name
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.principal.permissions
    }
}
