use serde::{Deserialize, Serialize};

use lodgex_core::UserId;

use crate::{permissions_for_role, JwtClaims, Permission, Role};

/// A fully resolved principal for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
}

impl Principal {
    pub fn new(user_id: UserId, name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            name: name.into(),
            role,
            permissions: permissions_for_role(role),
        }
    }

    pub fn from_claims(claims: &JwtClaims) -> Self {
        Self::new(claims.sub, claims.name.clone(), claims.role)
    }
}
