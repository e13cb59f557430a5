use serde::{Deserialize, Serialize};

use lodgex_core::{DomainError, DomainResult};

/// Contact details shared by guests, owners and staff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactInfo {
    pub fn new(email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Email is optional, but when present it must look like an address.
    pub fn validate(&self) -> DomainResult<()> {
        let email = self.email.trim();
        if !email.is_empty() && !email.contains('@') {
            return Err(DomainError::validation(format!("invalid email: {email}")));
        }
        Ok(())
    }
}

pub(crate) fn require_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    Ok(())
}
