use serde::{Deserialize, Serialize};

use lodgex_core::{DomainResult, Entity, OwnerId};

use crate::contact::{require_name, ContactInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerStatus {
    Active,
    Inactive,
}

/// A property owner (payout statement recipient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub properties_count: u32,
    pub status: OwnerStatus,
}

impl Entity for Owner {
    type Id = OwnerId;

    fn id(&self) -> OwnerId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
}

impl Owner {
    /// New owners start active with no properties.
    pub fn register(id: OwnerId, input: NewOwner) -> DomainResult<Self> {
        require_name(&input.name)?;
        input.contact.validate()?;
        Ok(Self {
            id,
            name: input.name,
            contact: input.contact,
            properties_count: 0,
            status: OwnerStatus::Active,
        })
    }
}
