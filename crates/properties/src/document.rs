use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgex_core::{DocumentId, DomainError, DomainResult, Entity, PropertyId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Contract,
    Invoice,
    Photo,
    Other,
}

/// Metadata for a file attached to a property. The file itself lives elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDocument {
    pub id: DocumentId,
    pub property_id: PropertyId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub url: String,
    pub upload_date: NaiveDate,
    pub size: String,
}

impl Entity for PropertyDocument {
    type Id = DocumentId;

    fn id(&self) -> DocumentId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPropertyDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub url: String,
    #[serde(default)]
    pub size: String,
}

impl PropertyDocument {
    pub fn attach(
        id: DocumentId,
        property_id: PropertyId,
        input: NewPropertyDocument,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("document name cannot be empty"));
        }
        Ok(Self {
            id,
            property_id,
            name: input.name,
            kind: input.kind,
            url: input.url,
            upload_date: today,
            size: input.size,
        })
    }
}
