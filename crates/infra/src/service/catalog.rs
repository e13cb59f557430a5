//! Properties and their documents.

use tracing::instrument;

use lodgex_activity::{ArchivedItem, ArchivedRecord, AuditAction, Level};
use lodgex_core::{ArchiveId, DocumentId, DomainError, PropertyId};
use lodgex_properties::{NewProperty, NewPropertyDocument, Property, PropertyDocument, PropertyUpdate};

use super::CrmService;
use crate::error::ServiceResult;
use crate::remote::Collection;

impl CrmService {
    pub fn list_properties(&self) -> ServiceResult<Vec<Property>> {
        Ok(self.store.properties().list()?)
    }

    pub fn get_property(&self, id: PropertyId) -> ServiceResult<Property> {
        self.store
            .properties()
            .get(id)?
            .ok_or_else(|| DomainError::not_found(format!("property {id}")).into())
    }

    #[instrument(skip(self, input), fields(code = %input.code), err)]
    pub async fn create_property(&self, actor: &str, input: NewProperty) -> ServiceResult<Property> {
        if self.store.owners().get(input.owner_id)?.is_none() {
            return Err(DomainError::not_found(format!("owner {}", input.owner_id)).into());
        }
        let property = Property::register(PropertyId::new(), input)?;
        self.store.properties().upsert(property.clone())?;
        self.mirror(Collection::Properties, &property).await;

        self.audit(actor, AuditAction::Create, "Property", format!("Added property {}", property.name))
            .await?;
        Ok(property)
    }

    #[instrument(skip(self, update), fields(property_id = %id), err)]
    pub async fn update_property(&self, actor: &str, id: PropertyId, update: PropertyUpdate) -> ServiceResult<Property> {
        let property = self.get_property(id)?.updated(update)?;
        self.store.properties().upsert(property.clone())?;
        self.mirror(Collection::Properties, &property).await;

        self.audit(actor, AuditAction::Update, "Property", format!("Updated property {}", property.name))
            .await?;
        Ok(property)
    }

    /// Move a property into the archive.
    #[instrument(skip(self), fields(property_id = %id), err)]
    pub async fn delete_property(&self, actor: &str, id: PropertyId) -> ServiceResult<ArchivedItem> {
        let property = self
            .store
            .properties()
            .remove(id)?
            .ok_or_else(|| DomainError::not_found(format!("property {id}")))?;
        let name = property.name.clone();

        let item = ArchivedItem::archive(ArchiveId::new(), ArchivedRecord::Property(property), actor, Self::now());
        self.store.archive().upsert(item.clone())?;
        self.mirror_delete(Collection::Properties, id).await;
        self.mirror(Collection::Archive, &item).await;

        self.audit(actor, AuditAction::Delete, "Property", format!("Deleted property {name}"))
            .await?;
        self.notify("Property Deleted", "Property moved to archive", Level::Warning)
            .await?;
        Ok(item)
    }

    pub fn list_documents(&self, property_id: PropertyId) -> ServiceResult<Vec<PropertyDocument>> {
        self.get_property(property_id)?;
        let docs = self.store.documents().list()?;
        Ok(docs.into_iter().filter(|d| d.property_id == property_id).collect())
    }

    #[instrument(skip(self, input), fields(property_id = %property_id), err)]
    pub async fn add_document(
        &self,
        actor: &str,
        property_id: PropertyId,
        input: NewPropertyDocument,
    ) -> ServiceResult<PropertyDocument> {
        self.get_property(property_id)?;
        let doc = PropertyDocument::attach(DocumentId::new(), property_id, input, Self::today())?;
        self.store.documents().upsert(doc.clone())?;
        self.mirror(Collection::Documents, &doc).await;

        self.audit(actor, AuditAction::Create, "Document", format!("Uploaded document: {}", doc.name))
            .await?;
        Ok(doc)
    }

    #[instrument(skip(self), fields(document_id = %id), err)]
    pub async fn delete_document(&self, actor: &str, id: DocumentId) -> ServiceResult<()> {
        self.store
            .documents()
            .remove(id)?
            .ok_or_else(|| DomainError::not_found(format!("document {id}")))?;
        self.mirror_delete(Collection::Documents, id).await;

        self.audit(actor, AuditAction::Delete, "Document", format!("Deleted document: {id}"))
            .await?;
        Ok(())
    }
}
