use serde::{Deserialize, Serialize};

use lodgex_core::{DomainError, DomainResult, Entity, Money, OwnerId, PropertyId};

/// Property status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyStatus {
    Active,
    Inactive,
    Maintenance,
}

/// A rentable property (one listing; `units` > 1 for multi-unit complexes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub code: String,
    pub address: String,
    pub status: PropertyStatus,
    #[serde(default)]
    pub image_url: String,
    pub units: u32,
    pub owner_id: OwnerId,
    pub price_per_night: Money,
    pub unit_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for Property {
    type Id = PropertyId;

    fn id(&self) -> PropertyId {
        self.id
    }
}

/// Input for registering a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub name: String,
    pub code: String,
    pub address: String,
    #[serde(default = "default_status")]
    pub status: PropertyStatus,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_units")]
    pub units: u32,
    pub owner_id: OwnerId,
    pub price_per_night: Money,
    pub unit_type: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_status() -> PropertyStatus {
    PropertyStatus::Active
}

fn default_units() -> u32 {
    1
}

/// Partial update; `None` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
    pub status: Option<PropertyStatus>,
    pub image_url: Option<String>,
    pub units: Option<u32>,
    pub owner_id: Option<OwnerId>,
    pub price_per_night: Option<Money>,
    pub unit_type: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub description: Option<String>,
}

impl Property {
    pub fn register(id: PropertyId, input: NewProperty) -> DomainResult<Self> {
        let property = Self {
            id,
            name: input.name,
            code: input.code,
            address: input.address,
            status: input.status,
            image_url: input.image_url,
            units: input.units,
            owner_id: input.owner_id,
            price_per_night: input.price_per_night,
            unit_type: input.unit_type,
            amenities: input.amenities,
            description: input.description,
        };
        property.validate()?;
        Ok(property)
    }

    /// Apply a partial update, returning the updated record.
    ///
    /// The receiver is left untouched if validation fails.
    pub fn updated(&self, update: PropertyUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(v) = update.name {
            next.name = v;
        }
        if let Some(v) = update.code {
            next.code = v;
        }
        if let Some(v) = update.address {
            next.address = v;
        }
        if let Some(v) = update.status {
            next.status = v;
        }
        if let Some(v) = update.image_url {
            next.image_url = v;
        }
        if let Some(v) = update.units {
            next.units = v;
        }
        if let Some(v) = update.owner_id {
            next.owner_id = v;
        }
        if let Some(v) = update.price_per_night {
            next.price_per_night = v;
        }
        if let Some(v) = update.unit_type {
            next.unit_type = v;
        }
        if let Some(v) = update.amenities {
            next.amenities = v;
        }
        if update.description.is_some() {
            next.description = update.description;
        }
        next.validate()?;
        Ok(next)
    }

    /// Only active properties accept new bookings from channel syncs.
    pub fn is_bookable(&self) -> bool {
        self.status == PropertyStatus::Active
    }

    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        if self.units == 0 {
            return Err(DomainError::validation("units must be at least 1"));
        }
        if self.price_per_night < Money::ZERO {
            return Err(DomainError::validation("price per night cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loft() -> NewProperty {
        NewProperty {
            name: "Downtown Luxury Loft".to_string(),
            code: "DT-001".to_string(),
            address: "123 Main St, Downtown".to_string(),
            status: PropertyStatus::Active,
            image_url: String::new(),
            units: 1,
            owner_id: OwnerId::new(),
            price_per_night: Money(15_000),
            unit_type: "Loft".to_string(),
            amenities: vec!["Wifi".to_string()],
            description: None,
        }
    }

    #[test]
    fn register_rejects_blank_name() {
        let mut input = loft();
        input.name = "  ".to_string();
        assert!(matches!(
            Property::register(PropertyId::new(), input),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let property = Property::register(PropertyId::new(), loft()).unwrap();
        let updated = property
            .updated(PropertyUpdate {
                price_per_night: Some(Money(17_500)),
                ..PropertyUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.price_per_night, Money(17_500));
        assert_eq!(updated.name, property.name);
        assert_eq!(updated.amenities, property.amenities);
    }

    #[test]
    fn update_with_zero_units_is_rejected() {
        let property = Property::register(PropertyId::new(), loft()).unwrap();
        let result = property.updated(PropertyUpdate {
            units: Some(0),
            ..PropertyUpdate::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn new_property_defaults_status_and_units() {
        let json = serde_json::json!({
            "name": "Cabin",
            "code": "MT-105",
            "address": "789 Pine Way",
            "ownerId": OwnerId::new(),
            "pricePerNight": 12000,
            "unitType": "Cabin"
        });
        let input: NewProperty = serde_json::from_value(json).unwrap();
        assert_eq!(input.status, PropertyStatus::Active);
        assert_eq!(input.units, 1);
    }
}
