use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgex_core::{DomainError, DomainResult, Entity, GuestId, Money};

use crate::contact::{require_name, ContactInfo};

/// A guest in the directory, with denormalised stay statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
    pub total_stays: u32,
    pub total_spent: Money,
    pub last_stay: Option<NaiveDate>,
    /// 1..=5
    pub rating: u8,
}

impl Entity for Guest {
    type Id = GuestId;

    fn id(&self) -> GuestId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuest {
    pub name: String,
    #[serde(flatten)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub total_stays: u32,
    #[serde(default)]
    pub total_spent: Money,
    #[serde(default)]
    pub last_stay: Option<NaiveDate>,
    #[serde(default = "default_rating")]
    pub rating: u8,
}

fn default_rating() -> u8 {
    5
}

impl Guest {
    pub fn register(id: GuestId, input: NewGuest) -> DomainResult<Self> {
        require_name(&input.name)?;
        input.contact.validate()?;
        if !(1..=5).contains(&input.rating) {
            return Err(DomainError::validation("rating must be between 1 and 5"));
        }
        Ok(Self {
            id,
            name: input.name,
            contact: input.contact,
            total_stays: input.total_stays,
            total_spent: input.total_spent,
            last_stay: input.last_stay,
            rating: input.rating,
        })
    }

    /// Case-insensitive exact name match, used to link new bookings to a guest.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> NewGuest {
        NewGuest {
            name: "Alice Johnson".to_string(),
            contact: ContactInfo::new("alice@test.com", "+1 555 9999"),
            total_stays: 3,
            total_spent: Money(150_000),
            last_stay: None,
            rating: 5,
        }
    }

    #[test]
    fn rating_out_of_range_is_rejected() {
        let mut input = alice();
        input.rating = 6;
        assert!(Guest::register(GuestId::new(), input).is_err());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut input = alice();
        input.contact.email = "alice.test.com".to_string();
        assert!(Guest::register(GuestId::new(), input).is_err());
    }

    #[test]
    fn name_match_ignores_case_and_padding() {
        let guest = Guest::register(GuestId::new(), alice()).unwrap();
        assert!(guest.matches_name(" alice johnson "));
        assert!(!guest.matches_name("Alice"));
    }

    #[test]
    fn contact_is_flattened_in_json() {
        let guest = Guest::register(GuestId::new(), alice()).unwrap();
        let json = serde_json::to_value(&guest).unwrap();
        assert_eq!(json["email"], "alice@test.com");
        assert_eq!(json["totalStays"], 3);
    }
}
