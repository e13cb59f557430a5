use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgex_bookings::Booking;
use lodgex_core::{DomainError, DomainResult, Entity, FinanceRecordId, Money, PropertyId};

/// Category used for booking revenue.
pub const ACCOMMODATION: &str = "Accommodation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Revenue,
    Expense,
}

/// One ledger line.
///
/// `reference_id` is free-form: it may hold a booking, task or property id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
    pub id: FinanceRecordId,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub category: String,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub property_id: Option<PropertyId>,
}

impl Entity for FinanceRecord {
    type Id = FinanceRecordId;

    fn id(&self) -> FinanceRecordId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinanceRecord {
    /// Defaults to the day the record is added.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub category: String,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub property_id: Option<PropertyId>,
}

impl FinanceRecord {
    pub fn record(id: FinanceRecordId, input: NewFinanceRecord, today: NaiveDate) -> DomainResult<Self> {
        if input.description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        if input.kind == RecordKind::Revenue && input.amount < Money::ZERO {
            return Err(DomainError::validation("revenue amount cannot be negative"));
        }
        Ok(Self {
            id,
            date: input.date.unwrap_or(today),
            description: input.description,
            amount: input.amount,
            kind: input.kind,
            category: input.category,
            reference_id: input.reference_id,
            property_id: input.property_id,
        })
    }

    pub fn is_revenue(&self) -> bool {
        self.kind == RecordKind::Revenue
    }

    pub fn is_expense(&self) -> bool {
        self.kind == RecordKind::Expense
    }

    /// Magnitude of the line, whatever sign it was entered with.
    pub fn magnitude(&self) -> Money {
        self.amount.abs()
    }
}

/// Revenue line written when a booking is created.
pub fn revenue_for_booking(id: FinanceRecordId, booking: &Booking, today: NaiveDate) -> FinanceRecord {
    FinanceRecord {
        id,
        date: today,
        description: format!("Booking {} ({})", booking.reference, booking.channel),
        amount: booking.total_amount,
        kind: RecordKind::Revenue,
        category: ACCOMMODATION.to_string(),
        reference_id: Some(booking.id.to_string()),
        property_id: Some(booking.property_id),
    }
}

/// Revenue/expense totals over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub revenue: Money,
    /// Sum of absolute expense amounts.
    pub expenses: Money,
    pub net: Money,
}

impl LedgerTotals {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a FinanceRecord>) -> Self {
        let (revenue, expenses) = records.into_iter().fold((Money::ZERO, Money::ZERO), |(rev, exp), r| {
            match r.kind {
                RecordKind::Revenue => (rev + r.amount, exp),
                RecordKind::Expense => (rev, exp + r.magnitude()),
            }
        });
        Self {
            revenue,
            expenses,
            net: revenue - expenses,
        }
    }
}
