use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use lodgex_bookings::Booking;
use lodgex_core::{BookingId, Money, OwnerId, PropertyId};
use lodgex_parties::Owner;
use lodgex_properties::Property;
use lodgex_tasks::Task;

use crate::record::FinanceRecord;

/// Management fee retained from gross revenue: 20%.
pub const MANAGEMENT_FEE_BPS: i64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementProperty {
    pub id: PropertyId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueItem {
    pub booking_id: BookingId,
    pub reference: String,
    pub property_id: PropertyId,
    pub property_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStatement {
    pub owner_id: OwnerId,
    pub owner_name: String,
    pub properties: Vec<StatementProperty>,
    pub revenue_items: Vec<RevenueItem>,
    pub expense_items: Vec<FinanceRecord>,
    pub gross_revenue: Money,
    pub management_fee: Money,
    /// Sum of absolute expense amounts.
    pub expenses: Money,
    pub net_payout: Money,
}

/// `(fee, net)` for a gross revenue and an expense total: `net = gross - 20% - expenses`.
pub fn payout(gross: Money, expenses: Money) -> (Money, Money) {
    let fee = gross.share_bps(MANAGEMENT_FEE_BPS);
    (fee, gross - fee - expenses.abs())
}

/// Build the payout statement for `owner`.
///
/// Revenue is the total of every non-cancelled booking on the owner's properties.
/// An expense is attributed to the owner when its `property_id` is one of their
/// properties, or, lacking a property id, when its `reference_id` names one of their
/// properties, a booking on one of them, or a task on one of them.
pub fn owner_statement(
    owner: &Owner,
    properties: &[Property],
    bookings: &[Booking],
    tasks: &[Task],
    finance: &[FinanceRecord],
) -> OwnerStatement {
    let owned: Vec<&Property> = properties.iter().filter(|p| p.owner_id == owner.id).collect();
    let owned_ids: HashSet<PropertyId> = owned.iter().map(|p| p.id).collect();

    let owned_bookings: Vec<&Booking> = bookings
        .iter()
        .filter(|b| owned_ids.contains(&b.property_id))
        .collect();

    let revenue_items: Vec<RevenueItem> = owned_bookings
        .iter()
        .filter(|b| b.holds_dates())
        .map(|b| RevenueItem {
            booking_id: b.id,
            reference: b.reference.clone(),
            property_id: b.property_id,
            property_name: b.property_name.clone(),
            check_in: b.check_in(),
            check_out: b.check_out(),
            amount: b.total_amount,
        })
        .collect();

    // Any booking on an owned property (cancelled included) can carry expenses.
    let references: HashSet<String> = owned_ids
        .iter()
        .map(ToString::to_string)
        .chain(owned_bookings.iter().map(|b| b.id.to_string()))
        .chain(
            tasks
                .iter()
                .filter(|t| owned_ids.contains(&t.property_id))
                .map(|t| t.id.to_string()),
        )
        .collect();

    let expense_items: Vec<FinanceRecord> = finance
        .iter()
        .filter(|r| r.is_expense())
        .filter(|r| match (r.property_id, r.reference_id.as_deref()) {
            (Some(pid), _) => owned_ids.contains(&pid),
            (None, Some(reference)) => references.contains(reference),
            (None, None) => false,
        })
        .cloned()
        .collect();

    let gross_revenue: Money = revenue_items.iter().map(|i| i.amount).sum();
    let expenses: Money = expense_items.iter().map(FinanceRecord::magnitude).sum();
    let (management_fee, net_payout) = payout(gross_revenue, expenses);

    OwnerStatement {
        owner_id: owner.id,
        owner_name: owner.name.clone(),
        properties: owned
            .iter()
            .map(|p| StatementProperty {
                id: p.id,
                name: p.name.clone(),
                code: p.code.clone(),
            })
            .collect(),
        revenue_items,
        expense_items,
        gross_revenue,
        management_fee,
        expenses,
        net_payout,
    }
}
