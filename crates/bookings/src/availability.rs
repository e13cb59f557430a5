use chrono::NaiveDate;

use lodgex_core::stay::overlaps;
use lodgex_core::{DomainError, DomainResult, PropertyId};

use crate::booking::Booking;

// ── Availability ──────────────────────────────────────────────────

/// First booking on `property_id` that holds dates overlapping `[start, end)`.
///
/// Cancelled bookings are ignored. Ordering of `start`/`end` is not validated here;
/// callers reject zero-length and inverted ranges beforehand.
pub fn find_conflict<'a, I>(
    bookings: I,
    property_id: PropertyId,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<&'a Booking>
where
    I: IntoIterator<Item = &'a Booking>,
{
    bookings.into_iter().find(|b| {
        b.property_id == property_id
            && b.holds_dates()
            && overlaps(start, end, b.check_in(), b.check_out())
    })
}

/// Whether `[start, end)` is free on `property_id`.
pub fn is_available<'a, I>(bookings: I, property_id: PropertyId, start: NaiveDate, end: NaiveDate) -> bool
where
    I: IntoIterator<Item = &'a Booking>,
{
    find_conflict(bookings, property_id, start, end).is_none()
}

/// Like [`is_available`], but returns a `Conflict` error naming the clashing booking.
pub fn ensure_available<'a, I>(
    bookings: I,
    property_id: PropertyId,
    start: NaiveDate,
    end: NaiveDate,
) -> DomainResult<()>
where
    I: IntoIterator<Item = &'a Booking>,
{
    match find_conflict(bookings, property_id, start, end) {
        None => Ok(()),
        Some(existing) => Err(DomainError::conflict(format!(
            "selected dates are not available for this property (overlaps booking {} from {} to {})",
            existing.reference,
            existing.check_in(),
            existing.check_out()
        ))),
    }
}
