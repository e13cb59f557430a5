//! Booking ledger domain module.
//!
//! Bookings reserve a property for a guest over a half-open `[check_in, check_out)`
//! date range. This crate owns the two rules that matter:
//!
//! - **Availability**: no two non-cancelled bookings on one property may overlap.
//! - **Lifecycle**: `Pending → Confirmed → CheckedIn → Completed`, with `Cancelled`
//!   reachable from any non-terminal state, and no regressions.
//!
//! Pure domain logic: no IO, no HTTP, no storage.

pub mod availability;
pub mod booking;

pub use availability::{ensure_available, find_conflict, is_available};
pub use booking::{
    Booking, BookingContext, BookingStatus, BookingUpdate, Channel, NewBooking, PaymentStatus,
};
