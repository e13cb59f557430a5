use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgex_core::{BookingId, DomainError, DomainResult, Entity, GuestId, Money, PropertyId, StayRange};

/// Booking status lifecycle.
///
/// ```text
/// Pending ──► Confirmed ──► CheckedIn ──► Completed
///    │            │             │
///    └────────────┴─────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    #[serde(rename = "Checked In")]
    CheckedIn,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Statuses a booking may be created in.
    pub fn is_initial(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Whether `self → next` is a legal move. Staying in place is always allowed.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;

        if self == next {
            return true;
        }
        match (self, next) {
            (_, Cancelled) => !self.is_terminal(),
            (Pending, Confirmed) => true,
            (Confirmed, CheckedIn) => true,
            (CheckedIn, Completed) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::CheckedIn => "Checked In",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

impl core::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Partial,
    Refunded,
}

/// Sales channel the booking came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Airbnb,
    #[serde(rename = "Booking.com")]
    BookingCom,
    Direct,
    Vrbo,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Airbnb, Channel::BookingCom, Channel::Direct, Channel::Vrbo];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Airbnb => "Airbnb",
            Channel::BookingCom => "Booking.com",
            Channel::Direct => "Direct",
            Channel::Vrbo => "Vrbo",
        }
    }

    /// Resolve a channel from an integration name ("Airbnb", "Booking.com", ...).
    pub fn from_name(name: &str) -> Option<Channel> {
        Channel::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reservation of a property for a guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub reference: String,
    /// `None` when the guest is not in the directory (e.g. channel imports).
    pub guest_id: Option<GuestId>,
    pub guest_name: String,
    pub property_id: PropertyId,
    pub property_name: String,
    #[serde(flatten)]
    pub stay: StayRange,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: Money,
    pub channel: Channel,
}

impl Entity for Booking {
    type Id = BookingId;

    fn id(&self) -> BookingId {
        self.id
    }
}

/// Booking request as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub guest_name: String,
    #[serde(default)]
    pub guest_id: Option<GuestId>,
    pub property_id: PropertyId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default = "default_status")]
    pub status: BookingStatus,
    #[serde(default = "default_payment_status")]
    pub payment_status: PaymentStatus,
    /// When absent, the nightly price times the number of nights is used.
    #[serde(default)]
    pub total_amount: Option<Money>,
    #[serde(default = "default_channel")]
    pub channel: Channel,
    #[serde(default)]
    pub reference: Option<String>,
}

fn default_status() -> BookingStatus {
    BookingStatus::Confirmed
}

fn default_payment_status() -> PaymentStatus {
    PaymentStatus::Pending
}

fn default_channel() -> Channel {
    Channel::Direct
}

/// Values resolved by the caller from other collections before a booking is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingContext {
    pub reference: String,
    pub property_name: String,
    pub guest_id: Option<GuestId>,
    pub total_amount: Money,
}

/// Status/payment update (the only mutable parts of a booking).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl NewBooking {
    /// Validate date ordering. Must run before any availability check.
    pub fn stay(&self) -> DomainResult<StayRange> {
        StayRange::new(self.check_in, self.check_out)
    }
}

impl Booking {
    /// Build a new booking. Availability is the caller's concern (it needs the ledger).
    pub fn open(id: BookingId, input: NewBooking, ctx: BookingContext) -> DomainResult<Self> {
        let stay = input.stay()?;

        if input.guest_name.trim().is_empty() {
            return Err(DomainError::validation("guest name cannot be empty"));
        }
        if !input.status.is_initial() {
            return Err(DomainError::validation(format!(
                "a booking cannot be created as {}",
                input.status
            )));
        }
        if ctx.total_amount < Money::ZERO {
            return Err(DomainError::validation("total amount cannot be negative"));
        }

        Ok(Self {
            id,
            reference: ctx.reference,
            guest_id: input.guest_id.or(ctx.guest_id),
            guest_name: input.guest_name,
            property_id: input.property_id,
            property_name: ctx.property_name,
            stay,
            status: input.status,
            payment_status: input.payment_status,
            total_amount: ctx.total_amount,
            channel: input.channel,
        })
    }

    /// Apply a status/payment update, enforcing the lifecycle.
    pub fn updated(&self, update: &BookingUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(status) = update.status {
            if !self.status.can_transition_to(status) {
                return Err(DomainError::invariant(format!(
                    "booking {} cannot move from {} to {}",
                    self.reference, self.status, status
                )));
            }
            next.status = status;
        }
        if let Some(payment) = update.payment_status {
            next.payment_status = payment;
        }
        Ok(next)
    }

    pub fn check_in(&self) -> NaiveDate {
        self.stay.check_in()
    }

    pub fn check_out(&self) -> NaiveDate {
        self.stay.check_out()
    }

    pub fn nights(&self) -> i64 {
        self.stay.nights()
    }

    /// Cancelled bookings release their dates; every other status holds them.
    pub fn holds_dates(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn request(status: BookingStatus) -> NewBooking {
        NewBooking {
            guest_name: "Alice Johnson".to_string(),
            guest_id: None,
            property_id: PropertyId::new(),
            check_in: d("2023-10-25"),
            check_out: d("2023-10-28"),
            status,
            payment_status: PaymentStatus::Paid,
            total_amount: None,
            channel: Channel::Airbnb,
            reference: None,
        }
    }

    fn ctx() -> BookingContext {
        BookingContext {
            reference: "BK-7732".to_string(),
            property_name: "Downtown Luxury Loft".to_string(),
            guest_id: None,
            total_amount: Money(45_000),
        }
    }

    #[test]
    fn open_rejects_inverted_dates() {
        let mut input = request(BookingStatus::Confirmed);
        input.check_out = input.check_in;
        assert!(matches!(
            Booking::open(BookingId::new(), input, ctx()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn open_rejects_non_initial_status() {
        for status in [BookingStatus::CheckedIn, BookingStatus::Completed, BookingStatus::Cancelled] {
            assert!(Booking::open(BookingId::new(), request(status), ctx()).is_err());
        }
    }

    #[test]
    fn forward_path_is_allowed() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(CheckedIn));
        assert!(CheckedIn.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(CheckedIn.can_transition_to(Cancelled));
    }

    #[test]
    fn regressions_and_skips_are_rejected() {
        use BookingStatus::*;
        assert!(!CheckedIn.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(CheckedIn));
        assert!(!Confirmed.can_transition_to(Completed));
    }

    #[test]
    fn terminal_states_are_final() {
        use BookingStatus::*;
        for next in [Pending, Confirmed, CheckedIn] {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Completed));
    }

    #[test]
    fn payment_only_update_keeps_status() {
        let booking = Booking::open(BookingId::new(), request(BookingStatus::Pending), ctx()).unwrap();
        let updated = booking
            .updated(&BookingUpdate {
                status: None,
                payment_status: Some(PaymentStatus::Partial),
            })
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Pending);
        assert_eq!(updated.payment_status, PaymentStatus::Partial);
    }

    #[test]
    fn illegal_update_leaves_booking_untouched() {
        let booking = Booking::open(BookingId::new(), request(BookingStatus::Confirmed), ctx()).unwrap();
        let err = booking
            .updated(&BookingUpdate {
                status: Some(BookingStatus::Pending),
                payment_status: Some(PaymentStatus::Refunded),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(booking.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn json_uses_display_names_and_flat_dates() {
        let booking = Booking::open(BookingId::new(), request(BookingStatus::Confirmed), ctx()).unwrap();
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["checkIn"], "2023-10-25");
        assert_eq!(json["checkOut"], "2023-10-28");
        assert_eq!(json["channel"], "Airbnb");

        let back: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(back, booking);
    }

    #[test]
    fn channel_from_integration_name() {
        assert_eq!(Channel::from_name("Booking.com"), Some(Channel::BookingCom));
        assert_eq!(Channel::from_name("stripe"), None);
    }
}
