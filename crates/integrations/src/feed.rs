//! Channel booking feed.
//!
//! A feed returns one external booking for a listing. The simulated feed stands in
//! for the channel APIs, which are not wired up.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use lodgex_bookings::{BookingStatus, Channel, NewBooking, PaymentStatus};
use lodgex_core::{Money, PropertyId};

/// The property a feed should book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub property_id: PropertyId,
    pub property_name: String,
    pub price_per_night: Money,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("channel feed unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ChannelFeed: Send + Sync {
    /// Fetch the next external booking for `listing`, as seen on `today`.
    async fn next_booking(
        &self,
        channel: Channel,
        listing: &Listing,
        today: NaiveDate,
    ) -> Result<NewBooking, FeedError>;
}

/// Random future bookings: check-in 5 to 34 days out, 2 to 8 nights, confirmed and paid.
#[derive(Debug)]
pub struct SimulatedChannelFeed {
    rng: Mutex<StdRng>,
}

impl SimulatedChannelFeed {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic feed for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn draw(&self) -> Result<(u64, u64, u32), FeedError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| FeedError::Unavailable("feed state poisoned".to_string()))?;
        Ok((rng.gen_range(5..35), rng.gen_range(2..9), rng.gen_range(0..10_000)))
    }
}

impl Default for SimulatedChannelFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelFeed for SimulatedChannelFeed {
    async fn next_booking(
        &self,
        channel: Channel,
        listing: &Listing,
        today: NaiveDate,
    ) -> Result<NewBooking, FeedError> {
        let (lead_days, nights, reference) = self.draw()?;

        let check_in = today
            .checked_add_days(Days::new(lead_days))
            .ok_or_else(|| FeedError::Unavailable("check-in date out of range".to_string()))?;
        let check_out = check_in
            .checked_add_days(Days::new(nights))
            .ok_or_else(|| FeedError::Unavailable("check-out date out of range".to_string()))?;

        Ok(NewBooking {
            guest_name: format!("Guest from {channel}"),
            guest_id: None,
            property_id: listing.property_id,
            check_in,
            check_out,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            // `None` on overflow; the booking path then refuses the total.
            total_amount: listing.price_per_night.checked_times(nights as i64),
            channel,
            reference: Some(format!("EXT-{reference:04}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Listing {
        Listing {
            property_id: PropertyId::new(),
            property_name: "Seaside Villa Retreat".to_string(),
            price_per_night: Money(30_000),
        }
    }

    #[tokio::test]
    async fn simulated_bookings_stay_within_bounds() {
        let feed = SimulatedChannelFeed::seeded(7);
        let today = NaiveDate::from_ymd_opt(2023, 10, 30).unwrap();
        let listing = listing();

        for _ in 0..200 {
            let b = feed.next_booking(Channel::Airbnb, &listing, today).await.unwrap();
            let lead = (b.check_in - today).num_days();
            let nights = (b.check_out - b.check_in).num_days();

            assert!((5..=34).contains(&lead), "lead {lead}");
            assert!((2..=8).contains(&nights), "nights {nights}");
            assert_eq!(b.total_amount, Some(Money(30_000 * nights)));
            assert_eq!(b.status, BookingStatus::Confirmed);
            assert_eq!(b.payment_status, PaymentStatus::Paid);
            assert_eq!(b.channel, Channel::Airbnb);
            assert!(b.reference.as_deref().unwrap_or_default().starts_with("EXT-"));
        }
    }

    #[tokio::test]
    async fn guest_name_names_the_channel() {
        let feed = SimulatedChannelFeed::seeded(1);
        let today = NaiveDate::from_ymd_opt(2023, 10, 30).unwrap();
        let b = feed.next_booking(Channel::BookingCom, &listing(), today).await.unwrap();
        assert_eq!(b.guest_name, "Guest from Booking.com");
    }
}
