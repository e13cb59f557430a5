//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute values are
/// the same value. They are immutable; "changing" one means building a new one.
///
/// - **Value Object**: `Money(45_000)`, a `StayRange` from 2023-10-01 to 2023-10-05
/// - **Entity**: a `Booking` with its `BookingId`
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
