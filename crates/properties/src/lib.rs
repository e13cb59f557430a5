//! Property catalog domain module.
//!
//! Properties (rentable units owned by an owner) and the documents attached to them,
//! implemented as deterministic domain logic (no IO, no HTTP, no storage).

pub mod document;
pub mod property;

pub use document::{DocumentKind, NewPropertyDocument, PropertyDocument};
pub use property::{NewProperty, Property, PropertyStatus, PropertyUpdate};
