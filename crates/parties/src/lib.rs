//! Parties domain module: guests, property owners and staff.
//!
//! This crate contains business rules for the people the CRM tracks,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod contact;
pub mod guest;
pub mod owner;
pub mod staff;

pub use contact::ContactInfo;
pub use guest::{Guest, NewGuest};
pub use owner::{NewOwner, Owner, OwnerStatus};
pub use staff::{
    NewStaffMember, StaffDocument, StaffDocumentKind, StaffMember, StaffRole, StaffStatus,
    StaffUpdate,
};
