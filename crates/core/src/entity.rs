//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every record kept in a store collection is an entity: stores look records up,
/// replace them and remove them by this identifier.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
