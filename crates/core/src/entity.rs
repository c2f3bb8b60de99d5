//! Entity and value-object traits.

/// Entity marker + minimal interface: identity that persists across state
/// changes.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Marker trait for value objects: compared by value, no identity.
///
/// Two value objects with the same attribute values are the same value.
/// Implementors are expected to be immutable once constructed.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
