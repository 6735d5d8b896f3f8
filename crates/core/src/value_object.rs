//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined
//! entirely by their attribute values. Two value objects with the same values are
//! considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. They represent
/// concepts where identity doesn't matter - only the values matter.
///
/// - **Value Object**: no identity (`Money` of 175.00 equals any other 175.00;
///   a finalized selection equals any structurally identical selection).
/// - **Entity**: has identity (two cart lines with the same `CartItemId` are
///   the same line, whatever their current quantity).
///
/// To "modify" a value object, create a new one with the new values. This keeps
/// value objects safe to share and lets structural equality drive domain rules
/// such as cart-line merging.
///
/// The trait requires:
/// - **Clone**: value objects should be cheap to copy
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: helpful for logging and testing
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
