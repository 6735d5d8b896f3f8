//! `fotoforma-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the `Money` value object, and the shared error
//! model used by the selection/pricing engine.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CartItemId, CustomerId, EventId, InstitutionId, OrderId, PhotoId, ProductId};
pub use money::Money;
pub use value_object::ValueObject;
