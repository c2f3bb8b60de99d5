//! `stockroom-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the shared error model, strongly-typed identifiers, and the small traits the
//! domain crates implement.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Entity, ValueObject};
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
