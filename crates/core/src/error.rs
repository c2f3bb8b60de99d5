//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a recoverable, expected condition the calling layer maps
/// to user feedback. Infrastructure concerns (file I/O, parse failures)
/// belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty name, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A stock removal asked for more units than are on hand.
    ///
    /// Carries both counts so the caller can render an actionable message.
    #[error("insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: u64, requested: u64 },

    /// No product with the given id exists in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A product with the given id is already in the catalog.
    #[error("duplicate product: {0}")]
    DuplicateProduct(ProductId),

    /// Bad credentials.
    ///
    /// A single message for unknown usernames and wrong passwords alike;
    /// the stored hash never appears here.
    #[error("invalid username or password")]
    Authentication,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_stock(available: u64, requested: u64) -> Self {
        Self::InsufficientStock {
            available,
            requested,
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
