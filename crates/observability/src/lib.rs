//! `stockroom-observability` — shared tracing/logging setup.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use tracing::init;
