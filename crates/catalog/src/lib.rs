//! Catalog domain module.
//!
//! An in-memory collection of products keyed by id, with the read-side
//! projections the presentation layer consumes (search, filter, sort,
//! low-stock, totals). No IO, no HTTP, no storage.

pub mod catalog;

pub use catalog::{Catalog, DEFAULT_LOW_STOCK_THRESHOLD, SortField};
