//! Product domain module.
//!
//! This crate contains the product hierarchy and stock ledger, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{
    DetailField, DigitalAttributes, Dimensions, KindAttributes, PhysicalAttributes, Product,
    ProductDetails, ProductKind, ProductRecord, ServiceAttributes, format_currency,
};
