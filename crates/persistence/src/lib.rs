//! `stockroom-persistence` — durable JSON snapshots for the catalog and the
//! credential store.
//!
//! The domain crates define the record shapes; this crate owns the snapshot
//! files. Loads and saves always cover the full snapshot in one exclusive
//! operation.

pub mod error;
pub mod json_store;

pub use error::{PersistenceError, PersistenceResult};
pub use json_store::{JsonCatalogStore, JsonCredentialStore};
