//! `stockroom-auth` — credential store for inventory operators.
//!
//! Pure in-memory authentication: salted one-way password digests, role
//! tags, and an explicit bootstrap step for the default administrator.
//! This crate is intentionally decoupled from HTTP and storage.

pub mod password;
pub mod store;
pub mod user;

pub use password::PasswordHash;
pub use store::{CredentialStore, SeedCredentials};
pub use user::{Role, User, UserRecord};
