//! Persistence error model.

use std::path::PathBuf;

use thiserror::Error;

use stockroom_core::DomainError;

/// Result type used by the persistence adapters.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Failure while loading or saving a snapshot.
///
/// Never fatal to the process: the caller decides whether to fall back to
/// an empty store or abort startup.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The backing file could not be read or written.
    #[error("snapshot I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot exists but is not JSON of the expected shape.
    #[error("corrupt snapshot at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot parsed, but a record violates a domain invariant.
    #[error("invalid snapshot record: {0}")]
    InvalidRecord(#[from] DomainError),
}
