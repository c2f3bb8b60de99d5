//! File-backed JSON snapshot adapters.
//!
//! Each adapter reads or writes the *entire* snapshot in one exclusive
//! operation; there is no partial or streamed write, so the file on disk is
//! always either the previous snapshot or the new one in full.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use stockroom_auth::{CredentialStore, UserRecord};
use stockroom_catalog::Catalog;
use stockroom_products::{Product, ProductRecord};

use crate::error::{PersistenceError, PersistenceResult};

/// Catalog snapshot file: a JSON array of product records.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog snapshot.
    ///
    /// A missing file is an empty catalog. An unreadable or corrupt file is
    /// a [`PersistenceError`] for the caller to translate — never a crash.
    pub fn load(&self) -> PersistenceResult<Catalog> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no catalog snapshot; starting empty");
            return Ok(Catalog::new());
        }

        let raw = read_snapshot(&self.path)?;
        let records: Vec<ProductRecord> =
            serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let mut catalog = Catalog::new();
        for record in records {
            catalog.add(Product::from_record(record)?)?;
        }
        tracing::debug!(path = %self.path.display(), products = catalog.len(), "catalog snapshot loaded");
        Ok(catalog)
    }

    /// Write the full catalog snapshot.
    pub fn save(&self, catalog: &Catalog) -> PersistenceResult<()> {
        let records: Vec<ProductRecord> = catalog.products().map(Product::to_record).collect();
        let body = serde_json::to_string_pretty(&records).map_err(|source| {
            PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        write_snapshot(&self.path, &body)?;
        tracing::debug!(path = %self.path.display(), products = records.len(), "catalog snapshot saved");
        Ok(())
    }
}

/// Credential snapshot file: a JSON object mapping username to record.
#[derive(Debug, Clone)]
pub struct JsonCredentialStore {
    path: PathBuf,
}

impl JsonCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the credential snapshot.
    ///
    /// A missing file is an empty store; callers typically follow up with
    /// [`CredentialStore::seed_if_empty`].
    pub fn load(&self) -> PersistenceResult<CredentialStore> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no credential snapshot; starting empty");
            return Ok(CredentialStore::new());
        }

        let raw = read_snapshot(&self.path)?;
        let records: BTreeMap<String, UserRecord> =
            serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let store = CredentialStore::from_records(records.into_values())?;
        tracing::debug!(path = %self.path.display(), users = store.len(), "credential snapshot loaded");
        Ok(store)
    }

    /// Write the full credential snapshot.
    pub fn save(&self, store: &CredentialStore) -> PersistenceResult<()> {
        let body = serde_json::to_string_pretty(&store.to_records()).map_err(|source| {
            PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        write_snapshot(&self.path, &body)?;
        tracing::debug!(path = %self.path.display(), users = store.len(), "credential snapshot saved");
        Ok(())
    }
}

fn read_snapshot(path: &Path) -> PersistenceResult<String> {
    fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_snapshot(path: &Path, body: &str) -> PersistenceResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, body).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}
