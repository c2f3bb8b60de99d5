//! User accounts and roles.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

use crate::password::PasswordHash;

/// Access role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "user" => Ok(Role::User),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

/// A single account in the credential store.
///
/// Holds the salted digest of the secret, never the plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    username: String,
    password_hash: PasswordHash,
    role: Role,
    must_change_password: bool,
}

impl User {
    /// Create an account, hashing `password` before it is stored.
    pub fn new(username: impl Into<String>, password: &str, role: Role) -> DomainResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }
        Ok(Self {
            username,
            password_hash: PasswordHash::new(password),
            role,
            must_change_password: false,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// True while the account still runs on a provisioned (e.g. seeded
    /// default) password; callers should prompt for a change.
    pub fn must_change_password(&self) -> bool {
        self.must_change_password
    }

    /// Check `candidate` against the stored digest.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password_hash.verify(candidate)
    }

    pub(crate) fn set_password(&mut self, new_password: &str) {
        self.password_hash = PasswordHash::new(new_password);
        self.must_change_password = false;
    }

    pub(crate) fn require_password_change(&mut self) {
        self.must_change_password = true;
    }

    /// Snapshot this account into its persisted representation.
    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            username: self.username.clone(),
            password_hash: String::from(self.password_hash.clone()),
            role: self.role,
            must_change_password: self.must_change_password,
        }
    }

    /// Rebuild an account from its persisted representation.
    pub fn from_record(record: UserRecord) -> DomainResult<Self> {
        if record.username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        Ok(Self {
            username: record.username,
            password_hash: record.password_hash.parse()?,
            role: record.role,
            must_change_password: record.must_change_password,
        })
    }
}

/// Persisted representation of one account (credential snapshot value).
///
/// `role` and `must_change_password` default on load so older snapshots
/// remain readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub must_change_password: bool,
}
