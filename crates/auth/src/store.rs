//! Credential store: authentication and password management.

use std::collections::BTreeMap;

use stockroom_core::{DomainError, DomainResult};

use crate::user::{Role, User, UserRecord};

/// Seed account for bootstrapping an empty store.
///
/// The default is the well-known `admin` / `admin123` pair. It exists so a
/// fresh installation is usable at all; it is not a security feature, and
/// the seeded account is flagged for an immediate password change.
#[derive(Debug, Clone)]
pub struct SeedCredentials {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl Default for SeedCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
        }
    }
}

/// In-memory credential store keyed by username.
///
/// Exclusively owns its [`User`] records. Single mutation context; a
/// multi-client host wraps the whole store in one lock per logical
/// operation.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    users: BTreeMap<String, User>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// All accounts, ordered by username.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Add a new account; the password is hashed before storage.
    ///
    /// Fails with a validation error when the username is already taken.
    pub fn add_user(&mut self, username: &str, password: &str, role: Role) -> DomainResult<&User> {
        if self.users.contains_key(username) {
            return Err(DomainError::validation(format!(
                "user '{username}' already exists"
            )));
        }
        let user = User::new(username, password, role)?;
        Ok(self.users.entry(username.to_string()).or_insert(user))
    }

    /// Authenticate an account, returning it on success.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// [`DomainError::Authentication`]; nothing about the stored hash or
    /// the account's existence is revealed, in the error or in logs.
    pub fn authenticate(&self, username: &str, password: &str) -> DomainResult<&User> {
        let user = self
            .users
            .get(username)
            .ok_or(DomainError::Authentication)?;
        if !user.verify_password(password) {
            return Err(DomainError::Authentication);
        }
        Ok(user)
    }

    /// Replace an account's password after re-authenticating with the old
    /// one.
    ///
    /// A successful change also clears the account's
    /// `must_change_password` flag, so rotating a seeded default credential
    /// completes the bootstrap.
    pub fn change_password(
        &mut self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        self.authenticate(username, old_password)?;
        if new_password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }
        let user = self
            .users
            .get_mut(username)
            .ok_or(DomainError::Authentication)?;
        user.set_password(new_password);
        tracing::info!(username, "password changed");
        Ok(())
    }

    /// Seed a default administrator into an empty store.
    ///
    /// Explicit bootstrap step, not a construction side effect: callers run
    /// it once after loading a snapshot. Returns `true` when an account was
    /// created; a non-empty store is left untouched. The seeded account is
    /// flagged `must_change_password` so the UI can force a rotation.
    pub fn seed_if_empty(&mut self, seed: &SeedCredentials) -> DomainResult<bool> {
        if !self.users.is_empty() {
            return Ok(false);
        }
        tracing::warn!(
            username = %seed.username,
            "credential store is empty; seeding default administrator with a well-known password"
        );
        let mut user = User::new(seed.username.as_str(), &seed.password, seed.role)?;
        user.require_password_change();
        self.users.insert(user.username().to_string(), user);
        Ok(true)
    }

    /// Rebuild a store from persisted records.
    pub fn from_records(records: impl IntoIterator<Item = UserRecord>) -> DomainResult<Self> {
        let mut store = Self::new();
        for record in records {
            let user = User::from_record(record)?;
            if store.users.contains_key(user.username()) {
                return Err(DomainError::validation(format!(
                    "user '{}' already exists",
                    user.username()
                )));
            }
            store.users.insert(user.username().to_string(), user);
        }
        Ok(store)
    }

    /// Snapshot all accounts, keyed by username.
    pub fn to_records(&self) -> BTreeMap<String, UserRecord> {
        self.users
            .iter()
            .map(|(username, user)| (username.clone(), user.to_record()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticate_checks_username_and_password() {
        let mut store = CredentialStore::new();
        store.add_user("alice", "secret123", Role::Manager).unwrap();

        let user = store.authenticate("alice", "secret123").unwrap();
        assert_eq!(user.username(), "alice");
        assert_eq!(user.role(), Role::Manager);

        assert_eq!(
            store.authenticate("alice", "wrong").unwrap_err(),
            DomainError::Authentication
        );
        assert_eq!(
            store.authenticate("nobody", "secret123").unwrap_err(),
            DomainError::Authentication
        );
    }

    #[test]
    fn unknown_user_and_wrong_password_fail_identically() {
        let mut store = CredentialStore::new();
        store.add_user("alice", "secret123", Role::User).unwrap();

        let unknown = store.authenticate("nobody", "pw").unwrap_err();
        let wrong = store.authenticate("alice", "pw").unwrap_err();
        assert_eq!(unknown, wrong);
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn add_user_rejects_duplicates() {
        let mut store = CredentialStore::new();
        store.add_user("alice", "secret123", Role::User).unwrap();
        let err = store.add_user("alice", "other", Role::Admin).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.len(), 1);
        // The original account is untouched.
        assert!(store.authenticate("alice", "secret123").is_ok());
    }

    #[test]
    fn change_password_requires_the_old_password() {
        let mut store = CredentialStore::new();
        store.add_user("alice", "secret123", Role::User).unwrap();

        assert_eq!(
            store
                .change_password("alice", "wrong", "newpass")
                .unwrap_err(),
            DomainError::Authentication
        );
        assert!(store.authenticate("alice", "secret123").is_ok());

        store.change_password("alice", "secret123", "newpass").unwrap();
        assert_eq!(
            store.authenticate("alice", "secret123").unwrap_err(),
            DomainError::Authentication
        );
        assert!(store.authenticate("alice", "newpass").is_ok());
    }

    #[test]
    fn seed_if_empty_creates_exactly_one_admin_once() {
        let mut store = CredentialStore::new();
        let seed = SeedCredentials::default();

        assert!(store.seed_if_empty(&seed).unwrap());
        assert_eq!(store.len(), 1);

        let admin = store.authenticate("admin", "admin123").unwrap();
        assert_eq!(admin.role(), Role::Admin);
        assert!(admin.must_change_password());

        // Already populated: no reseed.
        assert!(!store.seed_if_empty(&seed).unwrap());
        assert_eq!(store.len(), 1);

        let mut populated = CredentialStore::new();
        populated.add_user("alice", "secret123", Role::User).unwrap();
        assert!(!populated.seed_if_empty(&seed).unwrap());
        assert!(populated.get("admin").is_none());
    }

    #[test]
    fn rotating_the_seeded_password_clears_the_change_flag() {
        let mut store = CredentialStore::new();
        store.seed_if_empty(&SeedCredentials::default()).unwrap();

        store
            .change_password("admin", "admin123", "s7r0ng-&-long")
            .unwrap();
        let admin = store.get("admin").unwrap();
        assert!(!admin.must_change_password());
        assert!(store.authenticate("admin", "s7r0ng-&-long").is_ok());
    }

    #[test]
    fn records_round_trip_preserves_authentication() {
        let mut store = CredentialStore::new();
        store.add_user("alice", "secret123", Role::Manager).unwrap();
        store.add_user("bob", "hunter2!", Role::User).unwrap();

        let restored = CredentialStore::from_records(store.to_records().into_values()).unwrap();
        assert_eq!(restored.len(), 2);
        assert!(restored.authenticate("alice", "secret123").is_ok());
        assert!(restored.authenticate("bob", "hunter2!").is_ok());
        assert_eq!(
            restored.authenticate("bob", "secret123").unwrap_err(),
            DomainError::Authentication
        );
    }

    #[test]
    fn from_records_rejects_duplicate_usernames() {
        let record = User::new("alice", "secret123", Role::User)
            .unwrap()
            .to_record();
        let err = CredentialStore::from_records([record.clone(), record]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
