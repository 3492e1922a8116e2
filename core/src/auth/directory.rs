//! Credential directory.
//!
//! The gateway validates credentials against this seam. Production
//! deployments back it with the association's member database or a remote
//! identity service; the crate ships an in-memory implementation so the core
//! is usable standalone and testable without infrastructure.

use dashmap::DashMap;

use super::error::{AuthError, AuthResult};
use super::models::User;
use super::password::{hash_password, verify_password};
use crate::permissions::Role;

/// External credential source consulted by the gateway.
pub trait CredentialDirectory: Send + Sync {
    /// Validate credentials and return the matching user.
    ///
    /// Returns [`AuthError::InvalidCredentials`] both for unknown emails and
    /// wrong passwords; the caller cannot distinguish the two.
    fn authenticate(&self, email: &str, password: &str) -> AuthResult<User>;

    /// Create a new user with the given credentials.
    ///
    /// Returns [`AuthError::UserAlreadyExists`] when the email is taken.
    fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> AuthResult<User>;
}

struct DirectoryRecord {
    user: User,
    password_hash: String,
}

/// In-memory credential directory keyed by lowercased email.
#[derive(Default)]
pub struct InMemoryDirectory {
    records: DashMap<String, DirectoryRecord>,
}

impl InMemoryDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user, consuming and hashing the given password. Intended for
    /// bootstrap and tests.
    pub fn seed_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> AuthResult<User> {
        self.create_user(email, password, full_name, role)
    }

    /// Activate or deactivate an account. Returns `false` when the email is
    /// unknown.
    pub fn set_active(&self, email: &str, is_active: bool) -> bool {
        self.records
            .get_mut(&normalize_email(email))
            .map(|mut record| {
                record.user.is_active = is_active;
                record.user.updated_at = chrono::Utc::now();
            })
            .is_some()
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory holds no users.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl CredentialDirectory for InMemoryDirectory {
    fn authenticate(&self, email: &str, password: &str) -> AuthResult<User> {
        let record = self
            .records
            .get(&normalize_email(email))
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &record.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(record.user.clone())
    }

    fn create_user(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> AuthResult<User> {
        let key = normalize_email(email);
        if self.records.contains_key(&key) {
            return Err(AuthError::UserAlreadyExists);
        }

        let user = User::new(email.trim(), full_name, role);
        let password_hash = hash_password(password)?;
        self.records.insert(
            key,
            DirectoryRecord {
                user: user.clone(),
                password_hash,
            },
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_unknown_email() {
        let dir = InMemoryDirectory::new();
        assert_eq!(
            dir.authenticate("ghost@example.org", "whatever").unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn test_authenticate_wrong_password() {
        let dir = InMemoryDirectory::new();
        dir.seed_user("kim@example.org", "right password", "Kim", Role::Member)
            .unwrap();
        assert_eq!(
            dir.authenticate("kim@example.org", "wrong password")
                .unwrap_err(),
            AuthError::InvalidCredentials
        );
    }

    #[test]
    fn test_authenticate_success() {
        let dir = InMemoryDirectory::new();
        let created = dir
            .seed_user("kim@example.org", "right password", "Kim", Role::Moderator)
            .unwrap();
        let user = dir
            .authenticate("kim@example.org", "right password")
            .unwrap();
        assert_eq!(user.id, created.id);
        assert_eq!(user.role, Role::Moderator);
    }

    #[test]
    fn test_email_lookup_is_case_insensitive() {
        let dir = InMemoryDirectory::new();
        dir.seed_user("Kim@Example.org", "right password", "Kim", Role::Member)
            .unwrap();
        assert!(dir.authenticate("kim@example.org", "right password").is_ok());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let dir = InMemoryDirectory::new();
        dir.seed_user("kim@example.org", "pw pw pw pw", "Kim", Role::Member)
            .unwrap();
        assert_eq!(
            dir.seed_user("KIM@example.org", "other pw", "Kim 2", Role::Member)
                .unwrap_err(),
            AuthError::UserAlreadyExists
        );
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_set_active() {
        let dir = InMemoryDirectory::new();
        dir.seed_user("kim@example.org", "right password", "Kim", Role::Member)
            .unwrap();

        assert!(dir.set_active("kim@example.org", false));
        let user = dir
            .authenticate("kim@example.org", "right password")
            .unwrap();
        assert!(!user.is_active);

        assert!(!dir.set_active("ghost@example.org", false));
    }
}
