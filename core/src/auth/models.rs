//! User Types and Auth Requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::permissions::Role;

/// A member account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: Uuid,
    /// Email address (unique, login identifier).
    pub email: String,
    /// Full name.
    pub full_name: String,
    /// Assigned role.
    pub role: Role,
    /// Whether the account may log in.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last modified.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an active user with a fresh id and current timestamps.
    #[must_use]
    pub fn new(email: impl Into<String>, full_name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            full_name: full_name.into(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email)]
    pub email: String,
    /// Password (8-128 characters).
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Full name (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_active() {
        let user = User::new("jo@example.org", "Jo Berg", Role::Member);
        assert!(user.is_active);
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_user_ids_are_unique() {
        let a = User::new("a@example.org", "A", Role::Member);
        let b = User::new("b@example.org", "B", Role::Member);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_register_request_validates() {
        let ok = RegisterRequest {
            email: "new@example.org".into(),
            password: "long enough".into(),
            full_name: "New Member".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_email() {
        let bad = RegisterRequest {
            email: "not-an-email".into(),
            password: "long enough".into(),
            full_name: "New Member".into(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let bad = RegisterRequest {
            email: "new@example.org".into(),
            password: "short".into(),
            full_name: "New Member".into(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_empty_name() {
        let bad = RegisterRequest {
            email: "new@example.org".into(),
            password: "long enough".into(),
            full_name: String::new(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_user_serde_round_trip() {
        let user = User::new("jo@example.org", "Jo Berg", Role::Admin);
        let json = serde_json::to_string(&user).unwrap();
        let restored: User = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, user.id);
        assert_eq!(restored.role, Role::Admin);
    }
}
