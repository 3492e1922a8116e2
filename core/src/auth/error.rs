//! Authentication Error Types

use thiserror::Error;

/// Authentication error types.
///
/// Everything here is an expected condition surfaced as a value for the
/// calling form to display. Session expiry is deliberately absent: it is a
/// state transition observed through the session watch channel, never an
/// error. Permission denial is likewise never an error; the resolver returns
/// plain booleans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Invalid credentials (wrong email/password).
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// User already exists (registration).
    #[error("Email already registered")]
    UserAlreadyExists,

    /// Malformed registration input.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Account exists but has been deactivated.
    #[error("Account is disabled")]
    AccountDisabled,

    /// Credential or snapshot storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            AuthError::UserAlreadyExists.to_string(),
            "Email already registered"
        );
        assert_eq!(
            AuthError::Validation("email: invalid".into()).to_string(),
            "Validation failed: email: invalid"
        );
        assert_eq!(AuthError::AccountDisabled.to_string(), "Account is disabled");
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(AuthError::InvalidCredentials, AuthError::InvalidCredentials);
        assert_ne!(AuthError::InvalidCredentials, AuthError::AccountDisabled);
    }
}
