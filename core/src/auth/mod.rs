//! Authentication Service
//!
//! Credential validation, session creation, and the read-only projections
//! the rest of the application consumes.

pub mod directory;
mod error;
mod gateway;
pub mod models;
pub mod password;

pub use directory::{CredentialDirectory, InMemoryDirectory};
pub use error::{AuthError, AuthResult};
pub use gateway::AuthGateway;
pub use models::{LoginRequest, RegisterRequest, User};
