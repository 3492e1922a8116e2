//! Vereo Core
//!
//! Authentication, session lifecycle, and permission resolution for the
//! Vereo membership-association platform. Page components, CRUD data hooks,
//! and rendering live elsewhere and only consume the small boolean/enum API
//! exposed here:
//!
//! - [`auth::AuthGateway`] — login/register/logout, owns the current session
//! - [`session::SessionMonitor`] — inactivity tracking, pre-expiry warning,
//!   periodic expiry checks
//! - [`permissions`] — role hierarchy and the static permission catalog

pub mod auth;
pub mod clock;
pub mod config;
pub mod permissions;
pub mod session;

pub use auth::{AuthError, AuthGateway, AuthResult, LoginRequest, RegisterRequest, User};
pub use config::CoreConfig;
pub use permissions::{Permission, Role};
pub use session::{
    ActivityReporter, ActivitySignal, MonitorHandle, SessionMonitor, SessionState, SessionWarning,
};
