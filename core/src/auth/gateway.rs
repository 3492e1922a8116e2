//! Authentication Gateway
//!
//! Owns the current user and session, validates credentials against the
//! directory, and wires the session monitor and permission resolver together
//! for consumers. Route guards and UI chrome only ever read the projections
//! exposed here (`is_authenticated`, `current_user`, `last_error`, the
//! permission queries); nothing downstream mutates core state directly.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{info, warn};
use validator::Validate;

use super::directory::CredentialDirectory;
use super::error::{AuthError, AuthResult};
use super::models::{LoginRequest, RegisterRequest, User};
use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::permissions::{self, Permission, Role};
use crate::session::{FileStore, SessionCell, SessionMonitor, SessionState, SessionStore};

/// Authentication gateway: login/register/logout plus read-only projections
/// of the session.
pub struct AuthGateway {
    directory: Arc<dyn CredentialDirectory>,
    cell: Arc<SessionCell>,
    last_error: Mutex<Option<AuthError>>,
}

impl AuthGateway {
    /// Create a gateway with the default system clock and the file-backed
    /// snapshot store from `config`.
    #[must_use]
    pub fn new(config: CoreConfig, directory: Arc<dyn CredentialDirectory>) -> Self {
        let store = Arc::new(FileStore::new(config.snapshot_path.clone()));
        Self::with_parts(config, directory, store, Arc::new(SystemClock))
    }

    /// Create a gateway with explicit store and clock implementations.
    #[must_use]
    pub fn with_parts(
        config: CoreConfig,
        directory: Arc<dyn CredentialDirectory>,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            cell: Arc::new(SessionCell::new(config, clock, store)),
            last_error: Mutex::new(None),
        }
    }

    /// Login with email and password.
    ///
    /// On success a fresh session starts (`session_start = last_activity =
    /// now`) and its snapshot is persisted. Failures are recorded in
    /// [`Self::last_error`] for the calling form.
    pub async fn login(&self, request: LoginRequest) -> AuthResult<User> {
        info!("Attempting login for {}", request.email);

        let result = self
            .directory
            .authenticate(&request.email, &request.password)
            .and_then(|user| {
                if user.is_active {
                    Ok(user)
                } else {
                    Err(AuthError::AccountDisabled)
                }
            });

        match result {
            Ok(user) => {
                self.cell.install(user.clone());
                self.record_error(None);
                info!("User {} logged in", user.email);
                Ok(user)
            }
            Err(e) => {
                warn!("Login failed for {}: {e}", request.email);
                self.record_error(Some(e.clone()));
                Err(e)
            }
        }
    }

    /// Register a new member account and start a session for it.
    ///
    /// New members always start with [`Role::Member`].
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        info!("Attempting registration for {}", request.email);

        if let Err(e) = request.validate() {
            let err = AuthError::Validation(e.to_string());
            self.record_error(Some(err.clone()));
            return Err(err);
        }

        let result = self.directory.create_user(
            &request.email,
            &request.password,
            &request.full_name,
            Role::Member,
        );

        match result {
            Ok(user) => {
                self.cell.install(user.clone());
                self.record_error(None);
                info!("User {} registered", user.email);
                Ok(user)
            }
            Err(e) => {
                warn!("Registration failed for {}: {e}", request.email);
                self.record_error(Some(e.clone()));
                Err(e)
            }
        }
    }

    /// Clear the user, the session, and all persisted timestamps.
    ///
    /// Idempotent: logging out while anonymous is a no-op.
    pub async fn logout(&self) {
        self.cell.clear();
        self.record_error(None);
    }

    /// Restore a session for a user re-derived out of band (e.g. from a
    /// backend token on reload), adopting persisted timestamps so the reload
    /// grants no extra time. Returns `false` when the stored snapshot was
    /// already expired; the gateway then stays anonymous.
    pub fn resume(&self, user: User) -> bool {
        self.cell.resume(user)
    }

    /// The session monitor view over this gateway's session.
    #[must_use]
    pub fn monitor(&self) -> SessionMonitor {
        SessionMonitor::new(Arc::clone(&self.cell))
    }

    /// Subscribe to session state transitions. Observers see the state flip
    /// to [`SessionState::Anonymous`] on logout and forced expiry.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.cell.subscribe()
    }

    // === Read-only projections ===

    /// Whether a user is currently authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.cell.is_authenticated()
    }

    /// The currently authenticated user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.cell.current_user()
    }

    /// Role of the current user, `None` while anonymous.
    #[must_use]
    pub fn current_role(&self) -> Option<Role> {
        self.cell.current_user().map(|u| u.role)
    }

    /// The most recent login/registration error, cleared on success and on
    /// logout.
    #[must_use]
    pub fn last_error(&self) -> Option<AuthError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // === Permission resolver wiring ===

    /// Whether the current user holds `permission`. Anonymous callers are
    /// checked against the guest set.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        permissions::has_permission(self.current_role(), permission)
    }

    /// Whether the current user holds every permission in `required`.
    #[must_use]
    pub fn has_all_permissions(&self, required: &[Permission]) -> bool {
        permissions::has_all_permissions(self.current_role(), required)
    }

    /// Whether the current user holds at least one permission in `required`.
    #[must_use]
    pub fn has_any_permission(&self, required: &[Permission]) -> bool {
        permissions::has_any_permission(self.current_role(), required)
    }

    /// Whether the current user may act on a user holding `target`.
    /// Anonymous callers can act on no one.
    #[must_use]
    pub fn can_act_on(&self, target: Role) -> bool {
        self.current_role()
            .is_some_and(|actor| permissions::can_act_on_user(actor, target))
    }

    /// Whether the current user meets a minimum required role.
    #[must_use]
    pub fn has_minimum_role(&self, required: Role) -> bool {
        self.current_role()
            .unwrap_or(Role::Guest)
            .has_minimum_role(required)
    }

    /// Hierarchy level of the current user, 0 while anonymous.
    #[must_use]
    pub fn access_level(&self) -> u8 {
        permissions::access_level(self.current_role())
    }

    fn record_error(&self, error: Option<AuthError>) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = error;
    }
}
