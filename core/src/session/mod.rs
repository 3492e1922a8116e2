//! Session lifecycle.
//!
//! The session is a single piece of shared state owned by the auth gateway
//! and observed by the monitor: exactly one of `Anonymous`, `Active`,
//! `Warning`, or `Expired` describes it at any time. Expiry is driven solely
//! by inactivity; the absolute session age is tracked for display only.

pub mod monitor;
pub mod store;

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::auth::models::User;
use crate::clock::Clock;
use crate::config::CoreConfig;

pub use monitor::{ActivityReporter, ActivitySignal, MonitorHandle, SessionMonitor};
pub use store::{FileStore, MemoryStore, SessionSnapshot, SessionStore, StoreError};

/// Lifecycle state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session.
    Anonymous,
    /// Authenticated, remaining time above the warning threshold.
    Active,
    /// Remaining time at or below the warning threshold, above zero.
    Warning,
    /// Idle time exceeded the inactivity timeout. Transient: the next poll
    /// (or the transition that detected it) forces logout to `Anonymous`.
    Expired,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Anonymous => "anonymous",
            Self::Active => "active",
            Self::Warning => "warning",
            Self::Expired => "expired",
        };
        f.write_str(name)
    }
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// The authenticated user.
    pub user: User,
    /// When the session was created. Fixed at creation.
    pub session_start: DateTime<Utc>,
    /// When the user last interacted. Never precedes `session_start`.
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// The persistable timestamp pair.
    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_start: self.session_start,
            last_activity: self.last_activity,
        }
    }
}

/// Derived pre-expiry warning state. Recomputed on every poll tick, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWarning {
    /// Whether the warning should be shown.
    pub show_warning: bool,
    /// Time remaining until inactivity expiry (zero when expired or
    /// anonymous).
    pub time_remaining: Duration,
}

/// Shared session state.
///
/// Single writer in effect: every mutation happens under the one mutex, and
/// the only mutators are the gateway (login/logout/resume) and the monitor
/// (activity, expiry). State changes are broadcast over a watch channel so
/// downstream observers see `is_authenticated` flip instead of catching
/// errors.
pub(crate) struct SessionCell {
    config: CoreConfig,
    clock: Arc<dyn Clock>,
    store: Arc<dyn SessionStore>,
    session: Mutex<Option<Session>>,
    state_tx: watch::Sender<SessionState>,
}

impl SessionCell {
    pub(crate) fn new(
        config: CoreConfig,
        clock: Arc<dyn Clock>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Anonymous);
        Self {
            config,
            clock,
            store,
            session: Mutex::new(None),
            state_tx,
        }
    }

    pub(crate) fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Subscribe to session state transitions.
    pub(crate) fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub(crate) fn current_user(&self) -> Option<User> {
        self.lock().as_ref().map(|s| s.user.clone())
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// Create a fresh session for `user`: both timestamps start at now.
    pub(crate) fn install(&self, user: User) {
        let now = self.now();
        let session = Session {
            user,
            session_start: now,
            last_activity: now,
        };
        self.persist(&session);
        *self.lock() = Some(session);
        self.broadcast();
    }

    /// Restore a session for `user`, adopting persisted timestamps so a
    /// restart grants no extra time. Returns `false` when the stored
    /// snapshot was already past the inactivity timeout or could not be
    /// read; the snapshot is cleared and the cell stays anonymous.
    pub(crate) fn resume(&self, user: User) -> bool {
        let now = self.now();
        let snapshot = match self.store.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                // An unreadable snapshot must not mint a fresh 2h window.
                warn!("Failed to load session snapshot; treating as unauthenticated: {e}");
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear unreadable session snapshot: {e}");
                }
                self.broadcast();
                return false;
            }
        };

        let (session_start, last_activity) = match snapshot {
            Some(s) => (s.session_start, s.last_activity.max(s.session_start)),
            None => (now, now),
        };

        if now - last_activity > self.config.inactivity_timeout {
            info!("Persisted session already expired; discarding");
            if let Err(e) = self.store.clear() {
                warn!("Failed to clear expired session snapshot: {e}");
            }
            self.broadcast();
            return false;
        }

        let session = Session {
            user,
            session_start,
            last_activity,
        };
        self.persist(&session);
        *self.lock() = Some(session);
        self.broadcast();
        true
    }

    /// Record user activity: `last_activity = now`, persisted. No-op while
    /// anonymous. Idempotent.
    pub(crate) fn touch(&self) {
        let now = self.now();
        let snapshot = {
            let mut guard = self.lock();
            let Some(session) = guard.as_mut() else {
                return;
            };
            // Activity never predates the session start and never moves
            // backwards, even if the wall clock does.
            session.last_activity = now.max(session.last_activity).max(session.session_start);
            session.snapshot()
        };
        if let Err(e) = self.store.save(&snapshot) {
            warn!("Failed to persist activity timestamp: {e}");
        }
        self.broadcast();
    }

    /// Whether idle time has exceeded the inactivity timeout.
    pub(crate) fn check_expiry(&self) -> bool {
        let now = self.now();
        self.lock()
            .as_ref()
            .is_some_and(|s| now - s.last_activity > self.config.inactivity_timeout)
    }

    /// Time remaining until inactivity expiry, floored at zero.
    pub(crate) fn time_remaining(&self) -> Duration {
        let now = self.now();
        self.lock().as_ref().map_or(Duration::zero(), |s| {
            (self.config.inactivity_timeout - (now - s.last_activity)).max(Duration::zero())
        })
    }

    /// Absolute session age, informational only.
    pub(crate) fn session_age(&self) -> Option<Duration> {
        let now = self.now();
        self.lock().as_ref().map(|s| now - s.session_start)
    }

    /// Current lifecycle state.
    pub(crate) fn state(&self) -> SessionState {
        let now = self.now();
        self.lock()
            .as_ref()
            .map_or(SessionState::Anonymous, |s| self.state_of(s, now))
    }

    /// Derived warning state.
    pub(crate) fn warning(&self) -> SessionWarning {
        let remaining = self.time_remaining();
        SessionWarning {
            // An expired (or absent) session is not "warned".
            show_warning: self.is_authenticated()
                && remaining > Duration::zero()
                && remaining <= self.config.warning_threshold,
            time_remaining: remaining,
        }
    }

    /// Force logout if the session has expired. Returns `true` when a
    /// session was actually cleared, which happens at most once per expiry.
    pub(crate) fn expire_if_needed(&self) -> bool {
        let now = self.now();
        let cleared = {
            let mut guard = self.lock();
            match guard.as_ref() {
                Some(s) if now - s.last_activity > self.config.inactivity_timeout => {
                    *guard = None;
                    true
                }
                _ => false,
            }
        };

        if cleared {
            info!("Session expired after inactivity; forcing logout");
            if let Err(e) = self.store.clear() {
                warn!("Failed to clear session snapshot on expiry: {e}");
            }
            // Observers see the expiry before the state settles to anonymous.
            self.state_tx.send_replace(SessionState::Expired);
            self.state_tx.send_replace(SessionState::Anonymous);
        }
        cleared
    }

    /// Clear the session and all persisted timestamps. Idempotent.
    pub(crate) fn clear(&self) {
        let had_session = self.lock().take().is_some();
        if had_session {
            if let Err(e) = self.store.clear() {
                warn!("Failed to clear session snapshot: {e}");
            }
            debug!("Session cleared");
        }
        self.broadcast();
    }

    fn state_of(&self, session: &Session, now: DateTime<Utc>) -> SessionState {
        let remaining = self.config.inactivity_timeout - (now - session.last_activity);
        if remaining <= Duration::zero() {
            SessionState::Expired
        } else if remaining <= self.config.warning_threshold {
            SessionState::Warning
        } else {
            SessionState::Active
        }
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save(&session.snapshot()) {
            // The in-memory session still works for this process; only
            // restart continuity is lost.
            warn!("Failed to persist session snapshot: {e}");
        }
    }

    fn broadcast(&self) {
        let state = self.state();
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
