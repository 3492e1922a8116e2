//! Session activity monitoring.
//!
//! Tracks user activity, computes expiry/warning state, and drives the
//! periodic expiry check. Activity arrives as payload-free signals from an
//! abstract event source (UI input events, or heartbeats in a headless
//! embedding); every signal resets the idle timer and persists the
//! timestamp. The background task is torn down through its handle so no
//! timer or listener outlives the session subsystem.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::{SessionCell, SessionState, SessionWarning};

/// A tracked user-interaction event. Carries no payload; each occurrence is
/// purely a "the user is here" signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivitySignal {
    /// Pointer button pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Key pressed.
    KeyPress,
    /// View scrolled.
    Scroll,
    /// Touch started.
    TouchStart,
    /// Explicit keep-alive from a headless client.
    Heartbeat,
}

/// Sends activity signals into a running monitor. Cheap to clone; one per
/// event-source hookup.
#[derive(Debug, Clone)]
pub struct ActivityReporter {
    tx: mpsc::UnboundedSender<ActivitySignal>,
}

impl ActivityReporter {
    /// Report a tracked activity event.
    ///
    /// Returns `false` when the monitor has shut down.
    pub fn report(&self, signal: ActivitySignal) -> bool {
        self.tx.send(signal).is_ok()
    }
}

/// Handle to the background monitor task. Shut it down explicitly with
/// [`MonitorHandle::shutdown`]; dropping the handle aborts the task.
#[derive(Debug)]
pub struct MonitorHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Stop the poll loop and wait for the task to finish.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Tracks activity timestamps and expiry state for the shared session.
///
/// Obtained from [`crate::auth::AuthGateway::monitor`]; both views share the
/// same underlying session state.
#[derive(Clone)]
pub struct SessionMonitor {
    cell: Arc<SessionCell>,
}

impl SessionMonitor {
    pub(crate) fn new(cell: Arc<SessionCell>) -> Self {
        Self { cell }
    }

    /// Record user activity now: resets `last_activity` and persists it.
    /// No-op while anonymous.
    pub fn update_activity(&self) {
        self.cell.touch();
    }

    /// Whether idle time has exceeded the inactivity timeout.
    #[must_use]
    pub fn check_expiry(&self) -> bool {
        self.cell.check_expiry()
    }

    /// Time remaining until inactivity expiry, floored at zero.
    #[must_use]
    pub fn time_remaining(&self) -> chrono::Duration {
        self.cell.time_remaining()
    }

    /// Derived pre-expiry warning state.
    #[must_use]
    pub fn warning(&self) -> SessionWarning {
        self.cell.warning()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.cell.state()
    }

    /// Absolute session age. Informational only; never drives expiry.
    #[must_use]
    pub fn session_age(&self) -> Option<chrono::Duration> {
        self.cell.session_age()
    }

    /// Subscribe to session state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.cell.subscribe()
    }

    /// Run one expiry check, forcing logout if the session has expired.
    /// Returns the state after the check. The forced logout happens at most
    /// once per expiry regardless of how often this is called.
    pub fn poll_once(&self) -> SessionState {
        self.cell.expire_if_needed();
        self.cell.state()
    }

    /// Start the background task: an expiry check every poll interval plus
    /// the activity-signal intake.
    ///
    /// Returns the task handle and a reporter for wiring up event sources.
    #[must_use]
    pub fn spawn(&self) -> (MonitorHandle, ActivityReporter) {
        let (activity_tx, mut activity_rx) = mpsc::unbounded_channel::<ActivitySignal>();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let cell = Arc::clone(&self.cell);
        let poll_interval = cell.config().poll_interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut intake_open = true;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        cell.expire_if_needed();
                    }
                    signal = activity_rx.recv(), if intake_open => {
                        match signal {
                            Some(signal) => {
                                debug!("Activity signal: {signal:?}");
                                cell.touch();
                            }
                            // All reporters dropped; keep polling for expiry.
                            None => intake_open = false,
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        (
            MonitorHandle {
                shutdown: shutdown_tx,
                task: Some(task),
            },
            ActivityReporter { tx: activity_tx },
        )
    }
}
