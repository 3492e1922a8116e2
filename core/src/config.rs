//! Core Configuration
//!
//! Loads configuration from environment variables, with defaults matching
//! the production session policy.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Duration;

/// Session-lifecycle and storage configuration.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Idle time after which the session is invalidated (default: 2 hours).
    pub inactivity_timeout: Duration,

    /// Remaining time at or below which the pre-expiry warning shows
    /// (default: 5 minutes).
    pub warning_threshold: Duration,

    /// Absolute session age, tracked for display only (default: 24 hours).
    /// Expiry is driven solely by inactivity; this cap is never enforced.
    pub session_duration: Duration,

    /// Interval between expiry checks (default: 60 seconds).
    pub poll_interval: std::time::Duration,

    /// Path of the persisted session snapshot (default: `vereo-session.json`
    /// in the platform temp directory).
    pub snapshot_path: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout: Duration::hours(2),
            warning_threshold: Duration::minutes(5),
            session_duration: Duration::hours(24),
            poll_interval: std::time::Duration::from_secs(60),
            snapshot_path: env::temp_dir().join("vereo-session.json"),
        }
    }
}

impl CoreConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional; unset or unparsable values fall back to
    /// the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            inactivity_timeout: env::var("VEREO_INACTIVITY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.inactivity_timeout, Duration::seconds),
            warning_threshold: env::var("VEREO_WARNING_THRESHOLD_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.warning_threshold, Duration::seconds),
            session_duration: env::var("VEREO_SESSION_DURATION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.session_duration, Duration::seconds),
            poll_interval: env::var("VEREO_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.poll_interval, std::time::Duration::from_secs),
            snapshot_path: env::var("VEREO_SNAPSHOT_PATH")
                .ok()
                .map_or(defaults.snapshot_path, PathBuf::from),
        })
    }
}
