//! Durable session snapshot storage.
//!
//! The session timestamps survive process restarts so a reload neither
//! resets the idle timer nor grants extra time. Both timestamps are written
//! together as one JSON document, atomically (temp file + rename), so a
//! crash mid-write can never leave a half-updated pair behind.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted session timestamps. Serialized with RFC 3339 timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// When the session was created. Fixed for the session's lifetime.
    pub session_start: DateTime<Utc>,
    /// When the user last interacted.
    pub last_activity: DateTime<Utc>,
}

/// Storage error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored snapshot is not valid JSON or has the wrong shape.
    #[error("Corrupt session snapshot: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable key-value store for the session snapshot.
///
/// Single-writer: only the session core writes its own snapshot. Production
/// deployments back this with whatever local storage the host environment
/// offers; the crate ships a file-based implementation and an in-memory one
/// for tests.
pub trait SessionStore: Send + Sync {
    /// Load the persisted snapshot, if any.
    fn load(&self) -> StoreResult<Option<SessionSnapshot>>;

    /// Persist the snapshot, replacing any previous one.
    fn save(&self, snapshot: &SessionSnapshot) -> StoreResult<()>;

    /// Remove the persisted snapshot. A no-op when nothing is stored.
    fn clear(&self) -> StoreResult<()>;
}

/// File-backed store writing the snapshot atomically.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store persisting to `path`. Parent directories are created
    /// on the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> StoreResult<Option<SessionSnapshot>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_slice(&bytes)?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &SessionSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling temp file, then rename over the target. Rename
        // is atomic on the same filesystem.
        let tmp = self.tmp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&serde_json::to_vec(snapshot)?)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<SessionSnapshot>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<SessionSnapshot>> {
        let guard = self
            .snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(*guard)
    }

    fn save(&self, snapshot: &SessionSnapshot) -> StoreResult<()> {
        let mut guard = self
            .snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(*snapshot);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut guard = self
            .snapshot
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}
