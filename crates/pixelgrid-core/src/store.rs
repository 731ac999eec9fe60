//! Camera persistence.
//!
//! The last-viewed camera state survives across runs through a small
//! key-value style store. Loading is synchronous and happens once before the
//! first render; saving is debounced by [`SaveDebouncer`] so interactive
//! pan/zoom does not turn into a write per event.

use crate::camera::CameraState;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("camera store io: {0}")]
    Io(#[from] std::io::Error),
    #[error("camera store encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Persistence backend for the last-viewed camera state.
pub trait CameraStore {
    /// Load the persisted state, or `None` when nothing usable is stored.
    fn load(&self) -> Option<CameraState>;
    /// Persist the given state.
    fn save(&self, state: &CameraState) -> Result<(), StoreError>;
}

/// JSON-file backed store.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default per-user location for the camera state file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("pixelgrid").join("camera.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CameraStore for JsonFileStore {
    fn load(&self) -> Option<CameraState> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "camera state unreadable");
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(state) => Some(state),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "camera state corrupt, using default");
                None
            }
        }
    }

    fn save(&self, state: &CameraState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(state)?)?;
        Ok(())
    }
}

/// In-memory store, mainly for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Cell<Option<CameraState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CameraStore for MemoryStore {
    fn load(&self) -> Option<CameraState> {
        self.state.get()
    }

    fn save(&self, state: &CameraState) -> Result<(), StoreError> {
        self.state.set(Some(*state));
        Ok(())
    }
}

/// Debounced write-back scheduling for camera saves.
///
/// `mark_changed` is called on every camera mutation; `due` reports whether
/// the camera has been quiet long enough that the pending change should be
/// flushed. The caller performs the actual save and then calls `flushed`.
#[derive(Debug)]
pub struct SaveDebouncer {
    quiet_period: Duration,
    changed_at: Option<Instant>,
}

impl SaveDebouncer {
    pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            changed_at: None,
        }
    }

    pub fn mark_changed(&mut self, now: Instant) {
        self.changed_at = Some(now);
    }

    /// Whether a change is waiting to be flushed.
    pub fn pending(&self) -> bool {
        self.changed_at.is_some()
    }

    pub fn due(&self, now: Instant) -> bool {
        match self.changed_at {
            Some(changed) => now.duration_since(changed) >= self.quiet_period,
            None => false,
        }
    }

    pub fn flushed(&mut self) {
        self.changed_at = None;
    }
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("camera.json"));

        assert!(store.load().is_none());

        let state = CameraState::new(12.0, 34.0, 1.5);
        store.save(&state).unwrap();
        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("camera.json"));
        store.save(&CameraState::default()).unwrap();
        assert!(store.load().is_some());
    }

    #[test]
    fn corrupt_file_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camera.json");
        fs::write(&path, "not json").unwrap();
        assert!(JsonFileStore::new(path).load().is_none());
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());
        let state = CameraState::new(1.0, 2.0, 0.5);
        store.save(&state).unwrap();
        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn debouncer_waits_for_quiet_period() {
        let mut debouncer = SaveDebouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(!debouncer.due(t0));

        debouncer.mark_changed(t0);
        assert!(!debouncer.due(t0 + Duration::from_millis(50)));
        assert!(debouncer.due(t0 + Duration::from_millis(100)));

        debouncer.flushed();
        assert!(!debouncer.due(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn debouncer_restarts_on_new_change() {
        let mut debouncer = SaveDebouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        debouncer.mark_changed(t0);
        debouncer.mark_changed(t0 + Duration::from_millis(80));
        assert!(!debouncer.due(t0 + Duration::from_millis(120)));
        assert!(debouncer.due(t0 + Duration::from_millis(180)));
    }
}
