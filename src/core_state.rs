//! Shared application state, managed by the Tauri builder.

use std::path::PathBuf;

use crate::config;
use crate::db;
use crate::onboarding::OnboardingStore;

/// Application state shared across IPC handlers.
///
/// Wrapped in `Arc` at startup. The onboarding store is constructor-injected
/// here rather than being a global, so tests build their own instances.
pub struct AppState {
    pub onboarding: OnboardingStore,
    db_path: PathBuf,
}

impl AppState {
    /// State for the real app database under the user data directory.
    pub fn new() -> Self {
        Self::with_db_path(config::app_db_path())
    }

    /// State bound to an explicit database path (tests use a temp dir).
    pub fn with_db_path(db_path: PathBuf) -> Self {
        Self {
            onboarding: OnboardingStore::new(),
            db_path,
        }
    }

    /// Open the app database, creating the data directory on first run.
    pub fn open_db(&self) -> Result<rusqlite::Connection, db::StorageError> {
        if let Some(parent) = self.db_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Could not create data directory: {e}");
            }
        }
        db::open_database(&self.db_path)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
