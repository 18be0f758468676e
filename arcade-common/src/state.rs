//! Persisted arcade state: the high score and the manual display override.

use crate::fs::atomic_write;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub high_score: u64,
    /// `Some(true)` pins the panel open, `Some(false)` pins it closed.
    pub display_override: Option<bool>,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("Failed to write state file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads and writes `state.json` in the data directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable state yields defaults.
    pub fn load(&self) -> PersistedState {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {}", self.path.display());
                return PersistedState::default();
            }
            Err(e) => {
                warn!("Could not read state file {}: {}", self.path.display(), e);
                return PersistedState::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(
                "State file {} is corrupt ({}); starting fresh",
                self.path.display(),
                e
            );
            PersistedState::default()
        })
    }

    pub fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StateError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = serde_json::to_string_pretty(state)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|source| StateError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn reset_high_score(&self) -> Result<PersistedState, StateError> {
        let mut state = self.load();
        state.high_score = 0;
        self.save(&state)?;
        Ok(state)
    }

    pub fn set_override(&self, display_override: Option<bool>) -> Result<(), StateError> {
        let mut state = self.load();
        if state.display_override == display_override {
            return Ok(());
        }
        state.display_override = display_override;
        self.save(&state)
    }
}
