//! Workspace-local counter of running agents.
//!
//! The artifact lives at `<workspace>/.cursor/agent-arcade-status.json` and
//! holds `{ "activeCount": n, "lastUpdate": epoch_ms }`. A display watcher
//! polls it, so every update goes through a `.tmp` sibling and a rename.
//! When the count reaches zero the file is deleted rather than written
//! with a zero value.

use crate::fs::{remove_if_exists, tmp_sibling, write_via_tmp_sibling};
use crate::hooks::HOST_DIR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Directory (relative to the workspace root) holding the artifact.
pub const STATUS_DIR: &str = HOST_DIR;

/// File name of the artifact.
pub const STATUS_FILE_NAME: &str = "agent-arcade-status.json";

/// Path of the status artifact for a workspace.
pub fn status_path(workspace: &Path) -> PathBuf {
    workspace.join(STATUS_DIR).join(STATUS_FILE_NAME)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusArtifact {
    pub active_count: u64,
    /// Milliseconds since the Unix epoch.
    pub last_update: i64,
}

impl StatusArtifact {
    pub fn is_active(&self) -> bool {
        self.active_count > 0
    }
}

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Failed to create status directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write status file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to remove status file {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("Failed to serialize status: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads the artifact. Missing or unreadable files read as inactive.
pub fn read(path: &Path) -> StatusArtifact {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return StatusArtifact::default(),
        Err(e) => {
            warn!("Could not read status file {}: {}", path.display(), e);
            return StatusArtifact::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!("Status file {} is malformed: {}", path.display(), e);
        StatusArtifact::default()
    })
}

/// Applies a signed delta to the counter, saturating at zero.
///
/// Returns the resulting state. A zero result deletes the file.
pub fn apply_delta(path: &Path, delta: i64) -> Result<StatusArtifact, StatusError> {
    let current = read(path);
    let next = if delta.is_negative() {
        current.active_count.saturating_sub(delta.unsigned_abs())
    } else {
        current.active_count.saturating_add(delta.unsigned_abs())
    };

    if next == 0 {
        reset(path)?;
        debug!("Status count reached zero; removed {}", path.display());
        return Ok(StatusArtifact::default());
    }

    let updated = StatusArtifact {
        active_count: next,
        last_update: chrono::Utc::now().timestamp_millis(),
    };
    write(path, &updated)?;
    debug!(
        "Status count {} -> {} at {}",
        current.active_count,
        next,
        path.display()
    );
    Ok(updated)
}

/// Deletes the artifact (and any stray `.tmp` sibling).
pub fn reset(path: &Path) -> Result<(), StatusError> {
    for target in [path.to_path_buf(), tmp_sibling(path)] {
        remove_if_exists(&target).map_err(|source| StatusError::Remove {
            path: target.clone(),
            source,
        })?;
    }
    Ok(())
}

fn write(path: &Path, status: &StatusArtifact) -> Result<(), StatusError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StatusError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = serde_json::to_vec(status)?;
    write_via_tmp_sibling(path, &content).map_err(|source| StatusError::Write {
        path: path.to_path_buf(),
        source,
    })
}
