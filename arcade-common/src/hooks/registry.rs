//! Filesystem edge of the reconciler.

use super::document::{self, LoadedDocument};
use super::reconcile::{check_document, misshapen_kinds, reconcile_document, remove_owned};
use super::{HookState, HooksError, MarkerMatcher, OwnershipMatcher, ReconcileResult, RemoveResult};
use crate::fs::{atomic_write, create_backup};
use crate::scripts::HookScriptPair;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// A hooks document at a fixed path, plus the ownership rule applied to it.
#[derive(Debug, Clone)]
pub struct HookRegistry<M = MarkerMatcher> {
    path: PathBuf,
    matcher: M,
}

impl HookRegistry<MarkerMatcher> {
    /// Registry using the default [`TOOL_MARKER`](super::TOOL_MARKER) match.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_matcher(path, MarkerMatcher::default())
    }
}

impl<M: OwnershipMatcher> HookRegistry<M> {
    pub fn with_matcher(path: impl Into<PathBuf>, matcher: M) -> Self {
        Self {
            path: path.into(),
            matcher,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reports how the tool's hooks are registered. Never fails and never
    /// writes: unreadable or malformed documents read as
    /// [`HookStatus::None`](super::HookStatus::None).
    pub fn check_state(&self, expected: &HookScriptPair) -> HookState {
        match document::load(&self.path) {
            Ok(LoadedDocument::Missing) => {
                debug!("No hooks file at {}", self.path.display());
                HookState::none()
            }
            Ok(LoadedDocument::Corrupt { reason }) => {
                warn!(
                    "Hooks file {} is malformed ({}); treating as empty",
                    self.path.display(),
                    reason
                );
                HookState::none()
            }
            Ok(LoadedDocument::Parsed(doc)) => {
                check_document(&doc, &self.matcher, expected, Path::exists)
            }
            Err(e) => {
                warn!("{}; treating as empty", e);
                HookState::none()
            }
        }
    }

    /// Ensures exactly one owned entry per hook kind pointing at `expected`.
    ///
    /// A missing document starts from a fresh skeleton. A malformed one, or
    /// one whose start or stop kind is not an array, is backed up next to
    /// itself before being replaced. The file is only
    /// written when an entry list actually changed.
    pub fn reconcile(&self, expected: &HookScriptPair) -> Result<ReconcileResult, HooksError> {
        let mut backup = None;
        let mut doc = match document::load(&self.path)? {
            LoadedDocument::Parsed(doc) => doc,
            LoadedDocument::Missing => {
                debug!("Creating hooks file at {}", self.path.display());
                document::skeleton()
            }
            LoadedDocument::Corrupt { reason } => {
                error!(
                    "Hooks file {} is malformed ({}); it will be replaced and any \
                     configuration it held must be restored from the backup",
                    self.path.display(),
                    reason
                );
                backup = Some(self.backup()?);
                document::skeleton()
            }
        };

        let misshapen = misshapen_kinds(&doc);
        if !misshapen.is_empty() && backup.is_none() {
            let kinds: Vec<&str> = misshapen.iter().map(|k| k.key()).collect();
            error!(
                "Hook kind(s) {} in {} are not arrays; they will be replaced",
                kinds.join(", "),
                self.path.display()
            );
            backup = Some(self.backup()?);
        }

        let changed = reconcile_document(&mut doc, &self.matcher, expected)?;
        if !changed {
            debug!("Hooks in {} already up to date", self.path.display());
            return Ok(ReconcileResult {
                modified: false,
                backup,
            });
        }

        self.write(&doc)?;
        info!(
            "Updated hooks in {} (start: {}, stop: {})",
            self.path.display(),
            expected.start.display(),
            expected.stop.display()
        );
        Ok(ReconcileResult {
            modified: true,
            backup,
        })
    }

    /// Removes every owned entry from every hook kind.
    ///
    /// Missing or malformed documents are left alone and report zero
    /// removals.
    pub fn remove_owned_entries(&self) -> Result<RemoveResult, HooksError> {
        let mut doc = match document::load(&self.path)? {
            LoadedDocument::Parsed(doc) => doc,
            LoadedDocument::Missing => {
                debug!("No hooks file at {}; nothing to remove", self.path.display());
                return Ok(RemoveResult { removed_count: 0 });
            }
            LoadedDocument::Corrupt { reason } => {
                warn!(
                    "Hooks file {} is malformed ({}); leaving it untouched",
                    self.path.display(),
                    reason
                );
                return Ok(RemoveResult { removed_count: 0 });
            }
        };

        let removed_count = remove_owned(&mut doc, &self.matcher);
        if removed_count > 0 {
            self.write(&doc)?;
            info!(
                "Removed {} hook entr{} from {}",
                removed_count,
                if removed_count == 1 { "y" } else { "ies" },
                self.path.display()
            );
        }
        Ok(RemoveResult { removed_count })
    }

    fn backup(&self) -> Result<PathBuf, HooksError> {
        let saved = create_backup(&self.path).map_err(|source| HooksError::Backup {
            path: self.path.clone(),
            source,
        })?;
        warn!("Backed up hooks file to {}", saved.display());
        Ok(saved)
    }

    fn write(&self, doc: &serde_json::Value) -> Result<(), HooksError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| HooksError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = document::render(doc)?;
        atomic_write(&self.path, content.as_bytes()).map_err(|source| HooksError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
