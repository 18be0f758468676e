//! Hook registration management for the editor host.
//!
//! The host reads lifecycle hooks from a `hooks.json` document, either
//! globally (`~/.cursor/hooks.json`) or per workspace
//! (`<root>/.cursor/hooks.json`):
//!
//! ```json
//! {
//!   "version": 1,
//!   "hooks": {
//!     "beforeSubmitPrompt": [{ "command": "/abs/path/hook.sh" }],
//!     "stop": [{ "command": "/abs/path/hook-stop.sh" }]
//!   }
//! }
//! ```
//!
//! Other tools share the same file. An entry belongs to Agent Arcade when
//! its `command` contains [`TOOL_MARKER`]; everything else is passed through
//! untouched.
//!
//! The module is split into a pure core ([`reconcile`]) operating on
//! `serde_json::Value` documents and a thin filesystem edge
//! ([`HookRegistry`]) doing one read and at most one write per call.

pub mod document;
pub mod reconcile;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use registry::HookRegistry;

/// Substring identifying hook entries owned by this tool.
///
/// Matching is deliberately loose so entries from any historical install
/// location or version are recognized.
pub const TOOL_MARKER: &str = "agent-arcade";

/// Directory holding the host's configuration.
pub const HOST_DIR: &str = ".cursor";

/// File name of the hooks document.
pub const HOOKS_FILE_NAME: &str = "hooks.json";

/// Schema version written into fresh documents.
pub const HOOKS_DOCUMENT_VERSION: u64 = 1;

/// The two hook kinds this tool registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookKind {
    /// Fired before an agent operation begins.
    Start,
    /// Fired when an agent operation completes.
    Stop,
}

impl HookKind {
    /// Both kinds in document order.
    pub const ALL: [HookKind; 2] = [HookKind::Start, HookKind::Stop];

    /// Key of this kind inside the document's `hooks` object.
    pub const fn key(self) -> &'static str {
        match self {
            HookKind::Start => "beforeSubmitPrompt",
            HookKind::Stop => "stop",
        }
    }

    /// Counter delta applied by this kind's payload script.
    pub const fn delta(self) -> i64 {
        match self {
            HookKind::Start => 1,
            HookKind::Stop => -1,
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Decides whether a hook command belongs to this tool.
///
/// Implemented for [`MarkerMatcher`] and for plain closures so tests can
/// inject edge cases without rebuilding the registry.
pub trait OwnershipMatcher {
    fn is_owned(&self, command: &str) -> bool;
}

impl<F> OwnershipMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn is_owned(&self, command: &str) -> bool {
        self(command)
    }
}

/// Substring-based ownership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatcher {
    marker: String,
}

impl MarkerMatcher {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for MarkerMatcher {
    fn default() -> Self {
        Self::new(TOOL_MARKER)
    }
}

impl OwnershipMatcher for MarkerMatcher {
    fn is_owned(&self, command: &str) -> bool {
        command.contains(&self.marker)
    }
}

/// Installation status of the tool's hooks in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStatus {
    /// No owned entries (or no readable document).
    None,
    /// Owned entries exist for only one of the two kinds.
    Partial,
    /// Both kinds have owned entries but they point at the wrong or a
    /// missing script, or are duplicated.
    Stale,
    /// Exactly one correct owned entry per kind and both scripts exist.
    Valid,
}

impl fmt::Display for HookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookStatus::None => write!(f, "Not installed"),
            HookStatus::Partial => write!(f, "Partially installed"),
            HookStatus::Stale => write!(f, "Needs update"),
            HookStatus::Valid => write!(f, "Installed"),
        }
    }
}

/// Result of [`HookRegistry::check_state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookState {
    pub status: HookStatus,
    /// First owned command found under the start kind.
    pub start_command: Option<String>,
    /// First owned command found under the stop kind.
    pub stop_command: Option<String>,
}

impl HookState {
    pub fn none() -> Self {
        Self {
            status: HookStatus::None,
            start_command: None,
            stop_command: None,
        }
    }
}

/// Result of [`HookRegistry::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileResult {
    /// Whether the document was written.
    pub modified: bool,
    /// Backup of a malformed document that was replaced.
    pub backup: Option<PathBuf>,
}

/// Result of [`HookRegistry::remove_owned_entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveResult {
    pub removed_count: usize,
}

/// Errors raised while reconciling or cleaning a hooks document.
///
/// Read-side corruption is never an error; only I/O that would lose data
/// or leave the host misconfigured is reported.
#[derive(Debug, Error)]
pub enum HooksError {
    #[error("Failed to read hooks file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write hooks file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to back up malformed hooks file {}: {source}", path.display())]
    Backup { path: PathBuf, source: io::Error },

    #[error("Failed to serialize hooks document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Hooks document is malformed: {0}")]
    Malformed(String),
}

/// Path of the global hooks document under a home directory.
pub fn global_hooks_path(home: &Path) -> PathBuf {
    home.join(HOST_DIR).join(HOOKS_FILE_NAME)
}

/// Path of the workspace-local hooks document.
pub fn workspace_hooks_path(workspace: &Path) -> PathBuf {
    workspace.join(HOST_DIR).join(HOOKS_FILE_NAME)
}
