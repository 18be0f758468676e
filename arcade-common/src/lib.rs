//! Shared library for Agent Arcade.
//!
//! Agent Arcade registers two lifecycle hooks with the editor host so that a
//! small workspace-local counter tracks how many background agents are
//! running. The arcade panel is shown while that counter is non-zero.
//!
//! The interesting part is [`hooks`]: an idempotent reconciler that keeps
//! the tool's entries in `hooks.json` correct and singular while leaving
//! every other tool's entries untouched.

pub mod activation;
pub mod config;
pub mod display;
pub mod errors;
pub mod fs;
pub mod hooks;
pub mod logging;
pub mod probe;
pub mod scripts;
pub mod state;
pub mod status;

pub use activation::{
    ActivationContext, ActivationError, ActivationReport, Scope, TeardownReport, activate,
    deactivate, inspect,
};
pub use config::{ConfigError, Settings};
pub use display::{DisplayController, Transition, Visibility};
pub use errors::{ErrorCategory, ErrorCode, ErrorEntry};
pub use hooks::{
    HookKind, HookRegistry, HookState, HookStatus, HooksError, MarkerMatcher, OwnershipMatcher,
    ReconcileResult, RemoveResult, TOOL_MARKER,
};
pub use logging::{LogConfig, LogFormat, LoggingGuards, init_logging};
pub use probe::{DEFAULT_PROBE_TIMEOUT, home_directory, interpreter_available};
pub use scripts::{HookScriptPair, Platform, ProvisionReport, ScriptError, ScriptProvisioner};
pub use state::{PersistedState, StateError, StateStore};
pub use status::{StatusArtifact, StatusError};
