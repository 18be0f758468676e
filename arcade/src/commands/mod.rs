//! Subcommand implementations.

pub mod config;
pub mod display;
pub mod helpers;
pub mod hooks;
pub mod status;
pub mod watch;

use arcade_common::config::LoadedSettings;
use arcade_common::status::status_path;
use arcade_common::{ActivationContext, DisplayController, Scope, StateStore};
use std::path::PathBuf;

/// Resolved invocation context shared by every subcommand.
pub struct AppContext {
    pub workspace: PathBuf,
    pub scope: Scope,
    pub loaded: LoadedSettings,
    pub state: StateStore,
    pub log_file: PathBuf,
    pub json: bool,
}

impl AppContext {
    pub fn activation(&self) -> ActivationContext {
        ActivationContext::from_settings(&self.loaded.settings, &self.workspace)
            .with_scope(self.scope)
    }

    pub fn status_path(&self) -> PathBuf {
        status_path(&self.workspace)
    }

    /// Controller seeded from settings, persisted override and the current
    /// counter.
    pub fn display_controller(&self) -> DisplayController {
        let persisted = self.state.load();
        let mut controller =
            DisplayController::new(self.loaded.settings.auto_show, persisted.display_override);
        controller.observe(&arcade_common::status::read(&self.status_path()));
        controller
    }
}
