//! Configuration: settings file, environment overrides and well-known paths.

mod env;
mod settings;
mod source;

pub use env::{EnvError, EnvParser};
pub use settings::{LoadedSettings, PROBE_TIMEOUT_RANGE_MS, Scope, Settings};
pub use source::{ConfigSource, Sourced};

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

/// File name of the settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File name of the persisted arcade state inside the data directory.
pub const STATE_FILE_NAME: &str = "state.json";

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize settings: {0}")]
    Serialize(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),

    #[error("could not determine a configuration directory")]
    NoConfigDir,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "agent-arcade", "agent-arcade")
}

/// Path of the settings file. `ARCADE_CONFIG` overrides the default location.
pub fn config_path(env: &mut EnvParser) -> Result<PathBuf, ConfigError> {
    if let Some(path) = env.get_opt_path("CONFIG") {
        return Ok(path.value);
    }
    project_dirs()
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Directory for persisted state and logs. `ARCADE_DATA_DIR` overrides it.
pub fn data_dir(env: &mut EnvParser) -> Result<PathBuf, ConfigError> {
    if let Some(path) = env.get_opt_path("DATA_DIR") {
        return Ok(path.value);
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoConfigDir)
}
