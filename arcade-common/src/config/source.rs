//! Tracking where a configuration value came from.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Origin of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigSource {
    /// Built-in default.
    Default,
    /// Loaded from the settings file.
    File { path: PathBuf },
    /// Overridden by an environment variable.
    Env { var: String },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File { path } => write!(f, "file ({})", path.display()),
            ConfigSource::Env { var } => write!(f, "env ({var})"),
        }
    }
}

/// A value paired with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sourced<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> Sourced<T> {
    pub fn default_value(value: T) -> Self {
        Self {
            value,
            source: ConfigSource::Default,
        }
    }

    pub fn from_env(value: T, var: impl Into<String>) -> Self {
        Self {
            value,
            source: ConfigSource::Env { var: var.into() },
        }
    }

    pub fn is_from_env(&self) -> bool {
        matches!(self.source, ConfigSource::Env { .. })
    }
}
