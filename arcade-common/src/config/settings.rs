//! User settings stored in `config.toml`.

use super::env::{EnvError, EnvParser};
use super::source::{ConfigSource, Sourced};
use super::ConfigError;
use crate::fs::atomic_write;
use crate::scripts::DEFAULT_INTERPRETER;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Valid range for the interpreter probe timeout, in milliseconds.
pub const PROBE_TIMEOUT_RANGE_MS: (u64, u64) = (100, 60_000);

/// Which hooks document the tool registers itself in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// `~/.cursor/hooks.json`, scripts under `~/.cursor/hooks/agent-arcade/`.
    #[default]
    Global,
    /// `<workspace>/.cursor/hooks.json`, scripts under the workspace.
    Workspace,
}

impl Scope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Global => "global",
            Scope::Workspace => "workspace",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "global" => Ok(Scope::Global),
            "workspace" => Ok(Scope::Workspace),
            other => Err(format!("unknown scope '{other}' (expected global/workspace)")),
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the arcade panel automatically while agents run.
    pub auto_show: bool,
    /// Where hooks are registered.
    pub scope: Scope,
    /// Interpreter running the payload scripts.
    pub interpreter: String,
    /// Bound on the interpreter availability check.
    pub probe_timeout_ms: u64,
    /// Log filter used when `ARCADE_LOG_LEVEL` is not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_show: true,
            scope: Scope::Global,
            interpreter: DEFAULT_INTERPRETER.to_string(),
            probe_timeout_ms: 5_000,
            log_level: None,
        }
    }
}

/// Settings together with where each value came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    pub sources: BTreeMap<&'static str, ConfigSource>,
    /// Environment overrides that were ignored because they were invalid.
    pub warnings: Vec<EnvError>,
}

impl Settings {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Reads settings from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings file at {}; using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the file at `path`, then applies `ARCADE_*` overrides.
    pub fn load(path: &Path, env: &mut EnvParser) -> Result<LoadedSettings, ConfigError> {
        let file_exists = path.exists();
        let mut settings = Self::load_from(path)?;
        let file_source = if file_exists {
            ConfigSource::File {
                path: path.to_path_buf(),
            }
        } else {
            ConfigSource::Default
        };

        let mut sources: BTreeMap<&'static str, ConfigSource> = [
            "auto_show",
            "scope",
            "interpreter",
            "probe_timeout_ms",
            "log_level",
        ]
        .into_iter()
        .map(|key| (key, file_source.clone()))
        .collect();

        let mut apply = |key: &'static str, source: ConfigSource| {
            sources.insert(key, source);
        };

        if let Some(v) = env.get_opt_bool("AUTO_SHOW") {
            settings.auto_show = v.value;
            apply("auto_show", v.source);
        }
        if let Some(v) = env.get_opt_choice("SCOPE", &["global", "workspace"])
            && let Ok(scope) = v.value.parse()
        {
            settings.scope = scope;
            apply("scope", v.source);
        }
        if let Some(v) = env.get_opt_string("INTERPRETER") {
            settings.interpreter = v.value;
            apply("interpreter", v.source);
        }
        let (min, max) = PROBE_TIMEOUT_RANGE_MS;
        if let Some(v) = env.get_opt_u64_range("PROBE_TIMEOUT_MS", min, max) {
            settings.probe_timeout_ms = v.value;
            apply("probe_timeout_ms", v.source);
        }

        Ok(LoadedSettings {
            settings,
            path: path.to_path_buf(),
            sources,
            warnings: env.take_errors(),
        })
    }

    /// Rejects values the rest of the crate cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = PROBE_TIMEOUT_RANGE_MS;
        if !(min..=max).contains(&self.probe_timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "probe_timeout_ms must be within {min}..={max}, got {}",
                self.probe_timeout_ms
            )));
        }
        if self.interpreter.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "interpreter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Writes the settings file atomically, creating its directory.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        atomic_write(path, content.as_bytes()).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl LoadedSettings {
    /// Value and origin of one setting, for display.
    pub fn describe(&self) -> Vec<(&'static str, String, ConfigSource)> {
        let s = &self.settings;
        let value_of = |key: &str| -> String {
            match key {
                "auto_show" => s.auto_show.to_string(),
                "scope" => s.scope.to_string(),
                "interpreter" => s.interpreter.clone(),
                "probe_timeout_ms" => s.probe_timeout_ms.to_string(),
                "log_level" => s.log_level.clone().unwrap_or_else(|| "-".to_string()),
                _ => String::new(),
            }
        };
        self.sources
            .iter()
            .map(|(key, source)| (*key, value_of(key), source.clone()))
            .collect()
    }

    /// The settings value of `auto_show` with its source.
    pub fn auto_show(&self) -> Sourced<bool> {
        Sourced {
            value: self.settings.auto_show,
            source: self
                .sources
                .get("auto_show")
                .cloned()
                .unwrap_or(ConfigSource::Default),
        }
    }
}
