//! Logging setup shared by the CLI and tests.
//!
//! Human-readable output goes to stderr; an optional log file receives the
//! same events through a non-blocking writer. The file is what the
//! activation warning points to under "view logs".

use crate::config::EnvParser;
use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Where and how to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub stderr: bool,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            stderr: true,
            file: None,
        }
    }
}

impl LogConfig {
    /// Reads `ARCADE_LOG_LEVEL`, `ARCADE_LOG_FORMAT` and `ARCADE_LOG_FILE`.
    pub fn from_env(default_level: &str) -> Self {
        Self::from_env_with(default_level, &mut EnvParser::new())
    }

    pub fn from_env_with(default_level: &str, env: &mut EnvParser) -> Self {
        let level = env
            .get_opt_string("LOG_LEVEL")
            .map(|v| v.value)
            .unwrap_or_else(|| default_level.to_string());
        let format = env
            .get_opt_choice("LOG_FORMAT", &["pretty", "text", "json"])
            .and_then(|v| v.value.parse().ok())
            .unwrap_or_default();
        let file = env.get_opt_path("LOG_FILE").map(|v| v.value);
        Self {
            level,
            format,
            stderr: true,
            file,
        }
    }

    pub fn with_stderr(mut self, enabled: bool) -> Self {
        self.stderr = enabled;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Sets the log file unless one was already chosen through the environment.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        if self.file.is_none() {
            self.file = Some(path.into());
        }
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Keeps the background log writer alive; drop it to flush.
#[derive(Debug, Default)]
pub struct LoggingGuards {
    file_guard: Option<WorkerGuard>,
    log_file: Option<PathBuf>,
}

impl LoggingGuards {
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn has_file_writer(&self) -> bool {
        self.file_guard.is_some()
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs the global subscriber described by `config`.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuards> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guards = LoggingGuards::default();

    if config.stderr {
        let layer = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact()
                .boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(io::stderr).boxed(),
        };
        layers.push(layer);
    }

    if let Some(path) = &config.file {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .context("log file path has no file name")?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;

        let appender = tracing_appender::rolling::never(&dir, file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = match config.format {
            LogFormat::Pretty => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        };
        layers.push(layer);
        guards.file_guard = Some(guard);
        guards.log_file = Some(path.clone());
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("failed to install the global tracing subscriber")?;

    Ok(guards)
}
