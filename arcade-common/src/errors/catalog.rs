//! Error Catalog for Agent Arcade
//!
//! Every user-facing failure maps to a stable code (ARC-E001 through
//! ARC-E599) with a message, remediation steps and, where one exists, a
//! documentation link.
//!
//! # Error Code Ranges
//!
//! | Range      | Category    | Description                          |
//! |------------|-------------|--------------------------------------|
//! | E001-E099  | Config      | Settings file and environment        |
//! | E100-E199  | Hooks       | Host hooks document                  |
//! | E200-E299  | Scripts     | Hook script provisioning             |
//! | E300-E399  | Environment | Interpreter and home directory       |
//! | E400-E499  | Status      | Status artifact and persisted state  |
//! | E500-E599  | Internal    | Internal/unexpected errors           |

use serde::{Deserialize, Serialize};
use std::fmt;

const DOCS_BASE: &str = "https://agent-arcade.dev/docs";

/// Error code enumeration covering all Agent Arcade failure scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Config Errors (E001-E099)
    // =========================================================================
    /// Settings file could not be read
    ConfigReadError,
    /// Settings file contains invalid TOML
    ConfigParseError,
    /// Settings contain invalid values
    ConfigValidationError,
    /// Environment variable has invalid value
    ConfigEnvError,
    /// No platform configuration directory
    ConfigNoDirectory,
    /// Settings file could not be written
    ConfigWriteError,

    // =========================================================================
    // Hooks Errors (E100-E199)
    // =========================================================================
    /// Hooks document exists but could not be read
    HooksReadError,
    /// Hooks document directory could not be created
    HooksDirectoryError,
    /// Hooks document could not be written
    HooksWriteError,
    /// Backup of an unparsable hooks document failed
    HooksBackupFailed,
    /// Hooks document has an unexpected shape
    HooksMalformed,

    // =========================================================================
    // Scripts Errors (E200-E299)
    // =========================================================================
    /// Script directory could not be created
    ScriptsDirectoryError,
    /// Hook script could not be written
    ScriptsWriteError,
    /// Hook script could not be made executable
    ScriptsPermissionError,
    /// Interpreter or script path cannot be quoted for cmd
    ScriptsUnquotableArgument,

    // =========================================================================
    // Environment Errors (E300-E399)
    // =========================================================================
    /// Script interpreter not found or not working
    EnvInterpreterUnavailable,
    /// Home directory could not be determined
    EnvHomeNotFound,

    // =========================================================================
    // Status Errors (E400-E499)
    // =========================================================================
    /// Status artifact could not be written
    StatusWriteError,
    /// Status artifact could not be removed
    StatusRemoveError,
    /// Persisted state could not be written
    StateWriteError,

    // =========================================================================
    // Internal Errors (E500-E599)
    // =========================================================================
    /// Serialization of an internal document failed
    InternalSerializeError,
    /// Logging could not be initialized
    InternalLoggingError,
    /// File watcher failed
    InternalWatcherError,
}

impl ErrorCode {
    /// Returns the numeric error code (without prefix).
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            Self::ConfigReadError => 1,
            Self::ConfigParseError => 2,
            Self::ConfigValidationError => 3,
            Self::ConfigEnvError => 4,
            Self::ConfigNoDirectory => 5,
            Self::ConfigWriteError => 6,

            Self::HooksReadError => 100,
            Self::HooksDirectoryError => 101,
            Self::HooksWriteError => 102,
            Self::HooksBackupFailed => 103,
            Self::HooksMalformed => 104,

            Self::ScriptsDirectoryError => 200,
            Self::ScriptsWriteError => 201,
            Self::ScriptsPermissionError => 202,
            Self::ScriptsUnquotableArgument => 203,

            Self::EnvInterpreterUnavailable => 300,
            Self::EnvHomeNotFound => 301,

            Self::StatusWriteError => 400,
            Self::StatusRemoveError => 401,
            Self::StateWriteError => 402,

            Self::InternalSerializeError => 500,
            Self::InternalLoggingError => 501,
            Self::InternalWatcherError => 502,
        }
    }

    /// Returns the formatted error code string (e.g., "ARC-E001").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("ARC-E{:03}", self.code_number())
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code_number() {
            1..=99 => ErrorCategory::Config,
            100..=199 => ErrorCategory::Hooks,
            200..=299 => ErrorCategory::Scripts,
            300..=399 => ErrorCategory::Environment,
            400..=499 => ErrorCategory::Status,
            _ => ErrorCategory::Internal,
        }
    }

    /// Returns the full error entry with all metadata.
    #[must_use]
    pub fn entry(&self) -> ErrorEntry {
        ErrorEntry {
            code: self.code_string(),
            category: self.category(),
            message: self.message().to_string(),
            remediation: self
                .remediation()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            doc_url: self.doc_url(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ConfigReadError => "Failed to read settings file",
            Self::ConfigParseError => "Settings file contains invalid TOML syntax",
            Self::ConfigValidationError => "Settings contain invalid values",
            Self::ConfigEnvError => "Environment variable has an invalid value",
            Self::ConfigNoDirectory => "Could not determine the configuration directory",
            Self::ConfigWriteError => "Failed to write settings file",

            Self::HooksReadError => "Failed to read the hooks file",
            Self::HooksDirectoryError => "Failed to create the hooks directory",
            Self::HooksWriteError => "Failed to write the hooks file",
            Self::HooksBackupFailed => "Failed to back up an unreadable hooks file",
            Self::HooksMalformed => "The hooks file has an unexpected structure",

            Self::ScriptsDirectoryError => "Failed to create the hook script directory",
            Self::ScriptsWriteError => "Failed to write a hook script",
            Self::ScriptsPermissionError => "Failed to make a hook script executable",
            Self::ScriptsUnquotableArgument => "A hook script argument contains a double quote",

            Self::EnvInterpreterUnavailable => "Script interpreter is not available",
            Self::EnvHomeNotFound => "Home directory could not be determined",

            Self::StatusWriteError => "Failed to write the status file",
            Self::StatusRemoveError => "Failed to remove the status file",
            Self::StateWriteError => "Failed to save arcade state",

            Self::InternalSerializeError => "Internal serialization failure",
            Self::InternalLoggingError => "Failed to initialize logging",
            Self::InternalWatcherError => "File watcher failed",
        }
    }

    /// Returns remediation steps for this error.
    #[must_use]
    pub const fn remediation(&self) -> &'static [&'static str] {
        match self {
            Self::ConfigReadError => &[
                "Check that the settings file is readable: arcade config path",
                "Fix its permissions or delete it to fall back to defaults",
            ],
            Self::ConfigParseError => &[
                "Open the file shown by 'arcade config path' and fix the TOML syntax",
                "Delete the file to fall back to defaults",
            ],
            Self::ConfigValidationError => &[
                "Review the values shown by 'arcade config show'",
                "probe_timeout_ms must be between 100 and 60000",
                "interpreter must not be empty",
            ],
            Self::ConfigEnvError => &[
                "Check ARCADE_* environment variables for typos",
                "Unset the variable to use the settings file value",
            ],
            Self::ConfigNoDirectory => &[
                "Set HOME (or USERPROFILE on Windows)",
                "Or point ARCADE_CONFIG at a settings file",
            ],
            Self::ConfigWriteError => &[
                "Check permissions on the configuration directory",
                "Set ARCADE_CONFIG to a writable location",
            ],

            Self::HooksReadError => &[
                "Check permissions on the hooks file",
                "Retry with: arcade hooks install",
            ],
            Self::HooksDirectoryError => &[
                "Check that the editor settings directory (.cursor) is writable",
                "Retry with: arcade hooks install",
            ],
            Self::HooksWriteError => &[
                "Check that the hooks file and its directory are writable",
                "Close other tools that may lock the file",
                "Retry with: arcade hooks install",
            ],
            Self::HooksBackupFailed => &[
                "The hooks file could not be parsed and was left untouched",
                "Fix or move the file manually, then run: arcade hooks install",
            ],
            Self::HooksMalformed => &[
                "The hooks file must be an object with a 'hooks' object of arrays",
                "Fix the file manually, then run: arcade hooks install",
            ],

            Self::ScriptsDirectoryError => &[
                "Check that .cursor/hooks is writable",
                "Retry with: arcade hooks install",
            ],
            Self::ScriptsWriteError => &[
                "Check free disk space and permissions under .cursor/hooks",
                "Retry with: arcade hooks install",
            ],
            Self::ScriptsPermissionError => &[
                "Run: chmod +x on the scripts under .cursor/hooks/agent-arcade",
                "Retry with: arcade hooks install",
            ],
            Self::ScriptsUnquotableArgument => &[
                "Remove double quotes from 'interpreter' in the settings file",
                "Pass interpreter flags through a wrapper script instead",
            ],

            Self::EnvInterpreterUnavailable => &[
                "Install Node.js (https://nodejs.org) and make sure 'node' is on PATH",
                "Or set 'interpreter' in the settings file to an absolute path",
                "Retry with: arcade hooks install",
            ],
            Self::EnvHomeNotFound => &[
                "Set HOME (or USERPROFILE on Windows)",
                "Or use workspace scope: arcade --scope workspace hooks install",
            ],

            Self::StatusWriteError => &[
                "Check that the workspace .cursor directory is writable",
                "Reset the counter with: arcade stop",
            ],
            Self::StatusRemoveError => &[
                "Delete .cursor/agent-arcade-status.json manually",
            ],
            Self::StateWriteError => &[
                "Check permissions on the data directory",
                "Set ARCADE_DATA_DIR to a writable location",
            ],

            Self::InternalSerializeError => &[
                "Re-run with -v and report the log output",
            ],
            Self::InternalLoggingError => &[
                "Check ARCADE_LOG_FILE points to a writable location",
                "Unset ARCADE_LOG_FORMAT or set it to 'pretty' or 'json'",
            ],
            Self::InternalWatcherError => &[
                "Check that the workspace .cursor directory exists",
                "Restart the watcher: arcade watch",
            ],
        }
    }

    /// Returns documentation URL for this error, if available.
    #[must_use]
    pub fn doc_url(&self) -> Option<String> {
        let page = match self.category() {
            ErrorCategory::Config => "configuration",
            ErrorCategory::Hooks | ErrorCategory::Scripts => "hooks",
            ErrorCategory::Environment => "troubleshooting",
            ErrorCategory::Status | ErrorCategory::Internal => return None,
        };
        Some(format!("{DOCS_BASE}/{page}#{}", self.code_string().to_lowercase()))
    }

    /// Returns all error codes.
    #[must_use]
    pub const fn all() -> &'static [ErrorCode] {
        &[
            Self::ConfigReadError,
            Self::ConfigParseError,
            Self::ConfigValidationError,
            Self::ConfigEnvError,
            Self::ConfigNoDirectory,
            Self::ConfigWriteError,
            Self::HooksReadError,
            Self::HooksDirectoryError,
            Self::HooksWriteError,
            Self::HooksBackupFailed,
            Self::HooksMalformed,
            Self::ScriptsDirectoryError,
            Self::ScriptsWriteError,
            Self::ScriptsPermissionError,
            Self::ScriptsUnquotableArgument,
            Self::EnvInterpreterUnavailable,
            Self::EnvHomeNotFound,
            Self::StatusWriteError,
            Self::StatusRemoveError,
            Self::StateWriteError,
            Self::InternalSerializeError,
            Self::InternalLoggingError,
            Self::InternalWatcherError,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.message())
    }
}

/// Error category for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Settings file and environment (E001-E099)
    Config,
    /// Host hooks document (E100-E199)
    Hooks,
    /// Hook script provisioning (E200-E299)
    Scripts,
    /// Interpreter and home directory (E300-E399)
    Environment,
    /// Status artifact and persisted state (E400-E499)
    Status,
    /// Internal/unexpected errors (E500-E599)
    Internal,
}

impl ErrorCategory {
    /// Returns a human-readable name for the category.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Config => "Configuration",
            Self::Hooks => "Hooks",
            Self::Scripts => "Scripts",
            Self::Environment => "Environment",
            Self::Status => "Status",
            Self::Internal => "Internal",
        }
    }

    /// Returns a short description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Config => "Settings file and environment variable issues",
            Self::Hooks => "Problems reading or updating the editor hooks file",
            Self::Scripts => "Problems writing the hook scripts",
            Self::Environment => "Missing interpreter or home directory",
            Self::Status => "Agent counter and saved state issues",
            Self::Internal => "Internal errors that may indicate bugs",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Complete error entry with all metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Error code string (e.g., "ARC-E001")
    pub code: String,
    pub category: ErrorCategory,
    pub message: String,
    /// Steps to remediate the error
    pub remediation: Vec<String>,
    pub doc_url: Option<String>,
}

impl ErrorEntry {
    /// Formats the error for display with full remediation steps.
    #[must_use]
    pub fn format_full(&self) -> String {
        let mut output = format!("[{}] {}\n\n", self.code, self.message);

        if !self.remediation.is_empty() {
            output.push_str("Remediation steps:\n");
            for (i, step) in self.remediation.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, step));
            }
        }

        if let Some(url) = &self.doc_url {
            output.push_str(&format!("\nFor more information: {}\n", url));
        }

        output
    }

    /// Formats the error as a single line.
    #[must_use]
    pub fn format_brief(&self) -> String {
        format!("[{}] {}", self.code, self.message)
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_brief())
    }
}
