//! Error catalog for Agent Arcade
//!
//! Library modules report failures through their own `thiserror` enums;
//! each of those maps onto an [`ErrorCode`] so the CLI can print a stable
//! code with remediation steps.
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

pub mod catalog;

pub use catalog::{ErrorCategory, ErrorCode, ErrorEntry};

use crate::config::ConfigError;
use crate::hooks::HooksError;
use crate::scripts::ScriptError;
use crate::state::StateError;
use crate::status::StatusError;

impl HooksError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HooksError::Read { .. } => ErrorCode::HooksReadError,
            HooksError::CreateDir { .. } => ErrorCode::HooksDirectoryError,
            HooksError::Write { .. } => ErrorCode::HooksWriteError,
            HooksError::Backup { .. } => ErrorCode::HooksBackupFailed,
            HooksError::Serialize(_) => ErrorCode::InternalSerializeError,
            HooksError::Malformed(_) => ErrorCode::HooksMalformed,
        }
    }
}

impl ScriptError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScriptError::CreateDir { .. } => ErrorCode::ScriptsDirectoryError,
            ScriptError::Write { .. } => ErrorCode::ScriptsWriteError,
            ScriptError::Permissions { .. } => ErrorCode::ScriptsPermissionError,
            ScriptError::Unquotable { .. } => ErrorCode::ScriptsUnquotableArgument,
        }
    }
}

impl StatusError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StatusError::CreateDir { .. } | StatusError::Write { .. } => {
                ErrorCode::StatusWriteError
            }
            StatusError::Remove { .. } => ErrorCode::StatusRemoveError,
            StatusError::Serialize(_) => ErrorCode::InternalSerializeError,
        }
    }
}

impl StateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StateError::Write { .. } => ErrorCode::StateWriteError,
            StateError::Serialize(_) => ErrorCode::InternalSerializeError,
        }
    }
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Read { .. } => ErrorCode::ConfigReadError,
            ConfigError::Parse { .. } => ErrorCode::ConfigParseError,
            ConfigError::Serialize(_) => ErrorCode::InternalSerializeError,
            ConfigError::Write { .. } => ErrorCode::ConfigWriteError,
            ConfigError::Invalid(_) => ErrorCode::ConfigValidationError,
            ConfigError::NoConfigDir => ErrorCode::ConfigNoDirectory,
        }
    }
}
