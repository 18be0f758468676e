//! Shared helper functions for arcade commands.

use arcade_common::config::ConfigError;
use arcade_common::{
    ActivationError, ErrorCode, HooksError, ScriptError, StateError, StatusError,
};
use colored::Colorize;
use serde::Serialize;

/// Indent each line of text with a given prefix.
pub fn indent_lines(text: &str, prefix: &str) -> String {
    let mut out = String::new();
    for (idx, line) in text.lines().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        out.push_str(line);
    }
    out
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Finds the catalog code of the first library error in the chain.
pub fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ActivationError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<HooksError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<ScriptError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<StatusError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<StateError>() {
            Some(e.code())
        } else if cause.is::<notify::Error>() {
            Some(ErrorCode::InternalWatcherError)
        } else {
            cause.downcast_ref::<ConfigError>().map(ConfigError::code)
        }
    })
}

/// Warning printed when the log subscriber cannot be installed.
///
/// Logging failures never abort a command, so this carries the catalog
/// entry instead of going through [`report_error`].
pub fn logging_disabled_warning(err: &anyhow::Error) -> String {
    format!(
        "{} logging disabled: {:#}\n{}",
        "warning:".yellow().bold(),
        err,
        indent_lines(&ErrorCode::InternalLoggingError.entry().format_full(), "  ")
    )
}

#[derive(Serialize)]
struct ErrorReport<'a> {
    error: String,
    code: Option<&'a str>,
    remediation: &'a [String],
    doc_url: Option<&'a str>,
}

/// Prints a failed command's error with its catalog entry, if any.
pub fn report_error(err: &anyhow::Error, json: bool) {
    let entry = error_code(err).map(|code| code.entry());

    if json {
        let report = ErrorReport {
            error: format!("{err:#}"),
            code: entry.as_ref().map(|e| e.code.as_str()),
            remediation: entry.as_ref().map(|e| e.remediation.as_slice()).unwrap_or(&[]),
            doc_url: entry.as_ref().and_then(|e| e.doc_url.as_deref()),
        };
        if let Ok(text) = serde_json::to_string_pretty(&report) {
            println!("{text}");
        }
        return;
    }

    eprintln!("{} {:#}", "error:".red().bold(), err);
    if let Some(entry) = entry {
        eprintln!();
        eprintln!("{}", indent_lines(&entry.format_full(), "  "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_indent_lines() {
        assert_eq!(indent_lines("hello\nworld", "  "), "  hello\n  world");
        assert_eq!(indent_lines("single", ">> "), ">> single");
        assert_eq!(indent_lines("", "  "), "");
    }

    #[test]
    fn test_error_code_through_context() {
        let err = anyhow::Error::new(HooksError::Write {
            path: PathBuf::from("/h/hooks.json"),
            source: io::Error::other("disk full"),
        })
        .context("installing hooks");
        assert_eq!(error_code(&err), Some(ErrorCode::HooksWriteError));
    }

    #[test]
    fn test_error_code_unknown_error() {
        assert_eq!(error_code(&anyhow::anyhow!("plain failure")), None);
    }

    #[test]
    fn test_watcher_error_code() {
        let err = anyhow::Error::new(notify::Error::generic("inotify limit reached"))
            .context("failed to create file watcher");
        assert_eq!(error_code(&err), Some(ErrorCode::InternalWatcherError));
    }

    #[test]
    fn test_logging_disabled_warning_carries_code() {
        let warning = logging_disabled_warning(&anyhow::anyhow!("failed to open log file"));
        assert!(warning.contains("failed to open log file"));
        assert!(warning.contains("ARC-E501"));
        assert!(warning.contains("ARCADE_LOG_FILE"));
    }

    #[test]
    fn test_activation_error_code() {
        let err = anyhow::Error::new(ActivationError::InterpreterUnavailable {
            interpreter: "node".into(),
        });
        assert_eq!(error_code(&err), Some(ErrorCode::EnvInterpreterUnavailable));
    }
}
