//! Environment variable parsing with type safety.
//!
//! Provides a type-safe parser for `ARCADE_*` environment variables with
//! validation, error collection, and source tracking.

use super::source::Sourced;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during environment variable parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Invalid value for a variable.
    #[error("Invalid value for {var}: expected {expected}, got '{value}'")]
    InvalidValue {
        var: String,
        expected: String,
        value: String,
    },

    /// Value out of valid range.
    #[error("Value out of range for {var}: {value} (valid: {min}..={max})")]
    OutOfRange {
        var: String,
        value: String,
        min: String,
        max: String,
    },
}

type Lookup = Box<dyn Fn(&str) -> Option<String>>;

/// Type-safe environment variable parser.
///
/// Collects errors during parsing so all issues can be reported at once.
pub struct EnvParser {
    prefix: &'static str,
    lookup: Lookup,
    errors: Vec<EnvError>,
}

impl Default for EnvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvParser {
    /// Create a parser over the process environment with the `ARCADE_` prefix.
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Create a parser over an arbitrary variable source.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self {
            prefix: "ARCADE_",
            lookup: Box::new(lookup),
            errors: Vec::new(),
        }
    }

    /// Get all accumulated errors.
    pub fn errors(&self) -> &[EnvError] {
        &self.errors
    }

    /// Check if any errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Take ownership of errors.
    pub fn take_errors(&mut self) -> Vec<EnvError> {
        std::mem::take(&mut self.errors)
    }

    /// Get the full variable name with prefix.
    pub fn var_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    fn raw(&self, name: &str) -> Option<(String, String)> {
        let var_name = self.var_name(name);
        (self.lookup)(&var_name).map(|value| (var_name, value))
    }

    /// Get an optional string value; empty strings count as unset.
    pub fn get_opt_string(&mut self, name: &str) -> Option<Sourced<String>> {
        self.raw(name)
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(var, value)| Sourced::from_env(value, var))
    }

    /// Get an optional path value.
    pub fn get_opt_path(&mut self, name: &str) -> Option<Sourced<PathBuf>> {
        self.get_opt_string(name).map(|s| Sourced {
            value: PathBuf::from(s.value),
            source: s.source,
        })
    }

    /// Get an optional boolean value.
    ///
    /// Accepts: 1, true, yes, on (for true)
    ///          0, false, no, off (for false)
    pub fn get_opt_bool(&mut self, name: &str) -> Option<Sourced<bool>> {
        let (var_name, value) = self.raw(name)?;
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(Sourced::from_env(true, var_name)),
            "0" | "false" | "no" | "off" => Some(Sourced::from_env(false, var_name)),
            _ => {
                self.errors.push(EnvError::InvalidValue {
                    var: var_name,
                    expected: "boolean (true/false/1/0/yes/no)".to_string(),
                    value,
                });
                None
            }
        }
    }

    /// Get an optional u64 value with range validation.
    pub fn get_opt_u64_range(&mut self, name: &str, min: u64, max: u64) -> Option<Sourced<u64>> {
        let (var_name, value) = self.raw(name)?;
        match value.trim().parse::<u64>() {
            Ok(n) if (min..=max).contains(&n) => Some(Sourced::from_env(n, var_name)),
            Ok(n) => {
                self.errors.push(EnvError::OutOfRange {
                    var: var_name,
                    value: n.to_string(),
                    min: min.to_string(),
                    max: max.to_string(),
                });
                None
            }
            Err(_) => {
                self.errors.push(EnvError::InvalidValue {
                    var: var_name,
                    expected: "unsigned integer".to_string(),
                    value,
                });
                None
            }
        }
    }

    /// Get an optional value restricted to a fixed set of choices.
    pub fn get_opt_choice(&mut self, name: &str, choices: &[&str]) -> Option<Sourced<String>> {
        let (var_name, value) = self.raw(name)?;
        let normalized = value.trim().to_lowercase();
        if choices.contains(&normalized.as_str()) {
            Some(Sourced::from_env(normalized, var_name))
        } else {
            self.errors.push(EnvError::InvalidValue {
                var: var_name,
                expected: format!("one of {}", choices.join("/")),
                value,
            });
            None
        }
    }
}
