//! Loading and rendering of hooks documents.
//!
//! Documents are kept as `serde_json::Value` so unknown top-level keys,
//! unknown hook kinds and unknown entry properties survive a round-trip
//! (key order included, via `preserve_order`).

use super::{HOOKS_DOCUMENT_VERSION, HooksError};
use serde_json::{Map, Value, json};
use std::fs;
use std::io;
use std::path::Path;

/// Outcome of reading a hooks document from disk.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedDocument {
    /// No file at the path (first run).
    Missing,
    /// File exists but is not a usable hooks document.
    Corrupt { reason: String },
    /// Parsed and structurally valid.
    Parsed(Value),
}

/// Reads and validates the document at `path`.
///
/// Only I/O errors other than "not found" are returned as errors; invalid
/// JSON and unexpected shapes become [`LoadedDocument::Corrupt`].
pub fn load(path: &Path) -> Result<LoadedDocument, HooksError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(parse(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(LoadedDocument::Missing),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(LoadedDocument::Corrupt {
            reason: format!("not valid UTF-8: {e}"),
        }),
        Err(source) => Err(HooksError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses document text, classifying anything unusable as corrupt.
pub fn parse(content: &str) -> LoadedDocument {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            return LoadedDocument::Corrupt {
                reason: e.to_string(),
            };
        }
    };

    match validate(&value) {
        Ok(()) => LoadedDocument::Parsed(value),
        Err(reason) => LoadedDocument::Corrupt { reason },
    }
}

/// Checks the structural shape the reconciler relies on.
///
/// The root must be an object and `hooks`, when present, must be an object.
/// Kind values are not inspected here: other tools may store any shape under
/// their own kinds, and the reconciler only touches its own two.
pub fn validate(value: &Value) -> Result<(), String> {
    let root = value
        .as_object()
        .ok_or_else(|| "document root is not an object".to_string())?;

    match root.get("hooks") {
        None | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err("'hooks' is not an object".to_string()),
    }
}

/// A fresh `{ "version": 1, "hooks": {} }` document.
pub fn skeleton() -> Value {
    json!({
        "version": HOOKS_DOCUMENT_VERSION,
        "hooks": {}
    })
}

/// Renders a document the way it is written to disk.
pub fn render(value: &Value) -> Result<String, HooksError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    Ok(content)
}

/// Returns the `hooks` object, creating it if absent.
pub(crate) fn hooks_object_mut(value: &mut Value) -> Result<&mut Map<String, Value>, HooksError> {
    let root = value
        .as_object_mut()
        .ok_or_else(|| HooksError::Malformed("document root is not an object".to_string()))?;

    root.entry("hooks")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| HooksError::Malformed("'hooks' is not an object".to_string()))
}

/// Returns the entries under `kind`, if the document has them.
pub(crate) fn entries<'a>(value: &'a Value, kind: &str) -> Option<&'a Vec<Value>> {
    value.get("hooks")?.get(kind)?.as_array()
}

/// Returns the `command` string of an entry, if it has one.
pub(crate) fn entry_command(entry: &Value) -> Option<&str> {
    entry.get("command").and_then(Value::as_str)
}
