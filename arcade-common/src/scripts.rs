//! Provisioning of the start/stop hook scripts.
//!
//! Each hook kind gets a thin platform wrapper (`hook.sh`/`hook.cmd`) that
//! runs an interpreted payload (`hook.js`). The payload applies the kind's
//! delta to the workspace status artifact, following the same protocol as
//! [`crate::status`].
//!
//! Files are only rewritten when their content differs, so repeated
//! activations do not touch the disk.

use crate::hooks::{HookKind, TOOL_MARKER};
use crate::status::{STATUS_DIR, STATUS_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Interpreter used by the payload scripts unless configured otherwise.
pub const DEFAULT_INTERPRETER: &str = "node";

/// Script flavor, resolved once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// POSIX shells with executable permission bits.
    Posix,
    /// Windows `cmd.exe`, no permission bits.
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }

    /// Wrapper file name for a hook kind.
    pub const fn wrapper_name(self, kind: HookKind) -> &'static str {
        match (self, kind) {
            (Platform::Posix, HookKind::Start) => "hook.sh",
            (Platform::Posix, HookKind::Stop) => "hook-stop.sh",
            (Platform::Windows, HookKind::Start) => "hook.cmd",
            (Platform::Windows, HookKind::Stop) => "hook-stop.cmd",
        }
    }

    /// Wrapper content invoking `payload` with `interpreter`.
    ///
    /// On Windows, `%` is doubled so cmd does not expand it, and a `"` in
    /// either argument is rejected since cmd has no way to escape it inside
    /// a quoted argument.
    pub fn wrapper_content(
        self,
        kind: HookKind,
        interpreter: &str,
        payload: &Path,
    ) -> Result<String, ScriptError> {
        let payload = payload.to_string_lossy();
        Ok(match self {
            Platform::Posix => format!(
                "#!/bin/sh\n\
                 # {TOOL_MARKER} {kind} hook (generated, do not edit)\n\
                 exec {} {} \"$@\"\n",
                shell_escape::unix::escape(Cow::Borrowed(interpreter)),
                shell_escape::unix::escape(payload),
            ),
            Platform::Windows => format!(
                "@echo off\r\n\
                 rem {TOOL_MARKER} {kind} hook (generated, do not edit)\r\n\
                 \"{}\" \"{}\" %*\r\n",
                cmd_quotable(interpreter)?,
                cmd_quotable(&payload)?,
            ),
        })
    }
}

/// Prepares `value` for use inside a double-quoted cmd argument.
fn cmd_quotable(value: &str) -> Result<String, ScriptError> {
    if value.contains('"') {
        return Err(ScriptError::Unquotable {
            value: value.to_string(),
        });
    }
    Ok(value.replace('%', "%%"))
}

/// Payload file name for a hook kind.
pub const fn payload_name(kind: HookKind) -> &'static str {
    match kind {
        HookKind::Start => "hook.js",
        HookKind::Stop => "hook-stop.js",
    }
}

const PAYLOAD_TEMPLATE: &str = r#"#!/usr/bin/env node
// {{MARKER}} status hook (generated, do not edit)
"use strict";
const fs = require("fs");
const path = require("path");

const DELTA = {{DELTA}};
const RESPONSE = {{RESPONSE}};

function readInput() {
  try {
    const raw = fs.readFileSync(0, "utf8");
    return raw.trim() ? JSON.parse(raw) : {};
  } catch (_) {
    return {};
  }
}

function workspaceRoot(input) {
  const roots = Array.isArray(input.workspace_roots) ? input.workspace_roots : [];
  return typeof roots[0] === "string" && roots[0] ? roots[0] : process.cwd();
}

function readCount(file) {
  try {
    const n = Number(JSON.parse(fs.readFileSync(file, "utf8")).activeCount);
    return Number.isInteger(n) && n > 0 ? n : 0;
  } catch (_) {
    return 0;
  }
}

function apply(file, delta) {
  const next = Math.max(0, readCount(file) + delta);
  if (next === 0) {
    try { fs.unlinkSync(file); } catch (_) {}
    return;
  }
  fs.mkdirSync(path.dirname(file), { recursive: true });
  const tmp = file + ".tmp";
  fs.writeFileSync(tmp, JSON.stringify({ activeCount: next, lastUpdate: Date.now() }));
  fs.renameSync(tmp, file);
}

try {
  apply(path.join(workspaceRoot(readInput()), {{STATUS_DIR}}, {{STATUS_FILE}}), DELTA);
} catch (_) {
  // The host must never be blocked by a counter failure.
}
process.stdout.write(JSON.stringify(RESPONSE) + "\n");
"#;

/// Payload script content for a hook kind.
pub fn payload_content(kind: HookKind) -> String {
    let response = match kind {
        HookKind::Start => r#"{ continue: true }"#,
        HookKind::Stop => "{}",
    };
    PAYLOAD_TEMPLATE
        .replace("{{MARKER}}", TOOL_MARKER)
        .replace("{{DELTA}}", &kind.delta().to_string())
        .replace("{{RESPONSE}}", response)
        .replace("{{STATUS_DIR}}", &js_string(STATUS_DIR))
        .replace("{{STATUS_FILE}}", &js_string(STATUS_FILE_NAME))
}

fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Absolute paths of the start and stop wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookScriptPair {
    pub start: PathBuf,
    pub stop: PathBuf,
}

impl HookScriptPair {
    /// Deterministic wrapper locations under `base_dir`.
    pub fn locate(base_dir: &Path, platform: Platform) -> Self {
        Self {
            start: base_dir.join(platform.wrapper_name(HookKind::Start)),
            stop: base_dir.join(platform.wrapper_name(HookKind::Stop)),
        }
    }

    pub fn path(&self, kind: HookKind) -> &Path {
        match kind {
            HookKind::Start => &self.start,
            HookKind::Stop => &self.stop,
        }
    }

    /// The hook `command` string registered for a kind.
    pub fn command(&self, kind: HookKind) -> String {
        self.path(kind).to_string_lossy().into_owned()
    }
}

/// What [`ScriptProvisioner::ensure`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionReport {
    pub scripts: HookScriptPair,
    /// Files whose content was (re)written during this call.
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to create script directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to write hook script {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to mark hook script {} executable: {source}", path.display())]
    Permissions { path: PathBuf, source: io::Error },

    #[error("Cannot quote '{value}' for cmd: it contains a double quote")]
    Unquotable { value: String },
}

/// Writes the hook scripts for one platform and interpreter.
#[derive(Debug, Clone)]
pub struct ScriptProvisioner {
    platform: Platform,
    interpreter: String,
}

impl Default for ScriptProvisioner {
    fn default() -> Self {
        Self::new(Platform::current(), DEFAULT_INTERPRETER)
    }
}

impl ScriptProvisioner {
    pub fn new(platform: Platform, interpreter: impl Into<String>) -> Self {
        Self {
            platform,
            interpreter: interpreter.into(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Where the wrappers live under `base_dir`, without touching disk.
    pub fn locate(&self, base_dir: &Path) -> HookScriptPair {
        HookScriptPair::locate(base_dir, self.platform)
    }

    /// Makes sure both wrappers and both payloads exist with current
    /// content. On POSIX the wrappers are made executable.
    pub fn ensure(&self, base_dir: &Path) -> Result<ProvisionReport, ScriptError> {
        fs::create_dir_all(base_dir).map_err(|source| ScriptError::CreateDir {
            path: base_dir.to_path_buf(),
            source,
        })?;

        let scripts = self.locate(base_dir);
        let mut written = Vec::new();

        for kind in HookKind::ALL {
            let payload = base_dir.join(payload_name(kind));
            if write_if_changed(&payload, payload_content(kind).as_bytes())? {
                written.push(payload.clone());
            }

            let wrapper = scripts.path(kind);
            let content = self
                .platform
                .wrapper_content(kind, &self.interpreter, &payload)?;
            if write_if_changed(wrapper, content.as_bytes())? {
                written.push(wrapper.to_path_buf());
            }

            if self.platform == Platform::Posix {
                make_executable(wrapper)?;
            }
        }

        if written.is_empty() {
            debug!("Hook scripts in {} already current", base_dir.display());
        } else {
            info!(
                "Wrote {} hook script file(s) in {}",
                written.len(),
                base_dir.display()
            );
        }

        Ok(ProvisionReport { scripts, written })
    }
}

/// Writes `content` unless the file already holds exactly these bytes.
fn write_if_changed(path: &Path, content: &[u8]) -> Result<bool, ScriptError> {
    if fs::read(path).is_ok_and(|existing| existing == content) {
        return Ok(false);
    }
    fs::write(path, content).map_err(|source| ScriptError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), ScriptError> {
    use std::os::unix::fs::PermissionsExt;

    let to_err = |source| ScriptError::Permissions {
        path: path.to_path_buf(),
        source,
    };
    let mut perms = fs::metadata(path).map_err(to_err)?.permissions();
    if perms.mode() & 0o111 == 0o111 {
        return Ok(());
    }
    perms.set_mode(perms.mode() | 0o755);
    fs::set_permissions(path, perms).map_err(to_err)
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), ScriptError> {
    Ok(())
}
