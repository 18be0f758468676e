//! Environment probing: home directory and interpreter availability.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Upper bound on how long the interpreter version check may take.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Environment variables consulted for the home directory, in order.
pub const HOME_VARS: [&str; 2] = ["HOME", "USERPROFILE"];

/// Resolves the user's home directory from the environment.
pub fn home_directory() -> Option<PathBuf> {
    home_directory_from(|name| std::env::var(name).ok())
}

/// Resolves the home directory through an injectable variable lookup.
///
/// Empty values count as unset.
pub fn home_directory_from<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    HOME_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Checks whether `<interpreter> --version` runs successfully.
///
/// Spawn failures, non-zero exits and timeouts all report `false`. The
/// child is killed if it outlives `timeout`.
pub async fn interpreter_available(interpreter: &str, timeout: Duration) -> bool {
    let child = Command::new(interpreter)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            debug!("Could not start {}: {}", interpreter, e);
            return false;
        }
    };

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) => {
            debug!("{} --version exited with {}", interpreter, status);
            status.success()
        }
        Ok(Err(e)) => {
            debug!("Waiting for {} failed: {}", interpreter, e);
            false
        }
        Err(_) => {
            warn!(
                "{} --version did not finish within {:?}; treating as unavailable",
                interpreter, timeout
            );
            let _ = child.kill().await;
            false
        }
    }
}
