//! Filesystem helpers shared by every writer in the crate.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Writes content to a file atomically using a temporary sibling file.
///
/// The temporary file lives in the same directory as `path` so the final
/// `rename` never crosses a filesystem boundary. On failure the temporary
/// file is removed.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = parent_dir(path)?;
    let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4()));
    write_then_rename(&temp_path, path, content)
}

/// Writes content through a fixed `<file name>.tmp` sibling, then renames.
///
/// Used for files that another process polls, where the temp name must be
/// predictable.
pub fn write_via_tmp_sibling(path: &Path, content: &[u8]) -> io::Result<()> {
    write_then_rename(&tmp_sibling(path), path, content)
}

/// Returns the `<file name>.tmp` sibling of `path`.
pub fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_then_rename(temp_path: &Path, path: &Path, content: &[u8]) -> io::Result<()> {
    let result = (|| {
        let mut file = fs::File::create(temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(temp_path, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(temp_path);
    }
    result
}

fn parent_dir(path: &Path) -> io::Result<&Path> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent),
        Some(_) => Ok(Path::new(".")),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no parent directory", path.display()),
        )),
    }
}

/// Creates a timestamped backup copy of a file next to it.
///
/// The backup is named `<file>.bak.<YYYYmmdd_HHMMSS>`.
pub fn create_backup(path: &Path) -> io::Result<PathBuf> {
    let backup_name = format!(
        "{}.bak.{}",
        path.file_name().and_then(|n| n.to_str()).unwrap_or("file"),
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    let backup_path = path
        .parent()
        .map(|p| p.join(&backup_name))
        .unwrap_or_else(|| PathBuf::from(&backup_name));

    fs::copy(path, &backup_path)?;
    debug!("Created backup: {}", backup_path.display());
    Ok(backup_path)
}

/// Removes a file, treating "not found" as success.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
