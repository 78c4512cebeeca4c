// Infrastructure layer - Files, configuration and logging
pub mod config;
pub mod csv_dataset_repository;
pub mod json_artifact_repository;
pub mod logging;

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling path a file is written to before being renamed into place.
pub(crate) fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Runs `write` against the staging sibling of `path`, then renames it into
/// place. The staging file is removed if either step fails.
pub(crate) fn write_staged<E>(
    path: &Path,
    write: impl FnOnce(&Path) -> Result<(), E>,
) -> Result<(), E>
where
    E: From<io::Error>,
{
    let staging = staging_path(path);
    let result = write(&staging).and_then(|()| fs::rename(&staging, path).map_err(E::from));

    if result.is_err() {
        match fs::remove_file(&staging) {
            Ok(()) => tracing::debug!("Removed partial write {}", staging.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Could not remove {}: {}", staging.display(), e),
        }
    }
    result
}

pub(crate) fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
