use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use epi_core::errors::{EpiError, ErrorInfo};

fn not_a_directory(path: &Path) -> EpiError {
    EpiError::NotADirectory(
        ErrorInfo::new("not-a-directory", "path component exists and is not a directory")
            .with_context("path", path.display().to_string()),
    )
}

fn permission_denied(path: &Path, err: impl ToString) -> EpiError {
    EpiError::PermissionDenied(
        ErrorInfo::new("permission-denied", err.to_string())
            .with_context("path", path.display().to_string()),
    )
}

fn io_error(code: &str, path: &Path, err: impl ToString) -> EpiError {
    EpiError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()))
}

/// Creates `root` and every missing ancestor, then checks that the leaf is
/// writable and traversable.
///
/// Existing files and directories are never removed or re-permissioned.
/// Returns the canonical absolute path, so repeated calls agree.
pub fn ensure_directory(root: &Path) -> Result<PathBuf, EpiError> {
    let absolute = if root.is_absolute() {
        root.to_path_buf()
    } else {
        env::current_dir()
            .map_err(|err| io_error("current-dir", root, err))?
            .join(root)
    };

    let mut current = PathBuf::new();
    for component in absolute.components() {
        current.push(component);
        match fs::metadata(&current) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(not_a_directory(&current)),
            Err(err) if err.kind() == ErrorKind::NotFound => create_one(&current)?,
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                return Err(permission_denied(&current, err))
            }
            Err(err) => return Err(io_error("directory-stat", &current, err)),
        }
    }

    // probe file, removed on drop
    tempfile::tempfile_in(&absolute).map_err(|err| permission_denied(&absolute, err))?;

    fs::canonicalize(&absolute).map_err(|err| io_error("directory-canonicalize", &absolute, err))
}

fn create_one(path: &Path) -> Result<(), EpiError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            if path.is_dir() {
                Ok(())
            } else {
                Err(not_a_directory(path))
            }
        }
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            Err(permission_denied(path, err))
        }
        Err(err) => Err(io_error("directory-create", path, err)),
    }
}
