use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use epi_core::errors::{EpiError, ErrorInfo};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::directory::ensure_directory;

/// Number of graph-uid characters that prefix an evolution uid.
pub const GRAPH_UID_PREFIX_LEN: usize = 8;

const EVOLUTION_EXTENSION: &str = ".json";

fn io_error(code: &str, path: &Path, err: impl ToString) -> EpiError {
    EpiError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()))
}

/// Lowercase hex SHA-256 digest of the exact bytes that get written to disk.
pub fn compute_uid(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Stores a serialized graph under `root/<uid>` and returns the uid.
///
/// Saving identical bytes again yields the same uid and leaves a single file.
pub fn save_graph(root: &Path, bytes: &[u8]) -> Result<String, EpiError> {
    let uid = compute_uid(bytes);
    let path = root.join(&uid);
    let tmp = write_temp(root, bytes)?;
    tmp.persist(&path)
        .map_err(|err| io_error("artifact-persist", &path, err.error))?;
    Ok(uid)
}

/// Stores an evolution artifact under `root/<graph uid prefix>-<token>.json`.
///
/// Every call creates a new file, even for identical inputs.
pub fn save_evolution(root: &Path, graph_uid: &str, bytes: &[u8]) -> Result<String, EpiError> {
    if graph_uid.is_empty() || !graph_uid.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EpiError::InvalidParameter(
            ErrorInfo::new("graph-uid", "graph uid must be a non-empty hex digest")
                .with_context("graph_uid", graph_uid)
                .with_context("path", root.display().to_string()),
        ));
    }
    let head = &graph_uid[..graph_uid.len().min(GRAPH_UID_PREFIX_LEN)];
    let uid = format!("{head}-{}", Uuid::new_v4().simple());
    let path = root.join(format!("{uid}{EVOLUTION_EXTENSION}"));
    let tmp = write_temp(root, bytes)?;
    tmp.persist_noclobber(&path)
        .map_err(|err| io_error("artifact-persist", &path, err.error))?;
    Ok(uid)
}

/// Returns the single regular file in `root` whose name starts with `prefix`.
///
/// Hidden files are never candidates.
pub fn resolve(root: &Path, prefix: &str) -> Result<PathBuf, EpiError> {
    if !root.is_dir() {
        return Err(EpiError::NotADirectory(
            ErrorInfo::new("not-a-directory", "artifact directory does not exist")
                .with_context("path", root.display().to_string()),
        ));
    }
    let entries = fs::read_dir(root).map_err(|err| io_error("artifact-list", root, err))?;
    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| io_error("artifact-list", root, err))?;
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if name.starts_with('.') || !name.starts_with(prefix) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(EpiError::NotFound(
            ErrorInfo::new("not-found", "no artifact matches the uid prefix")
                .with_context("directory", root.display().to_string())
                .with_context("prefix", prefix)
                .with_context("candidates", "0"),
        )),
        1 => Ok(candidates.remove(0)),
        count => {
            let sample: Vec<String> = candidates
                .iter()
                .take(4)
                .filter_map(|path| path.file_name()?.to_str().map(str::to_owned))
                .collect();
            Err(EpiError::Ambiguous(
                ErrorInfo::new("ambiguous", "too many artifacts match the uid prefix")
                    .with_context("directory", root.display().to_string())
                    .with_context("prefix", prefix)
                    .with_context("candidates", count.to_string())
                    .with_hint(format!("use a longer prefix; matches include {}", sample.join(", "))),
            ))
        }
    }
}

/// Resolves a prefix and reads the artifact, returning its uid and bytes.
pub fn load(root: &Path, prefix: &str) -> Result<(String, Vec<u8>), EpiError> {
    let path = resolve(root, prefix)?;
    let bytes = fs::read(&path).map_err(|err| io_error("artifact-read", &path, err))?;
    Ok((uid_of(&path), bytes))
}

/// Recomputes the digest of a graph artifact and compares it with its name.
pub fn verify(path: &Path) -> Result<bool, EpiError> {
    let bytes = fs::read(path).map_err(|err| io_error("artifact-read", path, err))?;
    Ok(compute_uid(&bytes) == uid_of(path))
}

fn uid_of(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    name.strip_suffix(EVOLUTION_EXTENSION)
        .unwrap_or(name)
        .to_string()
}

/// Writes the bytes to a hidden temporary file next to their destination, so
/// the final rename never leaves a partial artifact under a uid.
fn write_temp(root: &Path, bytes: &[u8]) -> Result<NamedTempFile, EpiError> {
    let mut tmp = NamedTempFile::new_in(root).map_err(|err| io_error("artifact-create", root, err))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| io_error("artifact-write", tmp.path(), err))?;
    Ok(tmp)
}

/// Artifact directory opened once and reused for several operations.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Prepares the directory with [`ensure_directory`].
    pub fn open(root: impl AsRef<Path>) -> Result<Self, EpiError> {
        Ok(Self {
            root: ensure_directory(root.as_ref())?,
        })
    }

    /// Canonical directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// See [`save_graph`].
    pub fn save_graph(&self, bytes: &[u8]) -> Result<String, EpiError> {
        save_graph(&self.root, bytes)
    }

    /// See [`save_evolution`].
    pub fn save_evolution(&self, graph_uid: &str, bytes: &[u8]) -> Result<String, EpiError> {
        save_evolution(&self.root, graph_uid, bytes)
    }

    /// See [`resolve`].
    pub fn resolve(&self, prefix: &str) -> Result<PathBuf, EpiError> {
        resolve(&self.root, prefix)
    }

    /// See [`load`].
    pub fn load(&self, prefix: &str) -> Result<(String, Vec<u8>), EpiError> {
        load(&self.root, prefix)
    }
}
