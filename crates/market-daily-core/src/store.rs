//! JSON persistence for snapshots.
//!
//! The encoding is pretty-printed with two-space indentation, keeps non-ASCII
//! text verbatim and ends with a newline. Files are replaced atomically.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::{PipelineError, Snapshot};

/// Exact text written by [`save_snapshot`].
pub fn to_json_string(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(snapshot)?;
    text.push('\n');
    Ok(text)
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), PipelineError> {
    let text = to_json_string(snapshot)?;
    write_atomic(path, text.as_bytes())?;
    info!("wrote snapshot for {} to {}", snapshot.date, path.display());
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, PipelineError> {
    let bytes = fs::read(path).map_err(|error| PipelineError::snapshot_io(path, error))?;
    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|source| PipelineError::SnapshotMalformed {
            path: path.to_path_buf(),
            source,
        })?;
    info!("loaded snapshot for {} from {}", snapshot.date, path.display());
    Ok(snapshot)
}

/// Write `bytes` to a sibling temporary file, then rename it over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|error| PipelineError::write_io(path, error))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|error| PipelineError::write_io(path, error))?;
    file.write_all(bytes)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|error| PipelineError::write_io(path, error))?;
    if let Some(permissions) = target_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(|error| PipelineError::write_io(path, error))?;
    }
    file.persist(path)
        .map_err(|error| PipelineError::write_io(path, error.error))?;
    Ok(())
}

/// Keep the mode of the file being replaced; new files get `0o644`.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
