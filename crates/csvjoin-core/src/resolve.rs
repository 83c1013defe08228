//! Input discovery and path validation.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{JoinError, Result};

/// Lists the `*.csv` files directly inside `dir`.
///
/// Hidden entries and anything that is not a regular file are skipped, the
/// same as a shell `*.csv` glob. Returns files sorted by filename.
pub fn resolve_from_folder(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(JoinError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| JoinError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| JoinError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() || is_hidden(&path) {
            continue;
        }

        if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(JoinError::NoCsvFiles {
            path: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), files = files.len(), "resolved input files");

    Ok(files)
}

/// Checks that `output` can be created without overwriting anything.
///
/// A bare filename has an empty parent, which means the working directory.
pub fn validate_output(output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(JoinError::OutputParentMissing {
            path: parent.to_path_buf(),
        });
    }

    // symlink_metadata also catches dangling links
    if std::fs::symlink_metadata(output).is_ok() {
        return Err(JoinError::OutputExists {
            path: output.to_path_buf(),
        });
    }

    Ok(())
}

/// Checks that the input list is non-empty and every entry is a regular file.
pub fn validate_inputs(files: &[PathBuf]) -> Result<()> {
    if files.is_empty() {
        return Err(JoinError::EmptyInputList);
    }

    if let Some(missing) = files.iter().find(|path| !path.is_file()) {
        return Err(JoinError::FileNotFound {
            path: missing.clone(),
        });
    }

    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
