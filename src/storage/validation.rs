//! File name validation
//!
//! Normalizes stored-file names and keeps every resolved path directly
//! inside the owning account's directory.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;
use crate::utils::validation::check_path_segment;

/// Trim surrounding whitespace and lowercase a raw file name
pub fn normalize_file_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an already-normalized file name
pub fn validate_file_name(name: &str, max_length: usize) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidName("Empty filename".into()));
    }

    if name.chars().count() > max_length {
        return Err(StorageError::InvalidName(format!(
            "Filename longer than {max_length} characters"
        )));
    }

    if name.contains(['\0', '\r', '\n']) {
        return Err(StorageError::InvalidName(format!(
            "{name:?} contains control characters"
        )));
    }

    check_path_segment(name).map_err(|_| StorageError::PathTraversal(name.to_string()))
}

/// Normalizes `raw` and resolves it inside `account_dir`.
///
/// Returns the normalized name together with the real path.
pub fn resolve_file_path(
    account_dir: &Path,
    raw: &str,
    max_length: usize,
) -> Result<(String, PathBuf), StorageError> {
    let name = normalize_file_name(raw);
    validate_file_name(&name, max_length)?;

    // exactly one normal component, so the join cannot leave account_dir
    let mut components = Path::new(&name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return Err(StorageError::PathTraversal(name)),
    }

    let path = account_dir.join(&name);
    if path.parent() != Some(account_dir) {
        return Err(StorageError::PathTraversal(name));
    }

    Ok((name, path))
}
