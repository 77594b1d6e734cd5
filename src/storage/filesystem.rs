//! File system operations
//!
//! Thin wrappers over `std::fs` used by the credential and file stores.

use log::{debug, warn};
use std::fs::{self, File};
use std::io::{ErrorKind, Result, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

const MAX_RETRIES: u64 = 3;
const RETRY_BACKOFF_MS: u64 = 20;

/// Create a directory and any missing parents
pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
}

/// Names of the regular files directly inside `dir`, in directory order.
///
/// Sub-directories, symlinks and names that are not valid UTF-8 are skipped.
/// Symlinks are not followed, even to regular files, so nothing outside the
/// directory can enter the index.
pub fn scan_regular_files(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!("Skipping non UTF-8 file name {:?} in {}", raw, dir.display()),
        }
    }

    debug!("Scanned {} file(s) in {}", names.len(), dir.display());
    Ok(names)
}

/// Removes a file in a single attempt
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
}

/// Removes a file, retrying briefly when the OS reports it as busy.
pub fn remove_file_with_retry(path: &Path) -> Result<()> {
    let mut attempt = 1;
    loop {
        match fs::remove_file(path) {
            Ok(()) => return Ok(()),
            Err(e) if attempt < MAX_RETRIES && e.kind() == ErrorKind::PermissionDenied => {
                thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt));
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Temporary sibling used while replacing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => path.with_extension(format!("{ext}.tmp")),
        None => path.with_extension("tmp"),
    }
}

/// Replaces `path` with `contents` by writing a temporary file and renaming it.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp = temp_path(path);
    let result = File::create(&temp)
        .and_then(|mut file| {
            file.write_all(contents)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp, path));

    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scan_skips_directories() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a"), "1").unwrap();
        fs::write(tmp.path().join("b"), "2").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("c"), "3").unwrap();

        let mut names = scan_regular_files(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn temp_path_appends_tmp() {
        assert_eq!(
            temp_path(Path::new("dir/users_data.txt")),
            PathBuf::from("dir/users_data.txt.tmp")
        );
        assert_eq!(temp_path(Path::new("record")), PathBuf::from("record.tmp"));
    }

    #[test]
    fn write_atomically_replaces_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("record.txt");

        write_atomically(&path, b"first\n").unwrap();
        write_atomically(&path, b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn remove_file_reports_missing() {
        let tmp = TempDir::new().unwrap();
        let err = remove_file(&tmp.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = remove_file_with_retry(&tmp.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn remove_file_leaves_directories_in_place() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("stuck");
        fs::create_dir(&dir).unwrap();

        assert!(remove_file(&dir).is_err());
        assert!(remove_file_with_retry(&dir).is_err());
        assert!(dir.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn scan_does_not_follow_symlinks() {
        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside.txt");
        fs::write(&outside, "secret").unwrap();
        let dir = tmp.path().join("account");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("own"), "1").unwrap();
        std::os::unix::fs::symlink(&outside, dir.join("link")).unwrap();

        assert_eq!(scan_regular_files(&dir).unwrap(), vec!["own"]);
    }
}
