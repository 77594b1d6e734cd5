//! Account file store
//!
//! CRUD over one account's flat file namespace. The directory on disk is
//! the source of truth; the in-memory index is rebuilt on `open` and kept
//! in step with every mutation made through the handle.

use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::storage::downloads::DownloadRecord;
use crate::storage::filesystem;
use crate::storage::results::DeleteAllReport;
use crate::storage::validation::resolve_file_path;
use crate::utils::validation::check_account_name;

/// Open handle on one account's storage directory
#[derive(Debug)]
pub struct AccountFileStore {
    account: String,
    root: PathBuf,
    files: Vec<String>,
    downloads: DownloadRecord,
    max_file_name_length: usize,
}

impl AccountFileStore {
    /// Opens (creating if absent) the account's directory and indexes its files.
    ///
    /// The account name is expected to have been authenticated by the
    /// caller; it is still validated because it becomes a path segment.
    pub fn open(account: &str, config: &StorageConfig) -> Result<Self, StorageError> {
        check_account_name(account, config.max_account_name_length)
            .map_err(|reason| StorageError::InvalidName(format!("{account:?} {reason}")))?;

        let root = config.account_dir(account);
        filesystem::create_directory(&root).map_err(|e| {
            error!("Failed to create {}: {}", root.display(), e);
            StorageError::from(e)
        })?;

        let files = filesystem::scan_regular_files(&root).map_err(|e| {
            error!("Failed to scan {}: {}", root.display(), e);
            StorageError::from(e)
        })?;

        info!(
            "Opened storage for {} ({} file(s) in {})",
            account,
            files.len(),
            root.display()
        );

        Ok(Self {
            account: account.to_string(),
            root,
            files,
            downloads: DownloadRecord::default(),
            max_file_name_length: config.max_file_name_length,
        })
    }

    /// Creates or fully overwrites a file.
    ///
    /// Overwriting an existing name is not an error here; callers that want
    /// to refuse it should check `contains` first.
    pub fn upload(&mut self, raw_name: &str, content: &str) -> Result<(), StorageError> {
        let (name, path) = self.resolve(raw_name)?;

        fs::write(&path, content).map_err(|e| {
            error!("Failed to write {} for {}: {}", name, self.account, e);
            StorageError::from(e)
        })?;

        info!(
            "Uploaded {} for {} ({} words)",
            name,
            self.account,
            word_count(content)
        );

        if !self.files.contains(&name) {
            self.files.push(name);
        }
        Ok(())
    }

    /// Current index, in the order of the last scan followed by new uploads.
    pub fn list(&self) -> &[String] {
        &self.files
    }

    /// Reads a file's content verbatim.
    ///
    /// A name missing from the index is `NotFound`; an indexed name whose
    /// file has gone from disk is an `IoError`.
    pub fn read(&mut self, raw_name: &str) -> Result<String, StorageError> {
        let (name, path) = self.resolve(raw_name)?;

        if !self.files.contains(&name) {
            return Err(StorageError::NotFound(name));
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            warn!(
                "Indexed file {} for {} could not be read: {}",
                name, self.account, e
            );
            StorageError::from(e)
        })?;

        self.downloads.record(&name);
        Ok(content)
    }

    /// Deletes one file. On failure the index entry is kept.
    pub fn delete(&mut self, raw_name: &str) -> Result<(), StorageError> {
        let (name, path) = self.resolve(raw_name)?;

        let Some(position) = self.files.iter().position(|f| *f == name) else {
            return Err(StorageError::NotFound(name));
        };

        filesystem::remove_file_with_retry(&path).map_err(|e| {
            error!(
                "Failed to delete {} for {} (real: {}): {}",
                name,
                self.account,
                path.display(),
                e
            );
            StorageError::from(e)
        })?;

        self.files.remove(position);
        info!("Deleted {} for {}", name, self.account);
        Ok(())
    }

    /// Attempts to delete every indexed file once, then clears the index.
    ///
    /// The index is cleared even for names that failed; they stay on disk
    /// and reappear on the next `open`.
    pub fn delete_all(&mut self) -> DeleteAllReport {
        let mut report = DeleteAllReport::default();

        for name in self.files.drain(..) {
            let path = self.root.join(&name);
            match filesystem::remove_file(&path) {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    error!("Failed to delete {} for {}: {}", name, self.account, e);
                    report.failed.push(name);
                }
            }
        }

        if report.is_complete() {
            info!("Deleted all {} file(s) for {}", report.succeeded, self.account);
        } else {
            warn!(
                "Deleted {} file(s) for {}, {} failed",
                report.succeeded,
                self.account,
                report.failed.len()
            );
        }
        report
    }

    /// Whether the normalized form of `raw_name` is indexed
    pub fn contains(&self, raw_name: &str) -> bool {
        self.resolve(raw_name)
            .map(|(name, _)| self.files.contains(&name))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names successfully read through this handle
    pub fn downloads(&self) -> &DownloadRecord {
        &self.downloads
    }

    fn resolve(&self, raw_name: &str) -> Result<(String, PathBuf), StorageError> {
        resolve_file_path(&self.root, raw_name, self.max_file_name_length)
    }
}

/// Whitespace-separated word count, reported on upload
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logging;
    use tempfile::TempDir;

    fn test_config(tmp: &TempDir) -> StorageConfig {
        StorageConfig {
            storage_root: tmp.path().to_string_lossy().into_owned(),
            ..StorageConfig::default()
        }
    }

    fn sorted(names: &[String]) -> Vec<String> {
        let mut names = names.to_vec();
        names.sort();
        names
    }

    #[test]
    fn open_creates_directory_and_indexes_files() {
        logging::init_for_tests();
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let dir = config.account_dir("alice");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("a"), "1").unwrap();
        fs::write(dir.join("b"), "2").unwrap();

        let store = AccountFileStore::open("alice", &config).unwrap();
        assert_eq!(sorted(store.list()), vec!["a", "b"]);
        assert_eq!(store.root(), dir.as_path());

        let fresh = AccountFileStore::open("bobby", &config).unwrap();
        assert!(fresh.is_empty());
        assert!(config.account_dir("bobby").is_dir());
    }

    #[test]
    fn open_rejects_unsafe_account_names() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        for account in ["..", "../alice", "a/b", ""] {
            assert!(matches!(
                AccountFileStore::open(account, &config),
                Err(StorageError::InvalidName(_))
            ));
        }
    }

    #[test]
    fn upload_normalizes_and_round_trips() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();

        store.upload("Report.TXT", "hello").unwrap();
        assert_eq!(store.read("report.txt").unwrap(), "hello");
        assert_eq!(store.read("  REPORT.txt ").unwrap(), "hello");
        assert_eq!(store.list(), ["report.txt"]);
        assert!(store.root().join("report.txt").is_file());
    }

    #[test]
    fn upload_overwrites_without_duplicating() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();

        store.upload("x", "a").unwrap();
        store.upload("X ", "b").unwrap();

        assert_eq!(store.read("x").unwrap(), "b");
        assert_eq!(store.list(), ["x"]);
    }

    #[test]
    fn upload_preserves_multiline_content() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();

        store.upload("list", "one\ntwo\n\nthree").unwrap();
        assert_eq!(store.read("list").unwrap(), "one\ntwo\n\nthree");
    }

    #[test]
    fn upload_rejects_bad_names() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();

        assert!(matches!(
            store.upload("   ", "x"),
            Err(StorageError::InvalidName(_))
        ));
        assert!(matches!(
            store.upload("../bobby/evil", "x"),
            Err(StorageError::PathTraversal(_))
        ));
        assert!(store.is_empty());
        assert!(!tmp.path().join("bobby").exists());
    }

    #[test]
    fn read_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();

        assert!(matches!(store.read("nope"), Err(StorageError::NotFound(ref n)) if n == "nope"));
        assert!(store.downloads().is_empty());
    }

    #[test]
    fn read_stale_index_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();
        store.upload("notes", "buy milk").unwrap();

        fs::remove_file(store.root().join("notes")).unwrap();

        assert!(matches!(store.read("notes"), Err(StorageError::IoError(_))));
        assert_eq!(store.list(), ["notes"]);
    }

    #[test]
    fn reads_are_recorded_once() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();
        store.upload("a", "1").unwrap();
        store.upload("b", "2").unwrap();

        store.read("b").unwrap();
        store.read("A").unwrap();
        store.read("b").unwrap();
        store.delete("b").unwrap();

        assert_eq!(store.downloads().names(), ["b", "a"]);
    }

    #[test]
    fn delete_missing_leaves_index_alone() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();
        store.upload("keep", "x").unwrap();

        assert!(matches!(store.delete("missing"), Err(StorageError::NotFound(_))));
        assert_eq!(store.list(), ["keep"]);
    }

    #[test]
    fn delete_failure_keeps_index_entry() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();
        store.upload("stuck", "x").unwrap();

        // swap the file for a directory so unlinking it fails
        let path = store.root().join("stuck");
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(matches!(store.delete("stuck"), Err(StorageError::IoError(_))));
        assert!(store.contains("stuck"));
    }

    #[test]
    fn delete_removes_file_and_entry() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();
        store.upload("a", "1").unwrap();
        store.upload("b", "2").unwrap();

        store.delete(" A").unwrap();

        assert_eq!(store.list(), ["b"]);
        assert!(!store.root().join("a").exists());
    }

    #[test]
    fn delete_all_clears_index_despite_failures() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let mut store = AccountFileStore::open("alice", &config).unwrap();
        store.upload("a", "1").unwrap();
        store.upload("b", "2").unwrap();

        let b = store.root().join("b");
        fs::remove_file(&b).unwrap();
        fs::create_dir(&b).unwrap();

        let report = store.delete_all();
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, vec!["b".to_string()]);
        assert_eq!(report.total(), 2);
        assert!(store.list().is_empty());
        assert!(b.exists());
        assert!(!store.root().join("a").exists());
    }

    #[test]
    fn delete_all_on_empty_store() {
        let tmp = TempDir::new().unwrap();
        let mut store = AccountFileStore::open("alice", &test_config(&tmp)).unwrap();

        let report = store.delete_all();
        assert_eq!(report, DeleteAllReport::default());
        assert!(report.is_complete());
    }

    #[test]
    fn accounts_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let mut alice = AccountFileStore::open("alice", &config).unwrap();
        let mut bobby = AccountFileStore::open("bobby", &config).unwrap();

        alice.upload("notes", "alice's").unwrap();

        assert!(matches!(bobby.read("notes"), Err(StorageError::NotFound(_))));
        assert!(bobby.is_empty());
        assert_eq!(alice.account(), "alice");
    }

    #[test]
    fn counts_words() {
        assert_eq!(word_count("buy milk"), 2);
        assert_eq!(word_count("  one\ntwo\tthree  "), 3);
        assert_eq!(word_count(""), 0);
    }
}
