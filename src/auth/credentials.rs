//! Credential storage and management
//!
//! Durable registry of account name to password verifier. The record is
//! loaded once when the store is opened and rewritten in full after every
//! successful registration.

use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use argon2::Argon2;

use super::validator::{validate_account_name, validate_password};
use super::verifier::{self, hash_password, verify_password};
use crate::config::StorageConfig;
use crate::error::AuthError;
use crate::storage::filesystem;
use crate::utils::validation::RECORD_DELIMITER;

/// Account registry backed by the credential record
pub struct CredentialStore {
    config: StorageConfig,
    record_path: PathBuf,
    accounts: BTreeMap<String, String>,
    hasher: Argon2<'static>,
    /// Verified against for unknown accounts so both failure modes do similar work
    dummy_verifier: OnceLock<Option<String>>,
}

impl CredentialStore {
    /// Opens the store, loading whatever the credential record holds.
    ///
    /// A missing or unreadable record yields an empty store. Only invalid
    /// hashing parameters in `config` are reported as an error.
    pub fn open(config: &StorageConfig) -> Result<Self, AuthError> {
        let hasher = verifier::hasher(config)?;
        let record_path = config.credentials_path();
        let accounts = load_records(&record_path);

        info!(
            "Loaded {} account(s) from {}",
            accounts.len(),
            record_path.display()
        );

        Ok(Self {
            config: config.clone(),
            record_path,
            accounts,
            hasher,
            dummy_verifier: OnceLock::new(),
        })
    }

    /// Registers a new account and provisions its storage directory.
    ///
    /// The record is saved before the directory is created. If saving fails
    /// the account is not registered. If only provisioning fails the account
    /// stays registered and `AccountFileStore::open` creates the directory later.
    pub fn register(&mut self, name: &str, password: &str) -> Result<(), AuthError> {
        validate_account_name(name, &self.config)?;
        validate_password(password, &self.config)?;

        if self.accounts.contains_key(name) {
            return Err(AuthError::AlreadyExists(name.to_string()));
        }

        let stored = hash_password(&self.hasher, password)?;
        self.accounts.insert(name.to_string(), stored);

        if let Err(e) = self.save() {
            self.accounts.remove(name);
            error!("Registration of {} rolled back: {}", name, e);
            return Err(e);
        }

        info!("Registered account {}", name);

        let account_dir = self.config.account_dir(name);
        filesystem::create_directory(&account_dir).map_err(|e| {
            error!(
                "Failed to create storage for {} at {}: {}",
                name,
                account_dir.display(),
                e
            );
            AuthError::Provisioning(e)
        })
    }

    /// Returns true iff the account exists and the password matches its verifier.
    pub fn authenticate(&self, name: &str, password: &str) -> bool {
        let verified = match self.accounts.get(name) {
            Some(stored) => verify_password(password, stored),
            None => {
                if let Some(dummy) = self.dummy_verifier() {
                    let _ = verify_password(password, dummy);
                }
                false
            }
        };

        if verified {
            info!("Authenticated account {}", name);
        } else {
            warn!("Authentication failed for account {}", name);
        }
        verified
    }

    /// Check whether an account name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(name)
    }

    /// Registered account names in lexicographic order
    pub fn account_names(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    fn dummy_verifier(&self) -> Option<&str> {
        self.dummy_verifier
            .get_or_init(|| hash_password(&self.hasher, "").ok())
            .as_deref()
    }

    /// Rewrites the whole credential record
    fn save(&self) -> Result<(), AuthError> {
        let mut contents = String::new();
        for (name, stored) in &self.accounts {
            contents.push_str(name);
            contents.push(RECORD_DELIMITER);
            contents.push_str(stored);
            contents.push('\n');
        }

        filesystem::write_atomically(&self.record_path, contents.as_bytes()).map_err(|e| {
            error!(
                "Failed to save credentials to {}: {}",
                self.record_path.display(),
                e
            );
            AuthError::Persistence(e)
        })
    }
}

/// Best-effort load of the credential record
fn load_records(path: &Path) -> BTreeMap<String, String> {
    match fs::read_to_string(path) {
        Ok(contents) => parse_records(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No credential record at {}", path.display());
            BTreeMap::new()
        }
        Err(e) => {
            warn!(
                "Could not read credential record {}: {}; starting empty",
                path.display(),
                e
            );
            BTreeMap::new()
        }
    }
}

/// Parses `name:verifier` lines, skipping lines without a delimiter.
fn parse_records(contents: &str) -> BTreeMap<String, String> {
    let mut accounts = BTreeMap::new();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        match line.split_once(RECORD_DELIMITER) {
            Some((name, stored)) => {
                // kept even when unusable, so the name stays taken
                if stored.is_empty() {
                    warn!(
                        "Credential line {} has an empty verifier for {}",
                        index + 1,
                        name
                    );
                } else if !verifier::is_well_formed(stored) {
                    warn!(
                        "Credential line {} has an unrecognised verifier for {}",
                        index + 1,
                        name
                    );
                }
                accounts.insert(name.to_string(), stored.to_string());
            }
            None => warn!("Skipping malformed credential line {}", index + 1),
        }
    }

    accounts
}
