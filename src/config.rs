//! Configuration management for the cloud store
//!
//! Settings come from an optional `config.toml` with `CLOUDSTORE_*`
//! environment overrides. Every field has a default, so an empty source
//! yields a working configuration.

use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `CLOUDSTORE_STORAGE_ROOT`
const ENV_PREFIX: &str = "CLOUDSTORE";

/// Complete storage configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    // ═══ LOCATIONS ═══
    /// Directory holding one sub-directory per account
    pub storage_root: String,

    /// Durable credential record, one `name:verifier` line per account
    pub credentials_file: String,

    // ═══ INPUT LIMITS ═══
    pub max_account_name_length: usize,
    pub max_file_name_length: usize,
    pub max_password_length: usize,

    /// Advisory registration policy minimums (see `auth::policy`)
    pub min_account_name_length: usize,
    pub min_password_length: usize,

    // ═══ PASSWORD HASHING ═══
    /// Argon2id memory cost in KiB for newly registered verifiers
    pub hash_memory_kib: u32,

    /// Argon2id iteration count for newly registered verifiers
    pub hash_iterations: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_root: "user_files".to_string(),
            credentials_file: "users_data.txt".to_string(),
            max_account_name_length: 64,
            max_file_name_length: 255,
            max_password_length: 128,
            min_account_name_length: 6,
            min_password_length: 4,
            hash_memory_kib: argon2::Params::DEFAULT_M_COST,
            hash_iterations: argon2::Params::DEFAULT_T_COST,
        }
    }
}

impl StorageConfig {
    /// Load configuration from ./config.toml (if present) with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file with environment overrides
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path))
    }

    fn build<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: StorageConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_root.trim().is_empty() {
            return Err(ConfigError::Message("storage_root cannot be empty".into()));
        }

        if self.credentials_file.trim().is_empty() {
            return Err(ConfigError::Message(
                "credentials_file cannot be empty".into(),
            ));
        }

        if self.max_account_name_length == 0
            || self.max_file_name_length == 0
            || self.max_password_length == 0
        {
            return Err(ConfigError::Message(
                "length limits must be greater than 0".into(),
            ));
        }

        if self.min_account_name_length > self.max_account_name_length {
            return Err(ConfigError::Message(
                "min_account_name_length must not exceed max_account_name_length".into(),
            ));
        }

        if self.min_password_length > self.max_password_length {
            return Err(ConfigError::Message(
                "min_password_length must not exceed max_password_length".into(),
            ));
        }

        if self.hash_memory_kib < argon2::Params::MIN_M_COST || self.hash_iterations == 0 {
            return Err(ConfigError::Message(format!(
                "hash_memory_kib must be at least {} and hash_iterations at least 1",
                argon2::Params::MIN_M_COST
            )));
        }

        Ok(())
    }

    /// Get storage root as PathBuf
    pub fn storage_root_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_root)
    }

    /// Get the credential record location as PathBuf
    pub fn credentials_path(&self) -> PathBuf {
        PathBuf::from(&self.credentials_file)
    }

    /// Directory backing a single account. The name must already be validated.
    pub fn account_dir(&self, account: &str) -> PathBuf {
        self.storage_root_path().join(account)
    }
}
