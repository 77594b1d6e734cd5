//! Error types
//!
//! Defines domain-specific error types for each component of the cloud store.

use std::fmt;
use std::io;

use crate::auth::PasswordReport;

/// Credential store errors
#[derive(Debug)]
pub enum AuthError {
    AlreadyExists(String),
    InvalidAccountName(String),
    MalformedInput(String),
    Hashing(String),
    /// Writing the credential record failed; the registration was rolled back
    Persistence(io::Error),
    /// The account was registered but its storage directory could not be created
    Provisioning(io::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::AlreadyExists(u) => write!(f, "Account already exists: {}", u),
            AuthError::InvalidAccountName(s) => write!(f, "Invalid account name: {}", s),
            AuthError::MalformedInput(s) => write!(f, "Malformed input: {}", s),
            AuthError::Hashing(s) => write!(f, "Password hashing failed: {}", s),
            AuthError::Persistence(e) => write!(f, "Failed to save credentials: {}", e),
            AuthError::Provisioning(e) => {
                write!(f, "Failed to create account storage: {}", e)
            }
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Persistence(e) | AuthError::Provisioning(e) => Some(e),
            _ => None,
        }
    }
}

/// Advisory registration policy violations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    AccountNameTooShort(usize),
    WeakPassword(PasswordReport),
    PasswordMismatch,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyViolation::AccountNameTooShort(min) => {
                write!(f, "Account name must be at least {} characters long", min)
            }
            PolicyViolation::WeakPassword(_) => {
                write!(f, "Password does not meet all requirements")
            }
            PolicyViolation::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

impl std::error::Error for PolicyViolation {}

/// Account file store errors
#[derive(Debug)]
pub enum StorageError {
    NotFound(String),
    InvalidName(String),
    PathTraversal(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(p) => write!(f, "File not found: {}", p),
            StorageError::InvalidName(p) => write!(f, "Invalid name: {}", p),
            StorageError::PathTraversal(p) => write!(f, "Path traversal attempt: {}", p),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General error that encompasses all error types
#[derive(Debug)]
pub enum CloudStoreError {
    Auth(AuthError),
    Storage(StorageError),
    Config(config::ConfigError),
}

impl fmt::Display for CloudStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudStoreError::Auth(e) => write!(f, "Authentication error: {}", e),
            CloudStoreError::Storage(e) => write!(f, "Storage error: {}", e),
            CloudStoreError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for CloudStoreError {}

impl From<AuthError> for CloudStoreError {
    fn from(error: AuthError) -> Self {
        CloudStoreError::Auth(error)
    }
}

impl From<StorageError> for CloudStoreError {
    fn from(error: StorageError) -> Self {
        CloudStoreError::Storage(error)
    }
}

impl From<config::ConfigError> for CloudStoreError {
    fn from(error: config::ConfigError) -> Self {
        CloudStoreError::Config(error)
    }
}
