//! Error handlers
//!
//! Logs errors and maps them onto the caller-facing failure categories.

use crate::error::types::{AuthError, CloudStoreError, StorageError};
use log::error;

/// Caller-facing failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    Validation,
    Io,
    Config,
}

/// Handle a cloud store error
pub fn handle_error(err: &CloudStoreError) {
    error!("Cloud store error: {}", err);
}

/// Convert error to its failure category
pub fn classify(err: &CloudStoreError) -> ErrorKind {
    match err {
        CloudStoreError::Auth(e) => match e {
            AuthError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            AuthError::InvalidAccountName(_) | AuthError::MalformedInput(_) => {
                ErrorKind::Validation
            }
            AuthError::Hashing(_) | AuthError::Persistence(_) | AuthError::Provisioning(_) => {
                ErrorKind::Io
            }
        },
        CloudStoreError::Storage(e) => match e {
            StorageError::NotFound(_) => ErrorKind::NotFound,
            StorageError::InvalidName(_) | StorageError::PathTraversal(_) => ErrorKind::Validation,
            StorageError::IoError(_) => ErrorKind::Io,
        },
        CloudStoreError::Config(_) => ErrorKind::Config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn classifies_taxonomy() {
        let cases: [(CloudStoreError, ErrorKind); 6] = [
            (AuthError::AlreadyExists("alice".into()).into(), ErrorKind::AlreadyExists),
            (StorageError::NotFound("x".into()).into(), ErrorKind::NotFound),
            (StorageError::PathTraversal("../x".into()).into(), ErrorKind::Validation),
            (AuthError::InvalidAccountName("a/b".into()).into(), ErrorKind::Validation),
            (
                StorageError::IoError(io::Error::other("disk full")).into(),
                ErrorKind::Io,
            ),
            (
                AuthError::Persistence(io::Error::other("read-only")).into(),
                ErrorKind::Io,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(classify(&err), expected, "{}", err);
        }
    }

    #[test]
    fn config_errors_are_classified() {
        let err = CloudStoreError::from(config::ConfigError::Message("bad".into()));
        assert_eq!(classify(&err), ErrorKind::Config);
    }
}
