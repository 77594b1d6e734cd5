//! Cloudstore - per-account file storage
//!
//! A credential store decides who an account is; an account file store
//! then manages that account's flat namespace of text files inside its own
//! directory. The account name is the only value the two share.

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod utils;

pub use auth::CredentialStore;
pub use config::StorageConfig;
pub use error::{AuthError, CloudStoreError, ErrorKind, StorageError};
pub use storage::{AccountFileStore, DeleteAllReport};
