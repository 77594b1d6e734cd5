//! Authentication system
//!
//! Handles account registration, credential persistence and password
//! verification.

pub mod credentials;
pub mod policy;
pub mod validator;
mod verifier;

pub use credentials::CredentialStore;
pub use policy::{PasswordReport, check_password, check_registration};
pub use validator::{validate_account_name, validate_password};
