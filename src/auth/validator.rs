//! Credential input validator
//!
//! Rejects account names and passwords that cannot be stored safely in the
//! line-oriented credential record or used as a storage directory name.

use crate::config::StorageConfig;
use crate::error::AuthError;
use crate::utils::validation::check_account_name;

/// Validates an account name before it is registered.
pub fn validate_account_name(name: &str, config: &StorageConfig) -> Result<(), AuthError> {
    check_account_name(name, config.max_account_name_length)
        .map_err(|reason| AuthError::InvalidAccountName(format!("{name:?} {reason}")))
}

/// Validates that a password can be hashed and recorded.
///
/// Whitespace is significant in passwords and is not trimmed.
pub fn validate_password(password: &str, config: &StorageConfig) -> Result<(), AuthError> {
    if password.is_empty()
        || password.chars().count() > config.max_password_length
        || password.contains(['\r', '\n', '\0'])
    {
        return Err(AuthError::MalformedInput("Invalid password format".into()));
    }
    Ok(())
}
