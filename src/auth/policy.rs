//! Registration policy
//!
//! Advisory strength rules a front end applies before calling
//! `CredentialStore::register`. The credential store itself does not
//! enforce them.

use crate::config::StorageConfig;
use crate::error::PolicyViolation;

/// Characters that satisfy the special-character rule
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&()_+-=[]{};':\"\\|,.<>/?";

/// Outcome of each password rule, for live feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordReport {
    pub starts_uppercase: bool,
    pub has_special: bool,
    pub long_enough: bool,
}

impl PasswordReport {
    pub fn is_satisfied(&self) -> bool {
        self.starts_uppercase && self.has_special && self.long_enough
    }
}

/// Evaluates every password rule independently.
pub fn check_password(password: &str, config: &StorageConfig) -> PasswordReport {
    PasswordReport {
        starts_uppercase: password.chars().next().is_some_and(char::is_uppercase),
        has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        long_enough: password.chars().count() >= config.min_password_length,
    }
}

/// Full pre-registration check: name length, password rules, confirmation.
pub fn check_registration(
    name: &str,
    password: &str,
    confirmation: &str,
    config: &StorageConfig,
) -> Result<(), PolicyViolation> {
    if name.trim().chars().count() < config.min_account_name_length {
        return Err(PolicyViolation::AccountNameTooShort(
            config.min_account_name_length,
        ));
    }

    let report = check_password(password, config);
    if !report.is_satisfied() {
        return Err(PolicyViolation::WeakPassword(report));
    }

    if password != confirmation {
        return Err(PolicyViolation::PasswordMismatch);
    }

    Ok(())
}
