//! Password verifiers
//!
//! New verifiers are Argon2id PHC strings with a per-account salt. Records
//! written by older installations hold an unsalted SHA-256 hex digest;
//! those still verify but are never produced.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::config::StorageConfig;
use crate::error::AuthError;

const LEGACY_DIGEST_LEN: usize = 64;

/// Builds the hasher used for new registrations.
pub(crate) fn hasher(config: &StorageConfig) -> Result<Argon2<'static>, AuthError> {
    let params = Params::new(config.hash_memory_kib, config.hash_iterations, 1, None)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password into a fresh salted verifier
pub(crate) fn hash_password(hasher: &Argon2<'_>, password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Unsalted SHA-256 hex digest used by legacy records
pub(crate) fn legacy_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn is_legacy(verifier: &str) -> bool {
    verifier.len() == LEGACY_DIGEST_LEN && verifier.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Whether a stored verifier is in a format this store can check
pub(crate) fn is_well_formed(verifier: &str) -> bool {
    is_legacy(verifier) || PasswordHash::new(verifier).is_ok()
}

/// Verify a password against a stored verifier of either format
pub(crate) fn verify_password(password: &str, verifier: &str) -> bool {
    if is_legacy(verifier) {
        return legacy_digest(password).eq_ignore_ascii_case(verifier);
    }

    match PasswordHash::new(verifier) {
        // cost parameters come from the stored hash, not the hasher
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
