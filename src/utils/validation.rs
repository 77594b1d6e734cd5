//! Input validation utilities
//!
//! Name and input checks shared by the credential store and the account
//! file store. Both components key on the account name, and it is used
//! as a path segment under the storage root.

/// Separator between account name and verifier in the credential record
pub const RECORD_DELIMITER: char = ':';

/// Validate that input is not empty and doesn't contain line-breaking characters
pub fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty()
        && input.chars().count() <= max_length
        && !input.contains(['\r', '\n', '\0'])
}

/// Checks an account name, returning the reason it is rejected.
pub fn check_account_name(name: &str, max_length: usize) -> Result<(), String> {
    if !is_valid_input(name, max_length) {
        return Err(format!(
            "must be 1-{max_length} characters without line breaks"
        ));
    }
    if name.trim() != name {
        return Err("must not start or end with whitespace".into());
    }
    if name.contains(RECORD_DELIMITER) {
        return Err(format!("must not contain '{RECORD_DELIMITER}'"));
    }
    check_path_segment(name)
}

/// Checks that `segment` can only ever name a direct child of a directory.
pub fn check_path_segment(segment: &str) -> Result<(), String> {
    if segment.contains(['/', '\\']) {
        return Err("must not contain path separators".into());
    }
    if segment == "." || segment.contains("..") {
        return Err("must not contain traversal sequences".into());
    }
    Ok(())
}
