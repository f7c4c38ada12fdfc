//! Key grammar
//!
//! Application IDs and setting keys share one grammar: one or more ASCII
//! letters, digits, hyphens or underscores, matched against the whole string.

use crate::KeyValidationError;

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Check a key without building an error
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(is_key_char)
}

/// Validate an application ID or a setting key
pub fn validate_key(key: &str) -> Result<(), KeyValidationError> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(KeyValidationError::new(key))
    }
}
