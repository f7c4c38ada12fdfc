use thiserror::Error;

/// A string failed the `[A-Za-z0-9_-]+` key grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid key {key:?}: a key must contain at least 1 character and only letters, numbers, hyphens or underscores"
)]
pub struct KeyValidationError {
    key: String,
}

impl KeyValidationError {
    pub(crate) fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// The rejected input
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KeyValidationError::new("bad key");
        assert_eq!(
            err.to_string(),
            "Invalid key \"bad key\": a key must contain at least 1 character and only letters, numbers, hyphens or underscores"
        );
    }

    #[test]
    fn test_error_keeps_key() {
        let err = KeyValidationError::new("a#b");
        assert_eq!(err.key(), "a#b");
    }

    #[test]
    fn test_error_display_empty_key() {
        let err = KeyValidationError::new("");
        assert!(err.to_string().starts_with("Invalid key \"\""));
    }
}
