//! Input validation for comment operations

use crate::error::{QaError, Result};

/// Maximum comment length (default)
pub const MAX_COMMENT_LENGTH: usize = 10000;

/// Minimum comment length
pub const MIN_COMMENT_LENGTH: usize = 1;

/// Validator for comment payload fields
pub struct CommentValidator {
    max_length: usize,
    min_length: usize,
}

impl CommentValidator {
    /// Create a new validator with default settings
    pub fn new() -> Self {
        Self {
            max_length: MAX_COMMENT_LENGTH,
            min_length: MIN_COMMENT_LENGTH,
        }
    }

    /// Create a new validator with custom max length
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            min_length: MIN_COMMENT_LENGTH,
        }
    }

    /// Require a field to be present and non-blank, returning it trimmed
    pub fn require<'a>(&self, field: &str, value: Option<&'a str>) -> Result<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(QaError::Validation(format!("You must provide {}", field))),
        }
    }

    /// Validate comment text
    pub fn validate_text(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();

        if trimmed.chars().count() < self.min_length {
            return Err(QaError::Validation(
                "Comment text cannot be empty".to_string(),
            ));
        }

        if trimmed.chars().count() > self.max_length {
            return Err(QaError::Validation(format!(
                "Comment text exceeds maximum length of {} characters",
                self.max_length
            )));
        }

        Ok(())
    }
}

impl Default for CommentValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_valid() {
        let validator = CommentValidator::new();
        assert!(validator.validate_text("Valid comment").is_ok());
    }

    #[test]
    fn test_validate_text_empty() {
        let validator = CommentValidator::new();
        assert!(validator.validate_text("").is_err());
        assert!(validator.validate_text("   ").is_err());
    }

    #[test]
    fn test_validate_text_too_long() {
        let validator = CommentValidator::with_max_length(10);
        assert!(validator.validate_text("Short").is_ok());
        assert!(validator.validate_text("This is too long").is_err());
    }

    #[test]
    fn test_require() {
        let validator = CommentValidator::new();
        assert_eq!(validator.require("an author", Some(" u1 ")).unwrap(), "u1");
        assert!(validator.require("an author", Some("")).is_err());
        assert!(validator.require("an author", None).is_err());

        let err = validator.require("a comment id", None).unwrap_err();
        assert!(err.to_string().contains("a comment id"));
    }
}
