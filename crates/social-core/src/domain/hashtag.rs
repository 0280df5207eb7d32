use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

pub const HASHTAG_MAX_LENGTH: usize = 50;

static HASHTAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w*$").expect("Invalid hashtag regex"));

/// A label attachable to posts, unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashTag {
    pub id: Uuid,
    pub name: String,
}

impl HashTag {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
        })
    }

    /// Names are non-empty, at most 50 characters, word characters only.
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::validation("Hashtag name may not be blank."));
        }
        if name.chars().count() > HASHTAG_MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "Hashtag name may not exceed {} characters.",
                HASHTAG_MAX_LENGTH
            )));
        }
        if !HASHTAG_REGEX.is_match(name) {
            return Err(DomainError::validation("Hashtag doesnt comply"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_characters_accepted() {
        assert!(HashTag::new("technews").is_ok());
        assert!(HashTag::new("rust_2024").is_ok());
        assert!(HashTag::new("café").is_ok());
    }

    #[test]
    fn test_dash_rejected_with_fixed_message() {
        let err = HashTag::new("tech-news").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg == "Hashtag doesnt comply"));
    }

    #[test]
    fn test_whitespace_and_hash_rejected() {
        assert!(HashTag::new("tech news").is_err());
        assert!(HashTag::new("#tech").is_err());
    }

    #[test]
    fn test_blank_and_overlong_rejected() {
        assert!(HashTag::new("").is_err());
        assert!(HashTag::new("a".repeat(HASHTAG_MAX_LENGTH)).is_ok());
        assert!(HashTag::new("a".repeat(HASHTAG_MAX_LENGTH + 1)).is_err());
    }
}
