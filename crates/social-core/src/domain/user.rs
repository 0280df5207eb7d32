use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post_image::file_extension;
use super::slug::slugify;
use crate::error::DomainError;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]{1,150}$").expect("Invalid username regex"));

/// User entity - the author of posts, comments and likes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub image: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user after checking username and email shape.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        Self::validate_username(&username)?;
        Self::validate_email(&email)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            email,
            first_name: String::new(),
            last_name: String::new(),
            bio: String::new(),
            image: None,
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_names(mut self, first_name: String, last_name: String) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        if USERNAME_REGEX.is_match(username) {
            Ok(())
        } else {
            Err(DomainError::validation(
                "Enter a valid username. It may contain only letters, numbers, and @/./+/-/_ characters.",
            ))
        }
    }

    pub fn validate_email(email: &str) -> Result<(), DomainError> {
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(DomainError::validation("Invalid email address")),
        }
    }
}

/// Storage-relative path for a profile picture.
pub fn user_image_file_path(
    username: &str,
    suffix: Uuid,
    filename: &str,
) -> Result<String, DomainError> {
    let extension = file_extension(filename)?;
    Ok(format!(
        "uploads/users/{}-{}.{}",
        slugify(username),
        suffix,
        extension
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2024-01-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("alice".into(), "alice@example.com".into(), "hash".into(), now())
            .unwrap();

        assert_eq!(user.created_at, now());
        assert!(user.image.is_none());
        assert!(user.first_name.is_empty());
    }

    #[test]
    fn test_username_rejects_spaces() {
        let result = User::new("al ice".into(), "a@example.com".into(), "h".into(), now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_email_requires_domain() {
        let result = User::new("alice".into(), "alice@localhost".into(), "h".into(), now());
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_user_image_path() {
        let suffix = Uuid::nil();
        let path = user_image_file_path("Alice Smith", suffix, "me.png").unwrap();
        assert_eq!(path, format!("uploads/users/alice-smith-{}.png", suffix));
    }
}
