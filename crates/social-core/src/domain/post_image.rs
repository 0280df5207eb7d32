use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::slugify;
use crate::error::DomainError;

/// Storage namespace for post images.
const POST_UPLOAD_DIR: &str = "uploads/posts/";

/// An image attached to a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostImage {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Storage-relative path, see [`post_image_file_path`].
    pub image: String,
}

impl PostImage {
    pub fn new(post_id: Uuid, image: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            image,
        }
    }
}

/// Extension of an uploaded file name: the segment between the first `.` and
/// the next one. `archive.tar.gz` therefore yields `tar`. Only ASCII letters
/// and digits are accepted so the segment can never extend the storage path.
pub fn file_extension(filename: &str) -> Result<&str, DomainError> {
    let extension = filename
        .split_once('.')
        .map(|(_, rest)| rest.split('.').next().unwrap_or(rest))
        .unwrap_or_default();

    if extension.is_empty() {
        return Err(DomainError::validation(format!(
            "File name '{}' has no extension.",
            filename
        )));
    }
    if !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::validation(format!(
            "File name '{}' has an invalid extension.",
            filename
        )));
    }
    Ok(extension)
}

/// Derive where a post image is stored:
/// `uploads/posts/{author-slug}_{YYYY-MM-DD_HH-MM-SS}-{suffix}.{ext}`.
pub fn post_image_file_path(
    author_username: &str,
    published_at: DateTime<Utc>,
    suffix: Uuid,
    filename: &str,
) -> Result<String, DomainError> {
    let extension = file_extension(filename)?;

    Ok(format!(
        "{}{}_{}-{}.{}",
        POST_UPLOAD_DIR,
        slugify(author_username),
        published_at.format("%Y-%m-%d_%H-%M-%S"),
        suffix,
        extension
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn published_at() -> DateTime<Utc> {
        "2024-01-01T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_path_layout() {
        let suffix = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let path = post_image_file_path("alice", published_at(), suffix, "photo.JPG").unwrap();
        assert_eq!(
            path,
            "uploads/posts/alice_2024-01-01_10-00-00-67e55044-10b1-426f-9247-bb680e5fe0c8.JPG"
        );
    }

    #[test]
    fn test_username_is_slugified() {
        let path =
            post_image_file_path("Alice Smith", published_at(), Uuid::nil(), "a.png").unwrap();
        assert!(path.starts_with("uploads/posts/alice-smith_2024-01-01_10-00-00-"));
    }

    #[test]
    fn test_suffix_makes_paths_distinct() {
        let a = post_image_file_path("alice", published_at(), Uuid::new_v4(), "a.png").unwrap();
        let b = post_image_file_path("alice", published_at(), Uuid::new_v4(), "a.png").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_multi_dot_takes_first_segment() {
        assert_eq!(file_extension("archive.tar.gz").unwrap(), "tar");
    }

    #[test]
    fn test_missing_extension_rejected() {
        assert!(file_extension("README").is_err());
        assert!(file_extension("trailing.").is_err());
    }

    #[test]
    fn test_extension_with_path_characters_rejected() {
        assert!(post_image_file_path("alice", published_at(), Uuid::nil(), "photo.png/evil").is_err());
        assert!(file_extension("a.p\\ng").is_err());
        assert!(file_extension("a.p\ng").is_err());
        assert!(file_extension("a.png/").is_err());
    }
}
