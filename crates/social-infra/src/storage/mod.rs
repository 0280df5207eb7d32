//! Media storage adapters.

mod local;
mod memory;

pub use local::LocalMediaStorage;
pub use memory::InMemoryMediaStorage;

use std::path::{Component, Path};

use social_core::ports::StorageError;

/// Accept only relative paths that stay below the storage root.
fn validate_path(path: &str) -> Result<&Path, StorageError> {
    let candidate = Path::new(path);
    if path.is_empty() {
        return Err(StorageError::InvalidPath(path.to_string()));
    }

    let escapes = candidate
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(StorageError::InvalidPath(path.to_string()));
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::validate_path;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("uploads/posts/a.jpg").is_ok());
        assert!(validate_path("").is_err());
        assert!(validate_path("/etc/passwd").is_err());
        assert!(validate_path("uploads/../../secret").is_err());
    }
}
