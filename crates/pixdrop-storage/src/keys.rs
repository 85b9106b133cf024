//! Shared key validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that could escape the bucket root or directory.
///
/// Upload keys are already sanitized filenames; this is the last check before
/// anything touches the backend.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.starts_with('/') || storage_key.starts_with('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key must be relative".to_string(),
        ));
    }
    if storage_key
        .split(['/', '\\'])
        .any(|segment| segment == ".." || segment == "." || segment.is_empty())
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid path segments".to_string(),
        ));
    }
    if storage_key.chars().any(char::is_control) {
        return Err(StorageError::InvalidKey(
            "Storage key contains control characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_filenames() {
        assert!(validate_key("photo.JPG").is_ok());
        assert!(validate_key("my-file_1.jpeg").is_ok());
        assert!(validate_key("..hidden.png").is_ok());
    }

    #[test]
    fn rejects_traversal_and_absolute_keys() {
        for key in ["", "/etc/passwd", "../secret.png", "a/../b.png", "a//b.png", "\\x.png", "a\u{0}.png"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }
}
