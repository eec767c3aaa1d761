//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::dao::models::{MAX_MEDIA_SIZE_BYTES, MAX_PLAYERS};

/// Validates that a match id or media file name can be used as a single path component.
///
/// # Examples
///
/// ```ignore
/// validate_storage_name("20251008_2L717P_test3") // Ok
/// validate_storage_name("../etc")                // Err - traversal
/// validate_storage_name("")                      // Err - empty
/// ```
pub fn validate_storage_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("storage_name_empty");
        err.message = Some("Name must not be empty".into());
        return Err(err);
    }

    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        let mut err = ValidationError::new("storage_name_format");
        err.message = Some(format!("`{name}` must be a plain name without path separators").into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a player index designates one of the four contestants.
pub fn validate_player_index(index: u8) -> Result<(), ValidationError> {
    if index >= MAX_PLAYERS {
        let mut err = ValidationError::new("player_index_range");
        err.message = Some(
            format!(
                "Player index must be between 0 and {} (got {index})",
                MAX_PLAYERS - 1
            )
            .into(),
        );
        return Err(err);
    }

    Ok(())
}

/// Validates that a declared media size stays within [`MAX_MEDIA_SIZE_BYTES`].
pub fn validate_media_size(size: u64) -> Result<(), ValidationError> {
    if size > MAX_MEDIA_SIZE_BYTES {
        let mut err = ValidationError::new("media_size_range");
        err.message = Some(
            format!("Media size must not exceed {MAX_MEDIA_SIZE_BYTES} bytes (got {size})").into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_storage_name_valid() {
        assert!(validate_storage_name("20251008_2L717P_test3").is_ok());
        assert!(validate_storage_name("vcnv_2_1728380000.png").is_ok());
    }

    #[test]
    fn test_validate_storage_name_invalid() {
        assert!(validate_storage_name("").is_err()); // empty
        assert!(validate_storage_name("   ").is_err()); // blank
        assert!(validate_storage_name("..").is_err()); // parent
        assert!(validate_storage_name("a/b").is_err()); // separator
        assert!(validate_storage_name("a\\b").is_err()); // windows separator
    }

    #[test]
    fn test_validate_player_index() {
        assert!(validate_player_index(0).is_ok());
        assert!(validate_player_index(3).is_ok());
        assert!(validate_player_index(4).is_err());
    }

    #[test]
    fn test_validate_media_size() {
        assert!(validate_media_size(0).is_ok());
        assert!(validate_media_size(MAX_MEDIA_SIZE_BYTES).is_ok());
        assert!(validate_media_size(MAX_MEDIA_SIZE_BYTES + 1).is_err());
        assert!(validate_media_size(u64::MAX).is_err());
    }
}
