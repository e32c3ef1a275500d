//! Validation functions for document paths.

use thiserror::Error;

use crate::Path;

/// Maximum allowed pointer string length.
const MAX_POINTER_LENGTH: usize = 1024;

/// Default maximum path depth.
pub const MAX_PATH_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("Path too long")]
    PathTooLong,
}

/// Validate a pointer string.
///
/// # Errors
///
/// Returns an error if:
/// - The pointer is non-empty but doesn't start with `/`
/// - The pointer exceeds the maximum length (1024 characters)
///
/// # Example
///
/// ```
/// use dpe_dom_path::validate_pointer;
///
/// validate_pointer("").unwrap();
/// validate_pointer("/0/-").unwrap();
/// validate_pointer("0").unwrap_err();
/// ```
pub fn validate_pointer(pointer: &str) -> Result<(), ValidationError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(ValidationError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(ValidationError::PointerTooLong);
    }
    Ok(())
}

/// Validate a path against a maximum depth.
pub fn validate_path(path: &Path, max_depth: usize) -> Result<(), ValidationError> {
    if path.len() > max_depth {
        return Err(ValidationError::PathTooLong);
    }
    Ok(())
}
