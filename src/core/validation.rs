//! Input validation for ghcrew.
//!
//! Validates secret names and repository identifiers before any network call.

use crate::error::{Result, ValidationError};

/// Validate a repository secret name.
///
/// Secret names follow GitHub's rules:
/// - Only A-Z, a-z, 0-9, and underscore
/// - Cannot start with a digit
/// - Cannot start with the reserved `GITHUB_` prefix
/// - Cannot be empty
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    if let Some(first_char) = key.chars().next() {
        if first_char.is_ascii_digit() {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: "cannot start with a digit".to_string(),
            }
            .into());
        }
    }

    if key.to_ascii_uppercase().starts_with("GITHUB_") {
        return Err(ValidationError::InvalidKey {
            key: key.to_string(),
            reason: "the GITHUB_ prefix is reserved".to_string(),
        }
        .into());
    }

    for (i, ch) in key.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(ValidationError::InvalidKey {
                key: key.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only A-Z, 0-9, and underscore are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}

/// Validate an `owner/repo` identifier.
///
/// # Errors
///
/// Returns `ValidationError::InvalidRepository` unless the value is exactly two
/// non-empty segments separated by one slash, without whitespace.
pub fn validate_repository(repo: &str) -> Result<()> {
    let invalid = || ValidationError::InvalidRepository {
        repo: repo.to_string(),
    };

    if repo.chars().any(char::is_whitespace) {
        return Err(invalid().into());
    }

    let mut parts = repo.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(()),
        _ => Err(invalid().into()),
    }
}
