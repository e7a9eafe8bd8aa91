//! Input checks performed before a note reaches the store.

use crate::domain::{AppError, Result};

/// Reject titles that are empty after trimming.
///
/// # Errors
/// Returns `Validation` with a user-facing message.
pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation {
            message: "Title cannot be empty".into(),
        });
    }
    Ok(())
}
