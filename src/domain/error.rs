//! Domain-level error types for mynote.
//!
//! All errors are typed with `thiserror` and carry enough context to be
//! printed directly to the user.

use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to open or query the blob database.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid or corrupted data.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// JSON parsing or serialization failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// User input rejected before reaching the store.
    #[error("{message}")]
    Validation { message: String },

    /// Selection range outside the text buffer.
    #[error("Invalid selection {start}..{end} for text of length {len}")]
    InvalidSelection { start: usize, end: usize, len: usize },

    /// No note with the given id.
    #[error("Note not found: {id}")]
    NoteNotFound { id: String },
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = AppError::Validation {
            message: "Title cannot be empty".into(),
        };
        assert_eq!(err.to_string(), "Title cannot be empty");
    }

    #[test]
    fn test_json_parse_keeps_source() {
        let source = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = AppError::json_parse(source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
