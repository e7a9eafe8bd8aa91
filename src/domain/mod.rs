//! Domain layer - core types, errors and configuration.
//!
//! This layer holds pure data and policy without any I/O.

pub mod config;
pub mod error;
pub mod models;
pub mod seed;

pub use config::{AppConfig, NotesConfig};
pub use error::{AppError, Result};
pub use models::{FormatKind, Note, NoteInput, NoteUpdate, PREVIEW_CHARS};
pub use seed::{seed_notes, PALETTE};
