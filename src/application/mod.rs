//! Application layer - use cases and orchestration.
//!
//! This layer contains the note store, inline formatting and output
//! rendering.

pub mod formatter;
pub mod note_store;
pub mod text_formatter;
pub mod validation;

pub use formatter::{
    format_note_markdown, format_notes_json, format_notes_markdown, format_notes_table,
    OutputFormat,
};
pub use note_store::NoteStore;
pub use text_formatter::TextFormatter;
pub use validation::validate_title;
