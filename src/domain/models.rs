//! Domain models for notes.
//!
//! A note is plain text; formatting lives in the content as literal
//! marker characters, never as a structured document.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::seed::DEFAULT_COLOR;

/// Maximum number of characters shown in a content preview.
pub const PREVIEW_CHARS: usize = 80;

#[allow(clippy::unwrap_used)]
static BOLD_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

#[allow(clippy::unwrap_used)]
static ITALIC_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// A single user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier, fixed at creation.
    pub id: String,
    /// Note title.
    pub title: String,
    /// Body text with inline markers.
    #[serde(default)]
    pub content: String,
    /// Human-readable date of creation or last update.
    #[serde(alias = "updatedAt")]
    pub date: String,
    /// Hex color tag, fixed at creation.
    #[serde(default = "default_color")]
    pub color: String,
}

impl Note {
    /// Content with bold and italic markers removed, cut to `max_chars`.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.is_empty() {
            return String::new();
        }

        let stripped = BOLD_MARKERS.replace_all(&self.content, "$1");
        let stripped = ITALIC_MARKERS.replace_all(&stripped, "$1");

        if stripped.chars().count() > max_chars {
            let cut: String = stripped.chars().take(max_chars).collect();
            format!("{cut}...")
        } else {
            stripped.into_owned()
        }
    }

    /// Case-insensitive substring match on title or content.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
    }
}

/// Fields supplied when creating a note.
#[derive(Debug, Clone, Default)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    /// Falls back to the default color when absent.
    pub color: Option<String>,
}

/// Fields replaced when updating a note.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: String,
    pub content: String,
}

/// Inline formatting applied to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// `**selected**`
    Bold,
    /// `*selected*`
    Italic,
    /// Bullet prefix on every selected line.
    List,
}

impl std::str::FromStr for FormatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "list" => Ok(Self::List),
            _ => Err(format!("Unknown format: {s}. Use: bold, italic, list")),
        }
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bold => write!(f, "bold"),
            Self::Italic => write!(f, "italic"),
            Self::List => write!(f, "list"),
        }
    }
}
