//! Inline text formatting by marker insertion.
//!
//! Markers are spliced into plain text around a half-open `[start, end)`
//! selection measured in characters. Existing markers are not inspected,
//! so formatting the same range twice doubles the markers.

use crate::domain::{config::DEFAULT_BULLET, AppError, FormatKind, Result};

/// Applies bold, italic and list markers to a selection.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    bullet: String,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_BULLET)
    }
}

impl TextFormatter {
    /// Create a formatter using `bullet` as the list prefix glyph.
    pub fn new(bullet: impl Into<String>) -> Self {
        Self {
            bullet: bullet.into(),
        }
    }

    /// Return `text` with `kind` applied to the characters in `[start, end)`.
    ///
    /// An empty selection returns `text` unchanged.
    ///
    /// # Errors
    /// Returns `InvalidSelection` if `start > end` or `end` is past the end
    /// of `text`.
    pub fn apply(&self, text: &str, start: usize, end: usize, kind: FormatKind) -> Result<String> {
        let len = text.chars().count();
        if start > end || end > len {
            return Err(AppError::InvalidSelection { start, end, len });
        }

        if start == end {
            return Ok(text.to_string());
        }

        let from = byte_offset(text, start);
        let to = byte_offset(text, end);
        let selected = &text[from..to];

        let replacement = match kind {
            FormatKind::Bold => format!("**{selected}**"),
            FormatKind::Italic => format!("*{selected}*"),
            FormatKind::List => selected
                .split('\n')
                .map(|line| format!("{} {line}", self.bullet))
                .collect::<Vec<_>>()
                .join("\n"),
        };

        tracing::trace!(%kind, start, end, "Applied inline format");

        let mut out = String::with_capacity(text.len() + replacement.len() - selected.len());
        out.push_str(&text[..from]);
        out.push_str(&replacement);
        out.push_str(&text[to..]);
        Ok(out)
    }
}

/// Byte index of the `chars`-th character, or `text.len()` at the end.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx)
}
