//! Output formatting for notes.
//!
//! Supports multiple output formats: Markdown, JSON, and table view.

use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{Note, PREVIEW_CHARS};

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable Markdown format.
    #[default]
    Markdown,
    /// JSON format for programmatic use.
    Json,
    /// Compact table listing.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!("Unknown format: {s}. Use: markdown, json, table")),
        }
    }
}

/// Formats a single note as Markdown.
pub fn format_note_markdown(note: &Note) -> String {
    let mut out = format!("# {}\n\n", note.title);

    out.push_str(&format!("**Date:** {}\n", note.date));
    out.push_str(&format!("**Color:** {}\n", note.color));
    out.push_str(&format!("**Id:** {}\n\n", note.id));
    out.push_str("---\n\n");

    if !note.content.is_empty() {
        out.push_str(&note.content);
        out.push('\n');
    }

    out
}

/// Formats a list of notes as Markdown, one section per note.
pub fn format_notes_markdown<'a>(notes: impl IntoIterator<Item = &'a Note>) -> String {
    notes
        .into_iter()
        .map(format_note_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats notes as a JSON array.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_notes_json<'a>(
    notes: impl IntoIterator<Item = &'a Note>,
) -> Result<String, serde_json::Error> {
    let notes: Vec<&Note> = notes.into_iter().collect();
    serde_json::to_string_pretty(&notes)
}

/// Formats a table listing of notes.
pub fn format_notes_table<'a>(notes: impl IntoIterator<Item = &'a Note>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Date", "Color", "Title", "Preview"]);

    for note in notes {
        table.add_row(vec![
            note.id.clone(),
            note.date.clone(),
            note.color.clone(),
            truncate(&note.title, 40),
            truncate(&note.preview(PREVIEW_CHARS), 40),
        ]);
    }

    table.to_string()
}

/// Truncates the first line of a string to `max_len` characters with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_notes;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
        assert_eq!(truncate("first\nsecond", 10), "first");
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!(
            "markdown".parse::<OutputFormat>(),
            Ok(OutputFormat::Markdown)
        ));
        assert!(matches!(
            "json".parse::<OutputFormat>(),
            Ok(OutputFormat::Json)
        ));
        assert!(matches!(
            "table".parse::<OutputFormat>(),
            Ok(OutputFormat::Table)
        ));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_markdown_contains_fields() {
        let mut note = seed_notes().remove(0);
        note.content = "**hi**".into();
        let md = format_note_markdown(&note);

        assert!(md.starts_with("# How to make your personal brand stand out online"));
        assert!(md.contains("**Date:** May 21, 2020"));
        assert!(md.ends_with("**hi**\n"));
    }

    #[test]
    fn test_json_is_array_of_notes() {
        let notes = seed_notes();
        let json = format_notes_json(&notes).unwrap();
        let parsed: Vec<Note> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, notes);
    }

    #[test]
    fn test_table_lists_every_note() {
        let table = format_notes_table(&seed_notes());
        for id in ["1", "2", "3", "4", "5", "6"] {
            assert!(table.contains(&format!(" {id} ")));
        }
    }
}
