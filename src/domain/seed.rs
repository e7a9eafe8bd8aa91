//! Built-in notes used until a persisted snapshot exists.

use super::models::Note;

/// Color given to notes created without one.
pub const DEFAULT_COLOR: &str = "#FFD59E";

/// Card colors used by the seed notes.
pub const PALETTE: &[&str] = &["#FFB6B3", "#FFD59E", "#E9F59A", "#B6F0F7", "#D1B3FF"];

const SEED: &[(&str, &str, &str, &str)] = &[
    (
        "1",
        "How to make your personal brand stand out online",
        "May 21, 2020",
        "#FFB6B3",
    ),
    (
        "2",
        "Beautiful weather app UI concepts we wish existed",
        "Mar 18, 2020",
        "#FFD59E",
    ),
    (
        "3",
        "10 excellent font pairing tools for designers",
        "Feb 01, 2020",
        "#E9F59A",
    ),
    (
        "4",
        "Spotify's Reema Bhagat on product design, music, and the key to a happy career",
        "Feb 01, 2020",
        "#B6F0F7",
    ),
    ("5", "12 eye-catching mobile wallpaper", "Feb 01, 2020", "#D1B3FF"),
    (
        "6",
        "Design For Good: Join The Face Mask Challenge",
        "Feb 01, 2020",
        "#FFB6B3",
    ),
];

/// The seed collection, in display order.
#[must_use]
pub fn seed_notes() -> Vec<Note> {
    SEED.iter()
        .map(|&(id, title, date, color)| Note {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            date: date.to_string(),
            color: color.to_string(),
        })
        .collect()
}
