//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::OutputFormat;

/// mynote - Keep short notes with inline bold, italic and list markers.
#[derive(Parser, Debug)]
#[command(name = "mynote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format: markdown, json, or table.
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Data directory (overrides config).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep notes in memory only; nothing is read from or written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, most recent first.
    List {
        /// Maximum number of notes to show (0 = all).
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },

    /// Show a single note.
    Show {
        /// Note ID.
        id: String,
    },

    /// Create a note.
    New {
        /// Note title (must not be blank).
        #[arg(short, long)]
        title: String,

        /// Note body.
        #[arg(short, long, default_value = "")]
        content: String,

        /// Hex color tag (defaults to config value).
        #[arg(long)]
        color: Option<String>,
    },

    /// Edit the title and/or content of a note.
    Edit {
        /// Note ID.
        id: String,

        /// New title (keeps current if omitted).
        #[arg(short, long)]
        title: Option<String>,

        /// New content (keeps current if omitted).
        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note after confirmation.
    Delete {
        /// Note ID.
        id: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Find notes whose title or content contains the query.
    Search {
        /// Text to look for (case-insensitive).
        query: String,
    },

    /// Apply bold, italic or list markers to part of a note's content.
    #[command(name = "fmt")]
    Fmt {
        /// Note ID.
        id: String,

        /// Selection start (character offset, inclusive).
        #[arg(long)]
        start: usize,

        /// Selection end (character offset, exclusive).
        #[arg(long)]
        end: usize,

        /// Marker kind: bold, italic, or list.
        #[arg(short, long)]
        kind: String,
    },

    /// Show data and config paths being used.
    Paths,

    /// Write a commented default config file if none exists.
    InitConfig {
        /// Overwrite with the effective configuration.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Parse the output format argument.
    pub fn output_format(&self) -> Result<OutputFormat, String> {
        self.format.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new() {
        let cli = Cli::parse_from(["mynote", "new", "-t", "Groceries", "-c", "milk"]);
        match cli.command {
            Commands::New { title, content, color } => {
                assert_eq!(title, "Groceries");
                assert_eq!(content, "milk");
                assert!(color.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_fmt_with_global_flags() {
        let cli = Cli::parse_from([
            "mynote", "fmt", "42", "--start", "0", "--end", "5", "-k", "bold", "--ephemeral", "-vv",
        ]);
        assert!(cli.ephemeral);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Fmt { start: 0, end: 5, .. }
        ));
    }

    #[test]
    fn test_parse_delete_confirmation_flag() {
        let cli = Cli::parse_from(["mynote", "delete", "7"]);
        assert!(matches!(cli.command, Commands::Delete { yes: false, .. }));

        let cli = Cli::parse_from(["mynote", "delete", "7", "-y"]);
        assert!(matches!(cli.command, Commands::Delete { yes: true, .. }));

        let cli = Cli::parse_from(["mynote", "init-config", "--force"]);
        assert!(matches!(cli.command, Commands::InitConfig { force: true }));
    }
}
