//! mynote - Keep notes locally with inline formatting markers.
//!
//! Notes live in a single JSON snapshot inside a `SQLite` key/value file and
//! are saved in full after every change. Formatting is plain text: bold,
//! italic and list markers are inserted around a character selection.
//!
//!   mynote list                                   # All notes, newest first
//!   mynote new -t "Groceries" -c "milk"           # Create a note
//!   mynote fmt <id> --start 0 --end 4 -k bold     # Bold the first 4 chars
//!   mynote search weather                         # Filter by title/content

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    format_note_markdown, format_notes_json, format_notes_markdown, format_notes_table,
    validate_title, NoteStore, OutputFormat, TextFormatter,
};
use cli::{Cli, Commands};
use domain::{
    config::DEFAULT_STORAGE_KEY, AppConfig, AppError, FormatKind, Note, NoteInput, NoteUpdate,
    Result, PALETTE,
};
use infrastructure::config::{load_config_from_file, save_config};
use infrastructure::{
    config_file_path, ensure_config_exists, load_config, BlobPersistence, BlobStore,
    MemoryBlobStore, SqliteBlobStore,
};

type Store = NoteStore<BlobPersistence<Box<dyn BlobStore>>>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    let format = cli
        .output_format()
        .map_err(|e| AppError::Config { message: e })?;

    let config = resolve_config(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Paths => return cmd_paths(&config, cli.ephemeral),
        Commands::InitConfig { force } => return cmd_init_config(&config, force),
        _ => {}
    }

    let mut store = open_store(&config, cli.ephemeral)?;
    store.initialize().await;
    tracing::debug!(source = ?store.hydration_source(), count = store.len(), "Store ready");

    match cli.command {
        Commands::List { limit } => cmd_list(&store, limit, format)?,
        Commands::Show { id } => cmd_show(&store, &id, format)?,
        Commands::New {
            title,
            content,
            color,
        } => cmd_new(&mut store, title, content, color).await?,
        Commands::Edit { id, title, content } => {
            cmd_edit(&mut store, &id, title, content).await?;
        }
        Commands::Delete { id, yes } => {
            cmd_delete(&mut store, &id, |note| yes_or_prompt(yes, note)).await?;
        }
        Commands::Search { query } => cmd_search(&store, &query, format)?,
        Commands::Fmt {
            id,
            start,
            end,
            kind,
        } => {
            let formatter = TextFormatter::new(config.format.bullet.clone());
            cmd_fmt(&mut store, &formatter, &id, start, end, &kind).await?;
        }
        Commands::Paths | Commands::InitConfig { .. } => {}
    }

    Ok(())
}

/// Load config from the data directory given on the command line, or the
/// default location.
fn resolve_config(data_dir: Option<&Path>) -> Result<AppConfig> {
    let Some(dir) = data_dir else {
        return load_config();
    };

    let path = dir.join("config.toml");
    let mut config = if path.exists() {
        load_config_from_file(&path)?
    } else {
        AppConfig::default()
    };
    config.paths.data_dir = Some(dir.to_path_buf());

    Ok(config)
}

fn open_store(config: &AppConfig, ephemeral: bool) -> Result<Store> {
    let blobs: Box<dyn BlobStore> = if ephemeral {
        tracing::info!("Using in-memory storage");
        Box::new(MemoryBlobStore::new())
    } else {
        Box::new(SqliteBlobStore::open(&config.storage_db_path())?)
    };

    let persistence = if config.storage.key == DEFAULT_STORAGE_KEY {
        BlobPersistence::new(blobs)
    } else {
        BlobPersistence::with_key(blobs, config.storage.key.clone())
    };
    Ok(NoteStore::new(persistence, config.notes.clone()))
}

fn render(notes: &[&Note], format: OutputFormat) -> Result<String> {
    let notes = notes.iter().copied();
    Ok(match format {
        OutputFormat::Markdown => format_notes_markdown(notes),
        OutputFormat::Json => format_notes_json(notes).map_err(AppError::json_parse)?,
        OutputFormat::Table => format_notes_table(notes),
    })
}

/// List notes command.
fn cmd_list(store: &Store, limit: usize, format: OutputFormat) -> Result<()> {
    if store.is_empty() {
        println!("No notes yet. Create your first note!");
        return Ok(());
    }

    let mut notes: Vec<&Note> = store.list().iter().collect();
    if limit > 0 {
        notes.truncate(limit);
    }

    println!("{}", render(&notes, format)?);
    println!();
    println!("Total: {} note(s)", store.len().to_string().cyan());

    Ok(())
}

/// Show a single note.
fn cmd_show(store: &Store, id: &str, format: OutputFormat) -> Result<()> {
    let note = find_note(store, id)?;

    let output = match format {
        OutputFormat::Markdown | OutputFormat::Table => format_note_markdown(note),
        OutputFormat::Json => {
            serde_json::to_string_pretty(note).map_err(AppError::json_parse)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Create note command.
async fn cmd_new(
    store: &mut Store,
    title: String,
    content: String,
    color: Option<String>,
) -> Result<()> {
    validate_title(&title)?;

    if let Some(color) = color.as_deref() {
        if !PALETTE.contains(&color) {
            tracing::warn!(color, palette = ?PALETTE, "Color is outside the card palette");
        }
    }

    let note = store
        .create(NoteInput {
            title,
            content,
            color,
        })
        .await;

    println!(
        "{} Created note {} ({})",
        "✓".green().bold(),
        note.id.cyan(),
        note.title
    );
    Ok(())
}

/// Edit note command.
async fn cmd_edit(
    store: &mut Store,
    id: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let current = find_note(store, id)?;
    let update = NoteUpdate {
        title: title.unwrap_or_else(|| current.title.clone()),
        content: content.unwrap_or_else(|| current.content.clone()),
    };

    validate_title(&update.title)?;
    store.update(id, update).await;

    println!("{} Updated note {}", "✓".green().bold(), id.cyan());
    Ok(())
}

/// Delete note command. `confirm` sees the note before anything is removed.
async fn cmd_delete(
    store: &mut Store,
    id: &str,
    confirm: impl FnOnce(&Note) -> Result<bool>,
) -> Result<()> {
    let note = find_note(store, id)?;
    if !confirm(note)? {
        println!("Delete cancelled");
        return Ok(());
    }

    let title = note.title.clone();
    store.delete(id).await;

    println!("{} Deleted note {} ({})", "✓".green().bold(), id.cyan(), title);
    Ok(())
}

/// Search notes command.
fn cmd_search(store: &Store, query: &str, format: OutputFormat) -> Result<()> {
    let hits = store.search(query);

    if hits.is_empty() {
        println!("No notes match your search");
        return Ok(());
    }

    println!("{}", render(&hits, format)?);
    Ok(())
}

/// Apply inline formatting to a note's content and save it.
async fn cmd_fmt(
    store: &mut Store,
    formatter: &TextFormatter,
    id: &str,
    start: usize,
    end: usize,
    kind: &str,
) -> Result<()> {
    let kind: FormatKind = kind
        .parse()
        .map_err(|message| AppError::Validation { message })?;

    let note = find_note(store, id)?;
    let content = formatter.apply(&note.content, start, end, kind)?;

    if content == note.content {
        println!("Nothing selected, note unchanged");
        return Ok(());
    }

    let update = NoteUpdate {
        title: note.title.clone(),
        content,
    };
    store.update(id, update).await;

    println!("{} Applied {} to note {}", "✓".green().bold(), kind, id.cyan());
    Ok(())
}

/// Show data and config paths command.
fn cmd_paths(config: &AppConfig, ephemeral: bool) -> Result<()> {
    println!("{}", "📂 mynote paths".bold());
    println!();
    println!("  Data dir: {}", config.data_dir().display());

    let db = if ephemeral {
        "(in memory)".yellow().to_string()
    } else {
        config.storage_db_path().display().to_string()
    };
    println!("  Database: {db}");
    println!("  Config:   {}", config_path(config).display());
    println!("  Blob key: {}", config.storage.key);

    Ok(())
}

/// Skip the prompt when `--yes` was given.
fn yes_or_prompt(yes: bool, note: &Note) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    print!(
        "Delete \"{}\"? Are you sure you want to delete this note? [y/N] ",
        note.title
    );
    io::stdout()
        .flush()
        .map_err(|e| AppError::io("Failed to write prompt", e))?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|e| AppError::io("Failed to read answer", e))?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Write the default config file command. With `force`, overwrite it with
/// the effective configuration instead.
fn cmd_init_config(config: &AppConfig, force: bool) -> Result<()> {
    let path = config_path(config);

    if force {
        let mut config = config.clone();
        config.paths.data_dir = Some(config.data_dir());
        save_config(&config)?;
        let path = config.config_file_path();
        println!("{} Wrote {}", "✓".green().bold(), path.display());
    } else if ensure_config_exists(&path)? {
        println!("{} Created {}", "✓".green().bold(), path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }

    Ok(())
}

fn config_path(config: &AppConfig) -> PathBuf {
    if config.paths.data_dir.is_some() {
        config.config_file_path()
    } else {
        config_file_path()
    }
}

fn find_note<'a>(store: &'a Store, id: &str) -> Result<&'a Note> {
    store.find(id).ok_or_else(|| AppError::NoteNotFound { id: id.to_string() })
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
