//! Application configuration model.
//!
//! Every field has a serde default so partial config files are valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::seed::DEFAULT_COLOR;

/// Bullet prefix used by list formatting.
pub const DEFAULT_BULLET: &str = "•";

/// Blob key under which the whole collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// Where and how the note collection is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// File name of the blob database inside the data directory.
    #[serde(default = "default_db_file")]
    pub db_file: String,

    /// Blob key for the serialized collection.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_file: default_db_file(),
            key: default_key(),
        }
    }
}

fn default_db_file() -> String {
    "notes.db".to_string()
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Defaults applied to new and updated notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Color for notes created without one.
    #[serde(default = "default_color")]
    pub default_color: String,

    /// chrono format string for note dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            date_format: default_date_format(),
        }
    }
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

/// Inline formatting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Prefix glyph for list items (a single space is added after it).
    #[serde(default = "default_bullet")]
    pub bullet: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            bullet: default_bullet(),
        }
    }
}

fn default_bullet() -> String {
    DEFAULT_BULLET.to_string()
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mynote")
    }

    /// Get the blob database path.
    #[must_use]
    pub fn storage_db_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.db_file)
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.key, "notes");
        assert_eq!(config.notes.default_color, DEFAULT_COLOR);
        assert_eq!(config.format.bullet, DEFAULT_BULLET);
    }

    #[test]
    fn test_custom_data_dir_drives_paths() {
        let config = AppConfig {
            paths: PathConfig {
                data_dir: Some(PathBuf::from("/tmp/notes")),
            },
            ..Default::default()
        };
        assert_eq!(config.storage_db_path(), PathBuf::from("/tmp/notes/notes.db"));
        assert_eq!(config.config_file_path(), PathBuf::from("/tmp/notes/config.toml"));
    }
}
