use std::path::PathBuf;

use serde::Deserialize;

use crate::library::Field;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tracklist/config.toml` or `~/.config/tracklist/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TRACKLIST__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub list: ListSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    /// How the viewport follows the cursor.
    pub scroll_mode: ScrollModeSetting,
    /// Rows kept between the cursor and the viewport edges in normal mode.
    pub scrolloff: usize,
    /// Whether the cursor wraps around at the ends of a list.
    pub wrap: bool,
    /// Compare text sort keys case-sensitively.
    pub case_sensitive_sort: bool,
    /// Treat search and filter patterns as regular expressions.
    pub regex_search: bool,
    /// Sort keys applied in order; the last one is the most significant.
    ///
    /// Example: ["track", "disc", "album", "date", "albumartistsort"]
    pub sort: Vec<String>,
    /// Which record fields to show per row, and in what order.
    pub columns: Vec<Field>,
    /// Separator used to join `columns`.
    pub column_separator: String,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            scroll_mode: ScrollModeSetting::Normal,
            scrolloff: 2,
            wrap: false,
            case_sensitive_sort: false,
            regex_search: false,
            sort: ["track", "disc", "album", "date", "albumartistsort"]
                .map(String::from)
                .to_vec(),
            columns: vec![Field::Artist, Field::Title, Field::Album, Field::Time],
            column_separator: " | ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollModeSetting {
    Normal,
    #[serde(alias = "centred", alias = "center")]
    Centered,
    #[serde(alias = "proportional")]
    Relative,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tracklist ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Write log output to this file. Logging is off when unset, since the
    /// terminal itself is taken by the interface.
    pub file: Option<PathBuf>,
    /// Maximum level: `error`, `warn`, `info`, `debug` or `trace`.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
