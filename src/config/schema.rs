use serde::Deserialize;

use crate::playlist::DEFAULT_PLAYLIST_NAME;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunedex/config.toml` or `~/.config/tunedex/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNEDEX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub playlist: PlaylistSettings,
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether each candidate must also be parseable by the tag reader.
    pub sanity_check: bool,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Sort directory entries by file name instead of raw traversal order.
    pub sort_entries: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            include_hidden: false,
            sanity_check: true,
            follow_links: false,
            sort_entries: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Name given to playlists generated by `scan --output`.
    pub default_name: String,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            default_name: DEFAULT_PLAYLIST_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Output volume; 1.0 is unchanged, 0.0 is silent.
    pub volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}
