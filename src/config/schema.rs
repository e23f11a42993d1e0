use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use crate::resolver::AmbiguityPolicy;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/attacca/config.toml` or
/// `~/.config/attacca/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ATTACCA__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub shell: ShellSettings,
    pub library: LibrarySettings,
    pub playlist: PlaylistSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shell: ShellSettings::default(),
            library: LibrarySettings::default(),
            playlist: PlaylistSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// The string printed before each input line.
    pub prompt: String,

    /// How ambiguous command/song prefixes are resolved.
    pub autocomplete: AmbiguityPolicy,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            prompt: "attacca> ".to_string(),
            autocomplete: AmbiguityPolicy::ReportOnly,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory searched for playable tracks. `~` expands to `$HOME`.
    pub music_dir: PathBuf,

    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            music_dir: home_dir(),
            extensions: vec![
                "mp3".into(),
                "ogg".into(),
                "wav".into(),
                "flac".into(),
                "opus".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Directory where `queue save`/`queue load` keep playlist files.
    pub dir: PathBuf,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self { dir: home_dir() }
    }
}

/// The home directory, or `.` when `HOME` is unset.
pub(super) fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
