use std::path::PathBuf;

use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("attacca: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the shell from starting.
            eprintln!("attacca: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// A missing music or playlist directory would fail every command that
/// touches it, so fall back to the home directory loudly.
pub fn check_directories(settings: &mut config::Settings) {
    if !settings.library.music_dir.is_dir() {
        eprintln!("CRITICAL: specified music directory does not exist");
        settings.library.music_dir = config::expand_home(PathBuf::from("~"));
    }
    if !settings.playlist.dir.is_dir() {
        eprintln!("CRITICAL: specified playlist directory does not exist");
        settings.playlist.dir = config::expand_home(PathBuf::from("~"));
    }
}
