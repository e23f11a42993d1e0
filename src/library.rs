//! Music-directory listing and track metadata.
//!
//! The listing is the candidate set the prefix resolver matches song names
//! against; it is rebuilt from disk on every resolution so freshly added
//! files show up without restarting the shell.

use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::error::MetadataError;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// List the playable file names (with extension) in the music directory.
///
/// Only the directory root is scanned; queues refer to tracks by bare
/// file name, so nested paths would collide with the playlist format.
pub fn list_tracks(settings: &LibrarySettings) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in WalkDir::new(&settings.music_dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, settings) {
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                names.push(name.to_string());
            }
        }
    }

    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    names
}

/// Port for duration extraction, so the queue core never touches tag
/// parsing directly.
pub trait MetadataReader {
    fn read_duration(&self, path: &Path) -> Result<Duration, MetadataError>;
}

/// Production reader backed by `lofty`.
pub struct LoftyReader;

impl MetadataReader for LoftyReader {
    fn read_duration(&self, path: &Path) -> Result<Duration, MetadataError> {
        let tagged = lofty::read_from_path(path)?;
        Ok(tagged.properties().duration())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings(dir: &Path) -> LibrarySettings {
        LibrarySettings {
            music_dir: dir.to_path_buf(),
            ..LibrarySettings::default()
        }
    }

    #[test]
    fn is_audio_file_matches_configured_extensions_case_insensitive() {
        let s = LibrarySettings::default();
        assert!(is_audio_file(Path::new("/tmp/a.mp3"), &s));
        assert!(is_audio_file(Path::new("/tmp/a.MP3"), &s));
        assert!(is_audio_file(Path::new("/tmp/a.flac"), &s));
        assert!(is_audio_file(Path::new("/tmp/a.opus"), &s));
        assert!(!is_audio_file(Path::new("/tmp/a.txt"), &s));
        assert!(!is_audio_file(Path::new("/tmp/a"), &s));
    }

    #[test]
    fn list_tracks_filters_non_audio_and_sorts_case_insensitive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
        fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
        fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

        let names = list_tracks(&settings(dir.path()));
        assert_eq!(names, vec!["A.ogg".to_string(), "b.MP3".to_string()]);
    }

    #[test]
    fn list_tracks_does_not_recurse() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("child.mp3"), b"not real").unwrap();

        let names = list_tracks(&settings(dir.path()));
        assert_eq!(names, vec!["root.mp3".to_string()]);
    }

    #[test]
    fn list_tracks_of_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(list_tracks(&settings(&gone)).is_empty());
    }
}
