//! Playlist persistence: one comma-separated row of track names per
//! `.csv` file under the playlist directory, no header, whole-file
//! rewrites.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlaylistError;

fn playlist_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.csv"))
}

/// Write the canonical queue order, overwriting any existing playlist of
/// the same name. The shuffled order is never saved.
pub fn save(dir: &Path, name: &str, queue: &[String]) -> Result<(), PlaylistError> {
    fs::create_dir_all(dir)?;
    let mut row = queue.join(",");
    row.push('\n');
    fs::write(playlist_path(dir, name), row)?;
    Ok(())
}

/// Read a playlist back as an ordered track list.
pub fn load(dir: &Path, name: &str) -> Result<Vec<String>, PlaylistError> {
    let path = playlist_path(dir, name);
    if !path.exists() {
        return Err(PlaylistError::NotFound);
    }
    let text = fs::read_to_string(path)?;
    let row = text.lines().next().unwrap_or("");
    Ok(row
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

/// The stems of every file in the playlist directory.
pub fn list(dir: &Path) -> Result<Vec<String>, PlaylistError> {
    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn q(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn save_then_load_round_trips_order() {
        let dir = tempdir().unwrap();
        let queue = q(&["a.mp3", "b.mp3", "c.mp3"]);
        save(dir.path(), "mix", &queue).unwrap();
        assert_eq!(load(dir.path(), "mix").unwrap(), queue);
    }

    #[test]
    fn save_overwrites_existing_playlist() {
        let dir = tempdir().unwrap();
        save(dir.path(), "mix", &q(&["a.mp3"])).unwrap();
        save(dir.path(), "mix", &q(&["b.mp3", "c.mp3"])).unwrap();
        assert_eq!(load(dir.path(), "mix").unwrap(), q(&["b.mp3", "c.mp3"]));
    }

    #[test]
    fn load_missing_playlist_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load(dir.path(), "nope"),
            Err(PlaylistError::NotFound)
        ));
    }

    #[test]
    fn empty_file_loads_as_empty_queue() {
        let dir = tempdir().unwrap();
        save(dir.path(), "empty", &[]).unwrap();
        assert!(load(dir.path(), "empty").unwrap().is_empty());
    }

    #[test]
    fn list_reports_stems_sorted() {
        let dir = tempdir().unwrap();
        save(dir.path(), "rock", &q(&["a.mp3"])).unwrap();
        save(dir.path(), "ambient", &q(&["b.mp3"])).unwrap();
        assert_eq!(
            list(dir.path()).unwrap(),
            vec!["ambient".to_string(), "rock".to_string()]
        );
    }
}
