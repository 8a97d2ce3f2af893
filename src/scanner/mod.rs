use std::io;
use std::path::{Path, PathBuf};

use crate::constants::VIDEO_EXTENSIONS;

/// List the convertible video files directly inside `dir`, sorted by name.
///
/// Entries are matched by extension against the fixed allow-list,
/// case-insensitively. Subdirectories are not descended into and
/// non-matching entries are skipped. A missing or unreadable directory is
/// an error for the caller.
pub fn list_video_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_video_extension(&path) {
            files.push(path);
        }
    }

    // Stable processing order across runs.
    files.sort();
    Ok(files)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "clip.MOV");
        touch(dir.path(), "notes.txt");

        let files = list_video_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "clip.MOV");
    }

    #[test]
    fn test_all_known_extensions_are_accepted() {
        let dir = TempDir::new().unwrap();
        for ext in VIDEO_EXTENSIONS {
            touch(dir.path(), &format!("sample.{ext}"));
        }

        let files = list_video_files(dir.path()).unwrap();
        assert_eq!(files.len(), VIDEO_EXTENSIONS.len());
    }

    #[test]
    fn test_directories_are_skipped_even_with_video_names() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("folder.mp4")).unwrap();
        touch(dir.path(), "real.mp4");

        let files = list_video_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "real.mp4");
    }

    #[test]
    fn test_listing_is_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "c.mkv");
        touch(dir.path(), "a.mp4");
        touch(dir.path(), "b.mov");

        let files = list_video_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.mp4", "b.mov", "c.mkv"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(list_video_files(&missing).is_err());
    }
}
