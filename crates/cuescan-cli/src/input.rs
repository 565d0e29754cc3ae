//! Directory scanning for recorder WAV files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Lists the WAV files directly inside `dir`, lexicographically sorted.
///
/// The extension match is case-insensitive (`.wav` and `.WAV` both
/// qualify); subdirectories are not descended into.
pub fn wav_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("scanning {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
        {
            files.push(path);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_filters_and_sorts_wav_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ZOOM0001_Tr12-0002.WAV"), b"").unwrap();
        fs::write(dir.path().join("ZOOM0001_Tr12-0001.WAV"), b"").unwrap();
        fs::write(dir.path().join("ambience.wav"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("backup")).unwrap();
        fs::write(dir.path().join("backup").join("ZOOM0009_Tr12-0001.WAV"), b"").unwrap();

        let files = wav_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        // sorted, case-insensitive extension match, no recursion
        assert_eq!(
            names,
            vec![
                "ZOOM0001_Tr12-0001.WAV",
                "ZOOM0001_Tr12-0002.WAV",
                "ambience.wav",
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert!(wav_files(&gone).is_err());
    }
}
