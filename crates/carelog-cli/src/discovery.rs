//! Envelope file discovery.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Lists the `.json` envelope files in a directory, sorted by filename so
/// batches are deterministic.
pub fn list_envelope_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("input directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read input directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read input directory {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        // Skip our own outputs when re-running over the same folder.
        let is_record = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".record.json"));
        if is_json && !is_record {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_sorted_json_files_only() {
        let dir = TempDir::new().expect("tempdir");
        for name in ["b.json", "a.json", "notes.txt", "a.record.json"] {
            std::fs::write(dir.path().join(name), "{}").expect("write file");
        }

        let files = list_envelope_files(dir.path()).expect("list files");
        let names: Vec<&str> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let missing = dir.path().join("nope");
        assert!(list_envelope_files(&missing).is_err());
    }
}
