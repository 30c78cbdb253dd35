//! Directory scanner for discovering stores under a root

use crate::config::{StoreConfig, EXTENSION};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use walkdir::WalkDir;

/// A store file found under the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreEntry {
    /// Store name without the extension (what `GridStore::open` expects)
    pub name: String,
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// List every store directly inside the configured root, sorted by name
pub fn scan_root(config: &StoreConfig) -> Result<Vec<StoreEntry>> {
    let mut entries = Vec::new();
    let extension = EXTENSION.trim_start_matches('.');

    for entry in WalkDir::new(&config.root).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_file() || path.extension().map_or(true, |ext| ext != extension) {
            continue;
        }

        if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
            entries.push(StoreEntry {
                name: name.to_string(),
                path: path.to_path_buf(),
                size: entry.metadata()?.len(),
            });
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GridStore;
    use std::fs;

    #[test]
    fn test_scan_lists_stores() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::with_root(dir.path());

        let beta = GridStore::open_with(config.clone(), "beta").unwrap();
        beta.append_row(Some(&["x"][..])).unwrap();
        GridStore::open_with(config.clone(), "alpha").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("deep.csv"), "").unwrap();

        let entries = scan_root(&config).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(entries[0].size, 0);
        assert_eq!(entries[1].size, 3);
        assert_eq!(entries[1].path, dir.path().join("beta.csv"));
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::with_root(dir.path().join("missing"));
        assert!(scan_root(&config).is_err());
    }
}
