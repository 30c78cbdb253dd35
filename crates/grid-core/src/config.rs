//! Store configuration and file binding

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Extension carried by every store file
pub const EXTENSION: &str = ".csv";

/// Where stores live and how their files are read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory every store name is resolved against
    pub root: PathBuf,
    /// Convert `\r\n` to `\n` before decoding
    pub normalize_line_endings: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            normalize_line_endings: false,
        }
    }
}

impl StoreConfig {
    /// Config rooted at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load a config file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Resolve a store name to its binding under this root
    pub fn bind(&self, name: &str) -> Binding {
        Binding::new(&self.root, name)
    }
}

/// A store's file name and the full path it resolves to.
///
/// `name` always ends in [`EXTENSION`] exactly once and `path` is always
/// `root.join(name)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    name: String,
    path: PathBuf,
}

impl Binding {
    pub fn new(root: &Path, name: &str) -> Self {
        let name = file_name(name);
        let path = root.join(&name);
        Self { name, path }
    }

    /// File name including the extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full path of the file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Append the extension unless `name` already carries it
pub fn file_name(name: &str) -> String {
    let stem = name.strip_suffix(EXTENSION).unwrap_or(name);
    format!("{}{}", stem, EXTENSION)
}
