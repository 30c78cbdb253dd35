//! File-backed grid store
//!
//! A [`GridStore`] owns a binding to one file. It never caches the grid:
//! every read re-parses the whole file and every mutation appends to it or
//! rewrites it in full. Nothing is locked, so concurrent writers to the same
//! path race and the last write wins.

use crate::address::{reference_to_indices, row_index};
use crate::codec::{self, encode_row};
use crate::config::{Binding, StoreConfig};
use crate::error::{Error, RenameError, Result};
use crate::grid::{Grid, Row};
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// A grid persisted to a single `.csv` file
#[derive(Debug, Clone)]
pub struct GridStore {
    config: StoreConfig,
    binding: Binding,
}

impl GridStore {
    /// Bind to `name` in the working directory
    pub fn open(name: &str) -> Result<Self> {
        Self::open_with(StoreConfig::default(), name)
    }

    /// Bind to `name` under the configured root.
    ///
    /// An empty file is created if none exists. Existing content is kept.
    pub fn open_with(config: StoreConfig, name: &str) -> Result<Self> {
        let binding = config.bind(name);

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(binding.path())
        {
            Ok(_) => tracing::debug!("created empty store {}", binding.path().display()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(write_error(binding.path(), e)),
        }

        Ok(Self { config, binding })
    }

    /// File name including the extension
    pub fn filename(&self) -> &str {
        self.binding.name()
    }

    /// Full path of the bound file
    pub fn filepath(&self) -> &Path {
        self.binding.path()
    }

    /// Point this store at another name under the same root without touching
    /// the file system. Use [`GridStore::rename`] to move the file as well.
    pub fn rebind(&mut self, name: &str) -> &Binding {
        self.binding = self.config.bind(name);
        &self.binding
    }

    /// Truncate the bound file to zero length
    pub fn clear(&self) -> Result<()> {
        let path = self.filepath();
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| write_error(path, e))?;
        file.set_len(0).map_err(|e| write_error(path, e))?;
        tracing::debug!("cleared {}", path.display());
        Ok(())
    }

    /// Append one row. `None` appends a blank row.
    pub fn append_row<S: AsRef<str>>(&self, fields: Option<&[S]>) -> Result<()> {
        self.append_encoded(|w| w.write_all(encode_row(fields).as_bytes()))
    }

    /// Append rows in order
    pub fn append_rows<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> Result<()> {
        self.append_encoded(|w| w.write_all(codec::encode_rows(rows).as_bytes()))
    }

    /// Replace the whole file with `rows`
    pub fn rewrite_all<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> Result<()> {
        self.clear()?;
        self.append_rows(rows)?;
        tracing::debug!("rewrote {} with {} rows", self.filepath().display(), rows.len());
        Ok(())
    }

    /// Read and decode the whole file
    pub fn parse(&self) -> Result<Grid> {
        let path = self.filepath();
        let text = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let rows = if self.config.normalize_line_endings {
            codec::decode_text(&codec::normalize_line_endings(&text))
        } else {
            codec::decode_text(&text)
        };

        Ok(Grid::from(rows))
    }

    /// Value of the cell at an A1-style reference; `""` where nothing is stored
    pub fn get_cell(&self, reference: &str) -> Result<String> {
        let (row, col) = reference_to_indices(reference)?;
        let grid = self.parse()?;
        Ok(grid.cell(row, col).unwrap_or_default().to_string())
    }

    /// Row `row` (1-based); empty when past the end of the file
    pub fn get_row(&self, row: i64) -> Result<Row> {
        let index = row_index(row)?;
        let grid = self.parse()?;
        Ok(grid.row(index).cloned().unwrap_or_default())
    }

    /// Move the bound file to `new_name` under the same root.
    ///
    /// On failure the error is logged and returned, and both the binding and
    /// the file system are left as they were.
    pub fn rename(&mut self, new_name: &str) -> std::result::Result<&Binding, RenameError> {
        let target = self.config.bind(new_name);

        if let Err(e) = fs::rename(self.filepath(), target.path()) {
            let err = RenameError::new(
                self.filepath().to_path_buf(),
                target.path().to_path_buf(),
                e,
            );
            tracing::warn!(kind = ?err.kind, "{}", err);
            return Err(err);
        }

        tracing::debug!(
            "renamed {} to {}",
            self.filepath().display(),
            target.path().display()
        );
        self.binding = target;
        Ok(&self.binding)
    }

    /// Overwrite the bound file with a byte copy of `source`
    pub fn copy_from_path<P: AsRef<Path>>(&self, source: P) -> Result<()> {
        let source = source.as_ref();
        if !source.is_file() {
            return Err(Error::FileRead {
                path: source.to_path_buf(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }

        if is_same_file(source, self.filepath()) {
            tracing::debug!("{} is already the bound file, nothing to copy", source.display());
            return Ok(());
        }

        fs::copy(source, self.filepath()).map_err(|e| write_error(self.filepath(), e))?;
        tracing::debug!(
            "copied {} over {}",
            source.display(),
            self.filepath().display()
        );
        Ok(())
    }

    /// Overwrite the bound file with a byte copy of another store's file
    pub fn copy_from(&self, other: &GridStore) -> Result<()> {
        self.copy_from_path(other.filepath())
    }

    fn append_encoded<F>(&self, write: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<fs::File>) -> io::Result<()>,
    {
        let path = self.filepath();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| write_error(path, e))?;

        let mut writer = BufWriter::new(file);
        write(&mut writer)
            .and_then(|_| writer.flush())
            .map_err(|e| write_error(path, e))
    }
}

/// Both paths resolve to the same existing file
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn write_error(path: &Path, source: io::Error) -> Error {
    Error::FileWrite {
        path: path.to_path_buf(),
        source,
    }
}
