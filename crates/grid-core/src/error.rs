//! Error types for grid-core

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in grid-core
#[derive(Debug, Error)]
pub enum Error {
    /// Cell reference is not letters immediately followed by a row number
    #[error("invalid cell reference '{0}'")]
    InvalidReference(String),

    /// Row number is not a positive integer
    #[error("invalid row number '{0}': must be a positive integer")]
    InvalidRowNumber(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write, append to, truncate or copy over a file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Rename of the bound file failed
    #[error(transparent)]
    Rename(#[from] RenameError),

    /// CSV error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Directory traversal error
    #[error("failed to traverse directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classification of a failed rename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameErrorKind {
    /// Source file (or target directory) does not exist
    NotFound,
    /// Caller may not modify the file or the target directory
    PermissionDenied,
    /// File is held open by another program
    ResourceBusy,
    /// Anything else the OS reports
    Other,
}

impl RenameErrorKind {
    /// Classify an I/O error raised by `std::fs::rename`
    pub fn classify(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => RenameErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => RenameErrorKind::PermissionDenied,
            io::ErrorKind::ResourceBusy => RenameErrorKind::ResourceBusy,
            _ => RenameErrorKind::Other,
        }
    }
}

impl fmt::Display for RenameErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            RenameErrorKind::NotFound => "file not found",
            RenameErrorKind::PermissionDenied => "permission denied",
            RenameErrorKind::ResourceBusy => "file is being used by another program",
            RenameErrorKind::Other => "rename failed",
        };
        f.write_str(msg)
    }
}

/// A rename that did not happen; the store binding is unchanged
#[derive(Debug, Error)]
#[error("cannot rename '{}' to '{}': {kind}", .from.display(), .to.display())]
pub struct RenameError {
    pub kind: RenameErrorKind,
    pub from: PathBuf,
    pub to: PathBuf,
    #[source]
    pub source: io::Error,
}

impl RenameError {
    pub(crate) fn new(from: PathBuf, to: PathBuf, source: io::Error) -> Self {
        Self {
            kind: RenameErrorKind::classify(&source),
            from,
            to,
            source,
        }
    }
}
