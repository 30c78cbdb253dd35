//! grid-core: file-backed spreadsheet-style grid store
//!
//! This library provides functionality to:
//! - Persist a grid of text cells to a blank-line-delimited `.csv` file
//! - Address cells with A1-style references ("B3")
//! - Append, rewrite, blank out and shift-delete rows
//! - Rename, copy and list store files under a configured root
//! - Convert to and from standard CSV

pub mod address;
pub mod codec;
pub mod config;
pub mod editor;
pub mod error;
pub mod grid;
pub mod interchange;
pub mod scanner;
pub mod store;

pub use address::{column_letters, parse_row_number, split_reference, to_indices, CellRef};
pub use codec::{decode_text, encode_row, normalize_line_endings};
pub use config::{Binding, StoreConfig, EXTENSION};
pub use error::{Error, RenameError, RenameErrorKind, Result};
pub use grid::{Grid, Row};
pub use interchange::{export_csv, import_csv, read_csv};
pub use scanner::{scan_root, StoreEntry};
pub use store::GridStore;
