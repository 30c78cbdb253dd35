//! Conversion between store files and standard CSV
//!
//! Standard CSV here means one record per line with RFC 4180 quoting, as
//! written and read by the `csv` crate. There is no header row: every record
//! is a grid row. Records may differ in length.

use crate::error::{Error, Result};
use crate::grid::{Grid, Row};
use crate::store::GridStore;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Write the store's grid to `dest` as standard CSV. Returns the row count.
pub fn export_csv<P: AsRef<Path>>(store: &GridStore, dest: P) -> Result<usize> {
    let dest = dest.as_ref();
    let grid = store.parse()?;

    let csv_error = |e: csv::Error| Error::Csv {
        path: dest.to_path_buf(),
        source: e,
    };

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(dest)
        .map_err(csv_error)?;

    for row in &grid.rows {
        if row.is_empty() {
            // Written as `""` so readers do not skip it as a blank line
            writer.write_record([""]).map_err(csv_error)?;
        } else {
            writer.write_record(row).map_err(csv_error)?;
        }
    }
    writer.flush()?;

    tracing::debug!("exported {} rows to {}", grid.row_count(), dest.display());
    Ok(grid.row_count())
}

/// Read standard CSV from `source`
pub fn read_csv<P: AsRef<Path>>(source: P) -> Result<Grid> {
    let path = source.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        let row: Row = if record.len() == 1 && record[0].is_empty() {
            Row::new()
        } else {
            record.iter().map(str::to_string).collect()
        };
        rows.push(row);
    }

    Ok(Grid::from(rows))
}

/// Replace the store's content with the records of a standard CSV file.
/// Returns the row count.
pub fn import_csv<P: AsRef<Path>>(store: &GridStore, source: P) -> Result<usize> {
    let grid = read_csv(source.as_ref())?;
    store.rewrite_all(&grid.rows)?;

    tracing::debug!(
        "imported {} rows from {}",
        grid.row_count(),
        source.as_ref().display()
    );
    Ok(grid.row_count())
}
