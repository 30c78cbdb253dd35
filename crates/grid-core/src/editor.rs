//! Row deletion on top of [`GridStore`]
//!
//! Both operations parse the whole file, edit the grid in memory and write it
//! back with [`GridStore::rewrite_all`]. They return the grid as written.
//! Blank rows at the end of that grid are written to the file but, because the
//! decoder trims the whole text, a later parse will not report them.

use crate::address::row_index;
use crate::error::Result;
use crate::grid::Grid;
use crate::store::GridStore;

impl GridStore {
    /// Blank out row `row` (1-based), leaving an empty line in its place.
    /// Rows after it keep their numbers.
    pub fn delete_row(&self, row: i64) -> Result<Grid> {
        let index = row_index(row)?;
        let mut grid = self.parse()?;

        grid.blank_row(index);
        self.rewrite_all(&grid.rows)?;

        tracing::debug!("deleted row {} of {}", row, self.filepath().display());
        Ok(grid)
    }

    /// Remove row `row` (1-based) and move every later row up by one. An empty
    /// row is appended so the row count stays the same.
    pub fn delete_row_and_shift(&self, row: i64) -> Result<Grid> {
        let index = row_index(row)?;
        let mut grid = self.parse()?;

        grid.shift_out_row(index);
        self.rewrite_all(&grid.rows)?;

        tracing::debug!(
            "deleted row {} of {} and shifted {} rows up",
            row,
            self.filepath().display(),
            grid.row_count().saturating_sub(index + 1)
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::StoreConfig;
    use crate::error::Error;
    use crate::grid::{row, Row};
    use crate::store::GridStore;
    use std::fs;

    fn seeded(dir: &tempfile::TempDir) -> GridStore {
        let store = GridStore::open_with(StoreConfig::with_root(dir.path()), "rows").unwrap();
        store
            .append_rows(&[row(&["r1"]), row(&["r2"]), row(&["r3"])])
            .unwrap();
        store
    }

    #[test]
    fn test_delete_row_leaves_gap() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(&dir);

        let grid = store.delete_row(2).unwrap();
        assert_eq!(grid.rows, vec![row(&["r1"]), Row::new(), row(&["r3"])]);
        assert_eq!(
            fs::read_to_string(store.filepath()).unwrap(),
            "r1\n\n\n\nr3\n\n"
        );
        assert_eq!(store.parse().unwrap(), grid);
        assert_eq!(store.get_row(3).unwrap(), row(&["r3"]));
    }

    #[test]
    fn test_delete_row_and_shift() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(&dir);

        let grid = store.delete_row_and_shift(2).unwrap();
        assert_eq!(grid.rows, vec![row(&["r1"]), row(&["r3"]), Row::new()]);
        assert_eq!(
            fs::read_to_string(store.filepath()).unwrap(),
            "r1\n\nr3\n\n\n\n"
        );
        assert_eq!(store.get_row(2).unwrap(), row(&["r3"]));
        assert!(store.get_row(3).unwrap().is_empty());
    }

    #[test]
    fn test_delete_first_row_and_shift() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(&dir);

        let grid = store.delete_row_and_shift(1).unwrap();
        assert_eq!(grid.rows, vec![row(&["r2"]), row(&["r3"]), Row::new()]);
        assert_eq!(store.get_cell("A1").unwrap(), "r2");
    }

    #[test]
    fn test_delete_rejects_bad_row_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(&dir);

        assert!(matches!(store.delete_row(0), Err(Error::InvalidRowNumber(_))));
        assert!(matches!(
            store.delete_row_and_shift(-3),
            Err(Error::InvalidRowNumber(_))
        ));
        assert_eq!(store.parse().unwrap().row_count(), 3);
    }

    #[test]
    fn test_delete_row_past_end_pads() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded(&dir);

        let grid = store.delete_row(5).unwrap();
        assert_eq!(grid.row_count(), 5);
        assert_eq!(
            fs::read_to_string(store.filepath()).unwrap(),
            "r1\n\nr2\n\nr3\n\n\n\n\n\n"
        );
    }
}
