//! In-memory grid types

use serde::{Deserialize, Serialize};

/// One row of opaque cell strings. An empty row is a blank line in the file.
pub type Row = Vec<String>;

/// A decoded grid: the content of a store file at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Rows in file order; position is the only row identity
    pub rows: Vec<Row>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get a row by zero-based index
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a cell by zero-based indices
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Blank out the row at `index`, growing the grid with empty rows if needed
    pub fn blank_row(&mut self, index: usize) {
        if index >= self.rows.len() {
            self.rows.resize(index + 1, Row::new());
        }
        self.rows[index].clear();
    }

    /// Remove the row at `index`, slide later rows up and leave an empty row
    /// at the tail so the row count does not shrink
    pub fn shift_out_row(&mut self, index: usize) {
        if index >= self.rows.len() {
            self.rows.resize(index + 1, Row::new());
        }
        self.rows.remove(index);
        self.rows.push(Row::new());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for Grid {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// Build a row from string slices
#[cfg(test)]
pub(crate) fn row<S: AsRef<str>>(cells: &[S]) -> Row {
    cells.iter().map(|c| c.as_ref().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        Grid::from(vec![row(&["a", "b"]), row(&["c"]), row(&["d", "e", "f"])])
    }

    #[test]
    fn test_grid_lookup() {
        let grid = sample();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.cell(0, 1), Some("b"));
        assert_eq!(grid.cell(1, 1), None);
        assert_eq!(grid.cell(9, 0), None);
        assert_eq!(grid.row(1), Some(&row(&["c"])));
    }

    #[test]
    fn test_blank_row_keeps_gap() {
        let mut grid = sample();
        grid.blank_row(1);
        assert_eq!(grid.rows, vec![row(&["a", "b"]), Row::new(), row(&["d", "e", "f"])]);
    }

    #[test]
    fn test_blank_row_past_end_pads() {
        let mut grid = sample();
        grid.blank_row(4);
        assert_eq!(grid.row_count(), 5);
        assert!(grid.rows[3].is_empty());
        assert!(grid.rows[4].is_empty());
    }

    #[test]
    fn test_shift_out_row() {
        let mut grid = sample();
        grid.shift_out_row(1);
        assert_eq!(grid.rows, vec![row(&["a", "b"]), row(&["d", "e", "f"]), Row::new()]);

        let mut grid = sample();
        grid.shift_out_row(2);
        assert_eq!(grid.rows, vec![row(&["a", "b"]), row(&["c"]), Row::new()]);
    }

    #[test]
    fn test_shift_out_row_past_end() {
        let mut grid = sample();
        grid.shift_out_row(4);
        assert_eq!(grid.row_count(), 5);
        assert_eq!(grid.rows[2], row(&["d", "e", "f"]));
        assert!(grid.rows[3].is_empty() && grid.rows[4].is_empty());
    }
}
