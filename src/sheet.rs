// Sheet - Raw, headerless cell grid for one workbook tab

use crate::cell::Cell;

static ABSENT: Cell = Cell::Absent;

/// Sheet - Zero-based (row, column) grid with ragged rows
///
/// Reading past the end of a row (or past the last row) yields `Cell::Absent`,
/// so callers never bounds-check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Sheet { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&ABSENT)
    }

    /// Cells of one row; empty slice for a row past the end
    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rows with their index, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows.iter().map(Vec::as_slice).enumerate()
    }

    /// Row indices strictly below `header_row`
    pub fn rows_below(&self, header_row: usize) -> std::ops::Range<usize> {
        (header_row + 1).min(self.rows.len())..self.rows.len()
    }
}

impl From<Vec<Vec<Cell>>> for Sheet {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Sheet::new(rows)
    }
}
