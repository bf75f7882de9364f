use std::fmt;

use crate::cells::Coordinate;
use crate::units::{Height, Width};

/// Every coordinate of a grid in row-major order.
#[derive(Copy, Clone)]
pub struct CellIter {
    row_width: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(width: Width, cells_count: usize) -> CellIter {
        CellIter {
            row_width: width.0,
            current_cell_number: 0,
            cells_count,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Coordinate::from_row_major_index(self.current_cell_number, self.row_width);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

/// One `Vec` of coordinates per grid row, north to south.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    row_width: usize,
    rows_count: usize,
    current_row: usize,
}

impl RowIter {
    pub(crate) fn new(width: Width, height: Height) -> RowIter {
        RowIter {
            row_width: width.0,
            rows_count: height.0,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Coordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows_count {
            let y = self.current_row as u32;
            let coords = (0..self.row_width)
                .map(|x| Coordinate::new(x as u32, y))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows_count - self.current_row;
        (remaining, Some(remaining))
    }
}
