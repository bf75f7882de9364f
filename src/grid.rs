use std::fmt;
use std::ops::{Index, IndexMut};

use error_chain::bail;
use itertools::iproduct;
use log::trace;
use petgraph::graph::UnGraph;
use smallvec::SmallVec;

use crate::cells::{Cell, CompassPrimary, Coordinate};
use crate::errors::*;
use crate::grid_iterators::{CellIter, RowIter};
use crate::random::RandomSource;
use crate::units::{Height, Width};

/// The 3x3 block around a coordinate, row-major, `None` for the centre and anything off the grid.
pub type NeighbourBlock = [Option<Coordinate>; 9];

/// In bounds orthogonal neighbours paired with the direction taken to reach them.
pub type OrthogonalNeighbours = SmallVec<[(Coordinate, CompassPrimary); 4]>;

/// A fixed size rectangular maze.
///
/// Cells are stored row-major. Passages exist only as cleared wall bits, so two neighbours are connected
/// when both of their facing walls are open.
#[derive(Clone, PartialEq)]
pub struct Grid {
    width: Width,
    height: Height,
    cells: Vec<Cell>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, passages: {:?}",
               self.width, self.height, self.passages().len())
    }
}

impl Grid {
    /// Create a grid with every cell walled in and unvisited.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        let (Width(w), Height(h)) = (width, height);
        // coordinates are u32, so larger sides cannot be addressed
        if w == 0 || h == 0 || w > u32::MAX as usize || h > u32::MAX as usize {
            bail!(ErrorKind::InvalidDimensions(w, h));
        }
        let cells_count = w.checked_mul(h)
            .ok_or_else(|| Error::from(ErrorKind::InvalidDimensions(w, h)))?;

        Ok(Grid {
            width,
            height,
            cells: vec![Cell::default(); cells_count],
        })
    }

    /// Reset every cell to fully walled and unvisited, ready for another generation run.
    pub fn initialise(&mut self) {
        trace!("initialising {}x{} grid", self.width.0, self.height.0);
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, coord: Coordinate) -> Result<&Cell> {
        let index = self.checked_index(coord)?;
        Ok(&self.cells[index])
    }

    /// The wall bitmask of a cell, see `cells::ALL_WALLS` and friends.
    pub fn walls(&self, coord: Coordinate) -> Result<u8> {
        self.cell(coord).map(Cell::walls)
    }

    pub fn is_visited(&self, coord: Coordinate) -> Result<bool> {
        self.cell(coord).map(Cell::is_visited)
    }

    pub fn mark_visited(&mut self, coord: Coordinate) -> Result<()> {
        let index = self.checked_index(coord)?;
        self.cells[index].visit();
        Ok(())
    }

    pub fn random_cell<R: RandomSource>(&self, rng: &mut R) -> Coordinate {
        let index = rng.index_below(self.size());
        Coordinate::from_row_major_index(index, self.width.0)
    }

    /// The 3x3 block of coordinates centred on `coord`.
    ///
    /// Always 9 entries, ordered by row then column. The centre and any position outside of the grid are
    /// `None`, so a corner has 3 present entries, an edge 5 and an interior cell 8.
    pub fn neighbours(&self, coord: Coordinate) -> NeighbourBlock {
        let mut block = [None; 9];
        for (slot, (dy, dx)) in iproduct!(-1i64..=1, -1i64..=1).enumerate() {
            if dx != 0 || dy != 0 {
                block[slot] = self.offset_coordinate(coord, dx, dy);
            }
        }
        block
    }

    /// Cells to the North, East, South or West that lie on the grid.
    pub fn orthogonal_neighbours(&self, coord: Coordinate) -> OrthogonalNeighbours {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir).map(|n| (n, dir)))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Coordinate,
                                  direction: CompassPrimary)
                                  -> Option<Coordinate> {
        let (dx, dy) = direction.offset();
        self.offset_coordinate(coord, dx, dy)
    }

    /// The direction leading from `a` to `b` if they are orthogonal neighbours on this grid.
    pub fn direction_between(&self, a: Coordinate, b: Coordinate) -> Option<CompassPrimary> {
        if !self.is_valid_coordinate(a) || !self.is_valid_coordinate(b) {
            return None;
        }
        CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|&dir| self.neighbour_at_direction(a, dir) == Some(b))
    }

    /// Can we walk from `a` straight into `b`?
    ///
    /// Only orthogonal neighbours can be passable, and both of their facing walls must be open.
    pub fn is_passable(&self, a: Coordinate, b: Coordinate) -> bool {
        match (self.direction_between(a, b), self.cell(a), self.cell(b)) {
            (Some(dir), Ok(a_cell), Ok(b_cell)) => {
                !a_cell.has_wall(dir) && !b_cell.has_wall(dir.opposite())
            }
            _ => false,
        }
    }

    /// Knock down the wall between two orthogonal neighbours, on both sides.
    pub fn connect(&mut self, a: Coordinate, b: Coordinate) -> Result<()> {
        self.checked_index(a)?;
        self.checked_index(b)?;
        let dir = self.direction_between(a, b)
            .ok_or_else(|| Error::from(ErrorKind::NotAdjacent(a, b)))?;
        self.carve_passage(a, dir);
        Ok(())
    }

    /// Straight line distance between two coordinates, walls play no part.
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        let dx = f64::from(a.x) - f64::from(b.x);
        let dy = f64::from(a.y) - f64::from(b.y);
        dx.hypot(dy)
    }

    /// Every passable pair of cells, each pair once, `(west or north, east or south)`.
    pub fn passages(&self) -> Vec<(Coordinate, Coordinate)> {
        self.iter()
            .flat_map(|coord| {
                [CompassPrimary::East, CompassPrimary::South]
                    .iter()
                    .filter_map(move |&dir| self.neighbour_at_direction(coord, dir))
                    .filter(move |&n| self.is_passable(coord, n))
                    .map(move |n| (coord, n))
                    .collect::<SmallVec<[_; 2]>>()
            })
            .collect()
    }

    /// The maze as an undirected graph: node `i` is the cell at row-major index `i`, edges are passages.
    pub fn passage_graph(&self) -> UnGraph<Coordinate, ()> {
        let passages = self.passages();
        let mut graph = UnGraph::with_capacity(self.size(), passages.len());
        let nodes = self.iter().map(|coord| graph.add_node(coord)).collect::<Vec<_>>();

        for (a, b) in passages {
            if let (Some(a_index), Some(b_index)) =
                (self.grid_coordinate_to_index(a), self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(nodes[a_index], nodes[b_index], ());
            }
        }

        graph
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.width, self.size())
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.width, self.height)
    }

    /// Clear the wall leading out of `coord` towards `direction` and the facing wall of the neighbour.
    ///
    /// Does nothing if there is no neighbour that way.
    pub(crate) fn carve_passage(&mut self, coord: Coordinate, direction: CompassPrimary) {
        if let Some(neighbour) = self.neighbour_at_direction(coord, direction) {
            self[coord].remove_wall(direction);
            self[neighbour].remove_wall(direction.opposite());
        }
    }

    fn checked_index(&self, coord: Coordinate) -> Result<usize> {
        self.grid_coordinate_to_index(coord).ok_or_else(|| {
            ErrorKind::OutOfBounds(coord.x, coord.y, self.width.0, self.height.0).into()
        })
    }

    fn offset_coordinate(&self, coord: Coordinate, dx: i64, dy: i64) -> Option<Coordinate> {
        let x = i64::from(coord.x) + dx;
        let y = i64::from(coord.y) + dy;
        if x >= 0 && y >= 0 && (x as usize) < self.width.0 && (y as usize) < self.height.0 {
            Some(Coordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }
}

/// Panics if the coordinate is off the grid, like slice indexing.
impl Index<Coordinate> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coordinate) -> &Cell {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => &self.cells[index],
            None => panic!("{:?} is outside of a {}x{} grid", coord, self.width.0, self.height.0),
        }
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Cell {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => &mut self.cells[index],
            None => panic!("{:?} is outside of a {}x{} grid", coord, self.width.0, self.height.0),
        }
    }
}
