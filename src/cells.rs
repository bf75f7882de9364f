use std::convert::From;

/// Bit set in a cell's wall mask when the northern side is blocked.
pub const NORTH_WALL: u8 = 0b0001;
pub const EAST_WALL: u8 = 0b0010;
pub const SOUTH_WALL: u8 = 0b0100;
pub const WEST_WALL: u8 = 0b1000;

/// A freshly initialised cell is closed off on all four sides.
pub const ALL_WALLS: u8 = NORTH_WALL | EAST_WALL | SOUTH_WALL | WEST_WALL;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, row_width: usize) -> Coordinate {
        let x = index % row_width;
        let y = index / row_width;

        Coordinate::new(x as u32, y as u32)
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from(x_y_pair: (u32, u32)) -> Coordinate {
        Coordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The four directions a passage can be carved in.
///
/// North is towards `y == 0`, West towards `x == 0`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::East,
                                          CompassPrimary::South,
                                          CompassPrimary::West];

    /// The wall mask bit blocking movement in this direction.
    #[inline]
    pub fn wall_bit(self) -> u8 {
        match self {
            CompassPrimary::North => NORTH_WALL,
            CompassPrimary::East => EAST_WALL,
            CompassPrimary::South => SOUTH_WALL,
            CompassPrimary::West => WEST_WALL,
        }
    }

    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// Unit step `(dx, dy)` taken when moving one cell in this direction.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::South => (0, 1),
            CompassPrimary::West => (-1, 0),
        }
    }
}

/// Per position maze state: which sides are walled off and whether a generator has reached it.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    walls: u8,
    visited: bool,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            walls: ALL_WALLS,
            visited: false,
        }
    }
}

impl Cell {
    /// The raw wall mask, only the four direction bits are ever set.
    #[inline]
    pub fn walls(&self) -> u8 {
        self.walls
    }

    #[inline]
    pub fn has_wall(&self, direction: CompassPrimary) -> bool {
        self.walls & direction.wall_bit() != 0
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub fn visit(&mut self) {
        self.visited = true;
    }

    #[inline]
    pub fn remove_wall(&mut self, direction: CompassPrimary) {
        self.walls &= !direction.wall_bit();
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Cell::default();
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools;

    #[test]
    fn wall_bits_do_not_overlap() {
        let bits = CompassPrimary::ALL.iter().map(|dir| dir.wall_bit()).collect::<Vec<u8>>();
        assert!(bits.iter().all(|bit| bit.count_ones() == 1));
        assert_eq!(bits.iter().unique().count(), 4);
        assert_eq!(bits.iter().fold(0, |acc, bit| acc | bit), ALL_WALLS);
    }

    #[test]
    fn opposites() {
        for dir in CompassPrimary::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);

            let (dx, dy) = dir.offset();
            let (odx, ody) = dir.opposite().offset();
            assert_eq!((dx + odx, dy + ody), (0, 0));
        }
    }

    #[test]
    fn new_cell_is_walled_and_unvisited() {
        let cell = Cell::default();
        assert_eq!(cell.walls(), ALL_WALLS);
        assert!(!cell.is_visited());
        assert!(CompassPrimary::ALL.iter().all(|dir| cell.has_wall(*dir)));
    }

    #[test]
    fn removing_walls() {
        let mut cell = Cell::default();
        cell.remove_wall(CompassPrimary::East);
        assert!(!cell.has_wall(CompassPrimary::East));
        assert_eq!(cell.walls(), NORTH_WALL | SOUTH_WALL | WEST_WALL);

        // clearing an open side changes nothing
        cell.remove_wall(CompassPrimary::East);
        assert_eq!(cell.walls(), NORTH_WALL | SOUTH_WALL | WEST_WALL);

        cell.visit();
        cell.reset();
        assert_eq!(cell, Cell::default());
    }

    #[test]
    fn row_major_index_conversion() {
        assert_eq!(Coordinate::from_row_major_index(0, 3), Coordinate::new(0, 0));
        assert_eq!(Coordinate::from_row_major_index(4, 3), Coordinate::new(1, 1));
        assert_eq!(Coordinate::from_row_major_index(8, 3), Coordinate::new(2, 2));
        assert_eq!(Coordinate::from((7, 9)), Coordinate::new(7, 9));
    }
}
