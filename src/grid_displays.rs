use std::fmt;

use crate::cells::CompassPrimary;
use crate::grid::Grid;

const CORNER: &str = "+";
const WALL_H: &str = "---";
const OPEN_H: &str = "   ";
const WALL_V: &str = "|";
const OPEN_V: &str = " ";
const CELL_BODY: &str = "   ";

/// Renders each cell as a 3 glyph wide room with `+---+` above and below and `|` to either side.
///
/// Only the wall bits are consulted: a row's northern boundary comes from each cell's own North bit,
/// every other boundary from the cell to its west or north.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let wall = |walled: bool, closed: &'static str, open: &'static str| {
            if walled { closed } else { open }
        };

        let mut rows = self.iter_row().peekable();

        // Start by special case rendering the text for the north most boundary
        if let Some(first_row) = rows.peek() {
            let mut top = String::from(CORNER);
            for coord in first_row {
                top.push_str(wall(self[*coord].has_wall(CompassPrimary::North), WALL_H, OPEN_H));
                top.push_str(CORNER);
            }
            writeln!(f, "{}", top)?;
        }

        for row in rows {
            let mut middle = String::new();
            let mut bottom = String::from(CORNER);

            if let Some(first) = row.first() {
                middle.push_str(wall(self[*first].has_wall(CompassPrimary::West), WALL_V, OPEN_V));
            }

            for coord in &row {
                let cell = &self[*coord];
                middle.push_str(CELL_BODY);
                middle.push_str(wall(cell.has_wall(CompassPrimary::East), WALL_V, OPEN_V));
                bottom.push_str(wall(cell.has_wall(CompassPrimary::South), WALL_H, OPEN_H));
                bottom.push_str(CORNER);
            }

            writeln!(f, "{}", middle)?;
            writeln!(f, "{}", bottom)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use crate::cells::Coordinate;
    use crate::grid::Grid;
    use crate::units::{Height, Width};

    #[test]
    fn closed_grid() {
        let g = Grid::new(Width(2), Height(1)).unwrap();
        assert_eq!(g.to_string(), "+---+---+\n|   |   |\n+---+---+\n");
    }

    #[test]
    fn open_passages() {
        let mut g = Grid::new(Width(2), Height(2)).unwrap();
        g.connect(Coordinate::new(0, 0), Coordinate::new(1, 0)).unwrap();
        g.connect(Coordinate::new(1, 0), Coordinate::new(1, 1)).unwrap();
        let expected = "\
+---+---+
|       |
+---+   +
|   |   |
+---+---+
";
        assert_eq!(format!("{}", g), expected);
    }
}
