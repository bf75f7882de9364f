//! **maze_carver** generates perfect rectangular mazes: every cell is reachable from every other by exactly one
//! path.
//!
//! Build a `grid::Grid`, pick a `generators::Generator` (recursive backtracker or randomised Prim's) seeded
//! with any `rand::Rng`, and read the carved wall bits back out of the grid's cells.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod random;
pub mod units;
mod utils;
