// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
use error_chain::error_chain;

use crate::cells::Coordinate;

error_chain! {

    errors {
        OutOfBounds(x: u32, y: u32, width: usize, height: usize) {
            description("grid coordinate out of bounds")
            display("grid coordinate ({}, {}) is outside of a {}x{} grid", x, y, width, height)
        }

        InvalidDimensions(width: usize, height: usize) {
            description("invalid grid dimensions")
            display("a grid cannot be {}x{}, both dimensions must be positive", width, height)
        }

        NotAdjacent(a: Coordinate, b: Coordinate) {
            description("grid coordinates are not adjacent")
            display("{:?} and {:?} are not orthogonal neighbours", a, b)
        }
    }
}
