use docopt::Docopt;
use log::info;
use maze_carver::{
    generators::{Generator, GeneratorKind},
    grid::Grid,
    units::{Height, Width},
};
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use std::io::{self, prelude::*};

const USAGE: &str = "Maze Carver

Usage:
    maze_carver -h | --help
    maze_carver [recursive-backtracker | prims] [--grid-width=<w>] [--grid-height=<h>] [--seed=<n>] [--once]

Options:
    -h --help              Show this screen.
    --grid-width=<w>       The grid width in a w*h grid [default: 25].
    --grid-height=<h>      The grid height in a w*h grid [default: 10].
    --seed=<n>             Seed the random number generator so the same mazes come out every run.
    --once                 Print a single maze and exit instead of offering to regenerate.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_recursive_backtracker: bool,
    cmd_prims: bool,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u32>,
    flag_once: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_carver::errors::Error, ::maze_carver::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let kind = if args.cmd_prims {
        GeneratorKind::RandomizedGrowth
    } else {
        GeneratorKind::RecursiveBacktracker
    };
    let mut generator = make_generator(kind, args.flag_seed);
    let mut maze_grid = Grid::new(Width(args.flag_grid_width), Height(args.flag_grid_height))
        .chain_err(|| "Failed to create the maze grid")?;
    info!("generating {}x{} mazes with {:?}", args.flag_grid_width, args.flag_grid_height, kind);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        maze_grid.initialise();
        generator.generate(&mut maze_grid);
        println!("{}", maze_grid);

        if args.flag_once {
            break;
        }

        print!("Press Enter to regenerate, or q then Enter to exit....");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        if read == 0 || line.trim().eq_ignore_ascii_case("q") {
            break;
        }
    }

    Ok(())
}

fn make_generator(kind: GeneratorKind, seed: Option<u32>) -> Box<dyn Generator> {
    match seed {
        // XorShift cannot take an all zero seed, the constant words keep it non-zero
        Some(s) => kind.generator(XorShiftRng::from_seed([s, 0x9E37_79B9, 0x7F4A_7C15, 0x85EB_CA6B])),
        None => kind.generator(rand::weak_rng()),
    }
}
