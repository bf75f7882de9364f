use log::debug;
use smallvec::SmallVec;

use crate::cells::{CompassPrimary, Coordinate};
use crate::grid::Grid;
use crate::random::RandomSource;
use crate::utils;

/// Carves a perfect maze into a grid.
///
/// Whatever state the grid is in beforehand, afterwards its passages form a spanning tree over all of
/// its cells and every cell is marked visited.
pub trait Generator {
    fn generate(&mut self, grid: &mut Grid);
}

/// The maze generation algorithms on offer.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GeneratorKind {
    RecursiveBacktracker,
    RandomizedGrowth,
}

impl GeneratorKind {
    pub fn generator<R>(self, rng: R) -> Box<dyn Generator>
        where R: RandomSource + 'static
    {
        match self {
            GeneratorKind::RecursiveBacktracker => Box::new(RecursiveBacktracker::new(rng)),
            GeneratorKind::RandomizedGrowth => Box::new(RandomizedGrowth::new(rng)),
        }
    }
}

type Unvisited = SmallVec<[(Coordinate, CompassPrimary); 4]>;

/// Depth first carving with an explicit stack.
///
/// From the most recently reached cell keep carving into a random unvisited neighbour, backtracking
/// only when there is nowhere left to go. The result has long twisty corridors and few dead ends.
#[derive(Debug)]
pub struct RecursiveBacktracker<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> RecursiveBacktracker<R> {
    pub fn new(rng: R) -> RecursiveBacktracker<R> {
        RecursiveBacktracker { rng }
    }
}

impl<R: RandomSource> Generator for RecursiveBacktracker<R> {
    fn generate(&mut self, grid: &mut Grid) {
        grid.initialise();

        let start = grid.random_cell(&mut self.rng);
        grid[start].visit();
        debug!("recursive backtracker starting at {:?}", start);

        let mut passages = 0;
        let mut stack = Vec::with_capacity(grid.size());
        stack.push(start);

        while let Some(&current) = stack.last() {

            let unvisited: Unvisited = grid.orthogonal_neighbours(current)
                .into_iter()
                .filter(|&(neighbour, _)| !grid[neighbour].is_visited())
                .collect();

            match self.rng.pick(&unvisited) {
                Some(&(next, direction)) => {
                    grid.carve_passage(current, direction);
                    grid[next].visit();
                    stack.push(next);
                    passages += 1;
                }
                None => {
                    // dead end, backtrack
                    let _ = stack.pop();
                }
            }
        }

        debug!("recursive backtracker carved {} passages", passages);
    }
}

/// Randomised Prim's: grow the maze from a random cell by repeatedly carving into a random cell on its
/// frontier.
///
/// Picking from the whole boundary rather than the newest cell gives lots of short branching passages.
#[derive(Debug)]
pub struct RandomizedGrowth<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> RandomizedGrowth<R> {
    pub fn new(rng: R) -> RandomizedGrowth<R> {
        RandomizedGrowth { rng }
    }
}

impl<R: RandomSource> Generator for RandomizedGrowth<R> {
    fn generate(&mut self, grid: &mut Grid) {
        grid.initialise();

        let start = grid.random_cell(&mut self.rng);
        grid[start].visit();
        debug!("randomized growth starting at {:?}", start);

        // The vec gives uniform selection, the set keeps a cell from being queued twice.
        let mut frontier = Vec::new();
        let mut on_frontier = utils::fnv_hashset(grid.size());
        let mut passages = 0;

        extend_frontier(grid, start, &mut frontier, &mut on_frontier);

        while !frontier.is_empty() {
            let frontier_cell = frontier.swap_remove(self.rng.index_below(frontier.len()));
            on_frontier.remove(&frontier_cell);
            if grid[frontier_cell].is_visited() {
                continue;
            }

            let carved: Unvisited = grid.orthogonal_neighbours(frontier_cell)
                .into_iter()
                .filter(|&(neighbour, _)| grid[neighbour].is_visited())
                .collect();
            if let Some(&(_, direction)) = self.rng.pick(&carved) {
                grid.carve_passage(frontier_cell, direction);
                passages += 1;
            }
            grid[frontier_cell].visit();

            extend_frontier(grid, frontier_cell, &mut frontier, &mut on_frontier);
        }

        debug!("randomized growth carved {} passages", passages);
    }
}

fn extend_frontier(grid: &Grid,
                   coord: Coordinate,
                   frontier: &mut Vec<Coordinate>,
                   on_frontier: &mut utils::FnvHashSet<Coordinate>) {
    for (neighbour, _) in grid.orthogonal_neighbours(coord) {
        if !grid[neighbour].is_visited() && on_frontier.insert(neighbour) {
            frontier.push(neighbour);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::ALL_WALLS;
    use crate::units::{Height, Width};

    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use rand::{SeedableRng, XorShiftRng};

    const SEEDS: [[u32; 4]; 3] = [[1, 2, 3, 4], [42, 7, 99, 1000], [0xdead, 0xbeef, 5, 8]];

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(Width(w), Height(h)).expect("valid grid dimensions")
    }

    fn generators(seed: [u32; 4]) -> Vec<Box<dyn Generator>> {
        vec![GeneratorKind::RecursiveBacktracker.generator(XorShiftRng::from_seed(seed)),
             GeneratorKind::RandomizedGrowth.generator(XorShiftRng::from_seed(seed))]
    }

    fn assert_perfect_maze(g: &Grid) {
        let passages = g.passages();
        assert_eq!(passages.len(), g.size() - 1);

        let graph = g.passage_graph();
        assert_eq!(connected_components(&graph), 1);
        assert!(!is_cyclic_undirected(&graph));

        assert!(g.iter().all(|c| g[c].is_visited()));
        assert!(g.iter().all(|c| g[c].walls() & !ALL_WALLS == 0));

        // the outer boundary is never breached
        for coord in g.iter() {
            for dir in CompassPrimary::ALL.iter() {
                if g.neighbour_at_direction(coord, *dir).is_none() {
                    assert!(g[coord].has_wall(*dir));
                }
            }
        }

        // every wall is either open on both sides or closed on both sides
        for coord in g.iter() {
            for (neighbour, dir) in g.orthogonal_neighbours(coord) {
                assert_eq!(g[coord].has_wall(dir), g[neighbour].has_wall(dir.opposite()));
            }
        }
    }

    #[test]
    fn generates_perfect_mazes() {
        for seed in SEEDS.iter() {
            for generator in &mut generators(*seed) {
                for &(w, h) in &[(1, 1), (1, 7), (7, 1), (2, 2), (5, 9), (20, 20), (25, 10)] {
                    let mut g = grid(w, h);
                    generator.generate(&mut g);
                    assert_perfect_maze(&g);
                }
            }
        }
    }

    #[test]
    fn removing_any_passage_splits_the_maze_in_two() {
        for generator in &mut generators([5, 6, 7, 8]) {
            let mut g = grid(6, 5);
            generator.generate(&mut g);

            let passages = g.passages();
            for removed in &passages {
                let mut cut = grid(6, 5);
                for &(a, b) in passages.iter().filter(|&pair| pair != removed) {
                    cut.connect(a, b).expect("passages join neighbours");
                }
                assert_eq!(connected_components(&cut.passage_graph()), 2);
            }
        }
    }

    #[test]
    fn single_cell_grid() {
        for generator in &mut generators([1, 1, 1, 1]) {
            let mut g = grid(1, 1);
            generator.generate(&mut g);
            assert!(g[Coordinate::new(0, 0)].is_visited());
            assert_eq!(g[Coordinate::new(0, 0)].walls(), ALL_WALLS);
        }
    }

    #[test]
    fn regenerating_without_initialising_is_still_perfect() {
        for generator in &mut generators([9, 9, 9, 9]) {
            let mut g = grid(8, 8);
            generator.generate(&mut g);
            generator.generate(&mut g);
            assert_perfect_maze(&g);
        }
    }

    #[test]
    fn deterministic_for_seeded_sources() {
        for seed in SEEDS.iter() {
            let first = generators(*seed)
                .iter_mut()
                .map(|generator| {
                    let mut g = grid(15, 12);
                    generator.generate(&mut g);
                    g
                })
                .collect::<Vec<_>>();
            let second = generators(*seed)
                .iter_mut()
                .map(|generator| {
                    let mut g = grid(15, 12);
                    g.initialise();
                    generator.generate(&mut g);
                    g
                })
                .collect::<Vec<_>>();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn reusing_a_source_keeps_producing_perfect_mazes() {
        let mut backtracker = RecursiveBacktracker::new(rand::weak_rng());
        let mut growth = RandomizedGrowth::new(rand::weak_rng());
        let mut g = grid(12, 9);
        for _ in 0..5 {
            g.initialise();
            backtracker.generate(&mut g);
            assert_perfect_maze(&g);

            g.initialise();
            growth.generate(&mut g);
            assert_perfect_maze(&g);
        }
    }

    #[test]
    fn backtracker_makes_longer_corridors() {
        // Count cells with exactly one opening: the backtracker leaves far fewer dead ends.
        let dead_ends = |g: &Grid| g.iter().filter(|&c| g[c].walls().count_ones() == 3).count();

        let mut backtracked = grid(30, 30);
        RecursiveBacktracker::new(XorShiftRng::from_seed([3, 5, 7, 11])).generate(&mut backtracked);
        let mut grown = grid(30, 30);
        RandomizedGrowth::new(XorShiftRng::from_seed([3, 5, 7, 11])).generate(&mut grown);

        assert!(dead_ends(&backtracked) < dead_ends(&grown));
    }
}
