//! Perfect maze generation
//!
//! Mazes are carved on a `width × height` lattice of logical cells. The
//! [`InternalMaze`] records which walls between neighbouring cells are still
//! standing; every algorithm starts with all walls present and removes
//! exactly `width * height - 1` of them, leaving a spanning tree.

mod backtracker;
mod kruskal;
mod prim;
mod wilson;

use std::collections::HashSet;

use clap::ValueEnum;
use itertools::iproduct;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use tracing::debug;

use crate::error::MazeError;
use crate::grid::Grid;
use crate::imperfecteur::{self, Tunnels};

pub const MIN_DIMENSION: usize = 3;
pub const MAX_DIMENSION: usize = 50;

/// Logical maze cell `(y, x)`
pub type MazeCell = (usize, usize);

/// Which neighbour a [`Wall`] separates its cell from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Between `(row, col)` and `(row, col + 1)`
    Horizontal,
    /// Between `(row, col)` and `(row + 1, col)`
    Vertical,
}

/// Removable edge between two neighbouring cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wall {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

/// Wall layout of a maze, at double vertical resolution
///
/// Row `2y` holds the `width - 1` horizontal-orientation walls of cell row
/// `y`, row `2y + 1` the `width` vertical-orientation walls below it; `true`
/// means the wall is standing. There are `2 * height - 1` rows in total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternalMaze {
    width: usize,
    height: usize,
    rows: Vec<Vec<bool>>,
}

/// Spanning tree algorithm used to carve a perfect maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorAlgorithm {
    /// Random edge order, joined with union-find
    #[default]
    Kruskal,
    /// Growth from a random frontier
    Prim,
    /// Randomized depth-first search
    #[value(alias = "recursive_backtracker")]
    RecursiveBacktracker,
    /// Loop-erased random walks, uniform over all spanning trees
    Wilson,
}

/// Parameters for [`MazeGenerator::build`]
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub algorithm: GeneratorAlgorithm,
    /// Share of the remaining walls to knock down, 0-1 or 0-100
    pub imperfection: f64,
    pub tunnels_h: usize,
    pub tunnels_v: usize,
}

/// Playable maze produced by [`MazeGenerator::build`]
#[derive(Debug, Clone)]
pub struct BuiltMaze {
    pub maze: InternalMaze,
    pub grid: Grid,
    pub tunnels: Tunnels,
}

/// Maze generator owning its source of randomness
pub struct MazeGenerator {
    random: StdRng,
}

impl Wall {
    pub const fn horizontal(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            orientation: Orientation::Horizontal,
        }
    }

    pub const fn vertical(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            orientation: Orientation::Vertical,
        }
    }

    /// Wall separating two adjacent cells, given in either order
    pub fn between(a: MazeCell, b: MazeCell) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        if first.0 == second.0 {
            Self::horizontal(first.0, first.1)
        } else {
            Self::vertical(first.0, first.1)
        }
    }

    /// The two cells on either side
    pub const fn cells(self) -> (MazeCell, MazeCell) {
        match self.orientation {
            Orientation::Horizontal => ((self.row, self.col), (self.row, self.col + 1)),
            Orientation::Vertical => ((self.row, self.col), (self.row + 1, self.col)),
        }
    }
}

impl InternalMaze {
    /// Maze with every wall standing
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..(2 * height).saturating_sub(1))
            .map(|y| {
                let len = if y % 2 == 0 { width.saturating_sub(1) } else { width };
                vec![true; len]
            })
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw wall flags, see the type documentation for the layout
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    const fn slot(wall: Wall) -> (usize, usize) {
        match wall.orientation {
            Orientation::Horizontal => (2 * wall.row, wall.col),
            Orientation::Vertical => (2 * wall.row + 1, wall.col),
        }
    }

    pub fn has_wall(&self, wall: Wall) -> bool {
        let (y, x) = Self::slot(wall);
        self.rows[y][x]
    }

    pub fn remove_wall(&mut self, wall: Wall) {
        let (y, x) = Self::slot(wall);
        self.rows[y][x] = false;
    }

    /// Every candidate edge of the lattice, standing or not
    pub fn walls(&self) -> impl Iterator<Item = Wall> {
        let (width, height) = (self.width, self.height);
        iproduct!(0..height, 0..width).flat_map(move |(y, x)| {
            let horizontal = (x + 1 < width).then(|| Wall::horizontal(y, x));
            let vertical = (y + 1 < height).then(|| Wall::vertical(y, x));
            horizontal.into_iter().chain(vertical)
        })
    }

    /// Whether a passage connects two adjacent cells
    pub fn is_open_between(&self, a: MazeCell, b: MazeCell) -> bool {
        a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1 && !self.has_wall(Wall::between(a, b))
    }

    /// Number of walls knocked down so far
    pub fn carved_edge_count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&wall| !wall).count()
    }

    /// Lattice neighbours of a cell in north, south, west, east order,
    /// regardless of walls
    pub fn adjacent(&self, (y, x): MazeCell) -> Vec<MazeCell> {
        let mut neighbors = Vec::with_capacity(4);
        if y > 0 {
            neighbors.push((y - 1, x));
        }
        if y + 1 < self.height {
            neighbors.push((y + 1, x));
        }
        if x > 0 {
            neighbors.push((y, x - 1));
        }
        if x + 1 < self.width {
            neighbors.push((y, x + 1));
        }
        neighbors
    }

    /// Graph of carved passages
    ///
    /// Node `y * width + x` has the weight `(y, x)`.
    pub fn to_graph(&self) -> UnGraph<MazeCell, ()> {
        let mut graph = UnGraph::with_capacity(self.width * self.height, self.carved_edge_count());
        for cell in iproduct!(0..self.height, 0..self.width) {
            graph.add_node(cell);
        }
        for wall in self.walls().filter(|wall| !self.has_wall(*wall)) {
            let (a, b) = wall.cells();
            graph.add_edge(
                NodeIndex::new(a.0 * self.width + a.1),
                NodeIndex::new(b.0 * self.width + b.1),
                (),
            );
        }
        graph
    }

    pub fn is_connected(&self) -> bool {
        connected_components(&self.to_graph()) == 1
    }

    /// Number of independent loops, zero for a perfect maze
    pub fn cycle_rank(&self) -> usize {
        let graph = self.to_graph();
        (graph.edge_count() + connected_components(&graph)).saturating_sub(graph.node_count())
    }

    /// Connected and acyclic: exactly one route between any two cells
    pub fn is_perfect(&self) -> bool {
        self.carved_edge_count() + 1 == self.width * self.height && self.is_connected()
    }
}

impl GeneratorAlgorithm {
    pub const ALL: [GeneratorAlgorithm; 4] = [
        GeneratorAlgorithm::Kruskal,
        GeneratorAlgorithm::Prim,
        GeneratorAlgorithm::RecursiveBacktracker,
        GeneratorAlgorithm::Wilson,
    ];

    /// Carve a perfect maze
    ///
    /// Returns the maze and the walls left out of the spanning tree, each
    /// listed once.
    pub fn generate<R: Rng + ?Sized>(
        self,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Result<(InternalMaze, Vec<Wall>), MazeError> {
        validate_dimensions(width, height)?;

        let mut maze = InternalMaze::new(width, height);
        let mut remaining_walls = match self {
            GeneratorAlgorithm::Kruskal => kruskal::carve(&mut maze, rng),
            GeneratorAlgorithm::Prim => prim::carve(&mut maze, rng),
            GeneratorAlgorithm::RecursiveBacktracker => backtracker::carve(&mut maze, rng),
            GeneratorAlgorithm::Wilson => wilson::carve(&mut maze, rng),
        };
        sweep_remaining_walls(&maze, &mut remaining_walls);

        debug!(
            algorithm = ?self,
            width,
            height,
            carved = maze.carved_edge_count(),
            remaining = remaining_walls.len(),
            "generated perfect maze"
        );
        Ok((maze, remaining_walls))
    }
}

/// Check that both sides are within `MIN_DIMENSION..=MAX_DIMENSION`
pub fn validate_dimensions(width: usize, height: usize) -> Result<(), MazeError> {
    for (axis, value) in [("width", width), ("height", height)] {
        if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&value) {
            return Err(MazeError::InvalidDimension { axis, value });
        }
    }
    Ok(())
}

/// Add every standing wall that is not yet listed
fn sweep_remaining_walls(maze: &InternalMaze, remaining_walls: &mut Vec<Wall>) {
    let recorded: HashSet<Wall> = remaining_walls.iter().copied().collect();
    remaining_walls.extend(
        maze.walls()
            .filter(|wall| maze.has_wall(*wall) && !recorded.contains(wall)),
    );
}

impl MazeGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    /// Random source, for other randomized steps of the same session
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.random
    }

    pub fn generate(
        &mut self,
        algorithm: GeneratorAlgorithm,
        width: usize,
        height: usize,
    ) -> Result<(InternalMaze, Vec<Wall>), MazeError> {
        algorithm.generate(width, height, &mut self.random)
    }

    pub fn make_imperfect(
        &mut self,
        maze: InternalMaze,
        remaining_walls: &[Wall],
        level: f64,
        tunnels_h: usize,
        tunnels_v: usize,
    ) -> (InternalMaze, Tunnels) {
        imperfecteur::make_imperfect(
            maze,
            remaining_walls,
            level,
            tunnels_h,
            tunnels_v,
            &mut self.random,
        )
    }

    /// Generate, add loops and tunnels, and rasterize into a playable grid
    pub fn build(&mut self, config: &MazeConfig) -> Result<BuiltMaze, MazeError> {
        let (maze, remaining_walls) = self.generate(config.algorithm, config.width, config.height)?;
        let (maze, tunnels) = self.make_imperfect(
            maze,
            &remaining_walls,
            config.imperfection,
            config.tunnels_h,
            config.tunnels_v,
        );
        let grid = Grid::rasterize(&maze, &tunnels);
        Ok(BuiltMaze {
            maze,
            grid,
            tunnels,
        })
    }
}
