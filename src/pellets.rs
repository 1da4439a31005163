//! Pellet placement on a playable grid
//!
//! Placers only read the grid. They return a new board of [`Tile`]s where
//! every walkable cell is either left empty or holds a pellet.

use std::collections::HashSet;

use rand::{seq::index, Rng};
use serde::Serialize;
use tracing::debug;

use crate::cell::Cell;
use crate::grid::Grid;

/// Board square, serialized as its integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Tile {
    Path = 0,
    Wall = 1,
    Pellet = 2,
    PowerPellet = 3,
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile as u8
    }
}

/// How ordinary pellets are spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementStrategy {
    /// Uniformly random share of the walkable cells
    Random { density: f64 },
    /// Denser in corridors than at junctions, power pellets in dead ends
    Strategic {
        corridor_density: f64,
        junction_density: f64,
    },
    /// Everywhere except around the power pellets, which sit in corners
    Classic { clearance: u32 },
}

/// Pellet placer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PelletPlacer {
    strategy: PlacementStrategy,
    power_pellets: usize,
}

impl PelletPlacer {
    pub const DEFAULT_POWER_PELLETS: usize = 4;
    pub const DEFAULT_DENSITY: f64 = 0.7;
    pub const DEFAULT_CORRIDOR_DENSITY: f64 = 0.8;
    pub const DEFAULT_JUNCTION_DENSITY: f64 = 0.4;
    pub const DEFAULT_CLEARANCE: u32 = 2;

    pub fn new(strategy: PlacementStrategy) -> Self {
        Self {
            strategy,
            power_pellets: Self::DEFAULT_POWER_PELLETS,
        }
    }

    pub fn random(density: f64) -> Self {
        Self::new(PlacementStrategy::Random { density })
    }

    pub fn strategic(corridor_density: f64, junction_density: f64) -> Self {
        Self::new(PlacementStrategy::Strategic {
            corridor_density,
            junction_density,
        })
    }

    pub fn classic(clearance: u32) -> Self {
        Self::new(PlacementStrategy::Classic { clearance })
    }

    pub fn with_power_pellets(mut self, count: usize) -> Self {
        self.power_pellets = count;
        self
    }

    pub fn strategy(&self) -> PlacementStrategy {
        self.strategy
    }

    /// Board with pellets and power pellets placed on walkable cells
    ///
    /// The classic strategy is deterministic and does not draw from `rng`.
    pub fn place<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Vec<Vec<Tile>> {
        let mut board = Board::new(grid);
        let walkable: Vec<Cell> = grid.walkable_cells().collect();
        if walkable.is_empty() {
            return board.tiles;
        }

        match self.strategy {
            PlacementStrategy::Random { density } => {
                self.place_random(&mut board, &walkable, density, rng)
            }
            PlacementStrategy::Strategic {
                corridor_density,
                junction_density,
            } => self.place_strategic(
                &mut board,
                grid,
                &walkable,
                corridor_density,
                junction_density,
                rng,
            ),
            PlacementStrategy::Classic { clearance } => {
                self.place_classic(&mut board, grid, &walkable, clearance)
            }
        }

        debug!(
            strategy = ?self.strategy,
            walkable = walkable.len(),
            pellets = board.count(Tile::Pellet),
            power_pellets = board.count(Tile::PowerPellet),
            "placed pellets"
        );
        board.tiles
    }

    fn place_random<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        walkable: &[Cell],
        density: f64,
        rng: &mut R,
    ) {
        let power = self.power_pellets.min(walkable.len());
        let pellets = share(walkable.len(), density).min(walkable.len() - power);
        for (n, i) in index::sample(rng, walkable.len(), pellets + power)
            .into_iter()
            .enumerate()
        {
            let tile = if n < power {
                Tile::PowerPellet
            } else {
                Tile::Pellet
            };
            board.set(walkable[i], tile);
        }
    }

    fn place_strategic<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        grid: &Grid,
        walkable: &[Cell],
        corridor_density: f64,
        junction_density: f64,
        rng: &mut R,
    ) {
        let mut dead_ends = Vec::new();
        let mut corridors = Vec::new();
        let mut junctions = Vec::new();
        for &cell in walkable {
            match grid.walkable_neighbors(cell).count() {
                1 => dead_ends.push(cell),
                2 => corridors.push(cell),
                _ => junctions.push(cell),
            }
        }

        let power: HashSet<Cell> = if dead_ends.len() >= self.power_pellets {
            sample(&dead_ends, self.power_pellets, rng)
        } else {
            let corners = l_corners(grid, walkable);
            let missing = (self.power_pellets - dead_ends.len()).min(corners.len());
            dead_ends
                .iter()
                .copied()
                .chain(sample(&corners, missing, rng))
                .collect()
        };
        for &cell in &power {
            board.set(cell, Tile::PowerPellet);
        }

        dead_ends.retain(|cell| !power.contains(cell));
        corridors.retain(|cell| !power.contains(cell));
        junctions.retain(|cell| !power.contains(cell));

        let count = share(corridors.len(), corridor_density);
        for cell in sample(&corridors, count, rng) {
            board.set(cell, Tile::Pellet);
        }
        let count = share(junctions.len(), junction_density);
        for cell in sample(&junctions, count, rng) {
            board.set(cell, Tile::Pellet);
        }
        for &cell in &dead_ends {
            board.set(cell, Tile::Pellet);
        }
    }

    fn place_classic(&self, board: &mut Board, grid: &Grid, walkable: &[Cell], clearance: u32) {
        let (rows, cols) = (grid.rows() as i32, grid.cols() as i32);
        let mut candidates: Vec<Cell> = Vec::new();
        for corner in [
            Cell::new(1, 1),
            Cell::new(1, cols - 2),
            Cell::new(rows - 2, 1),
            Cell::new(rows - 2, cols - 2),
        ] {
            if grid.is_walkable(corner) && !candidates.contains(&corner) {
                candidates.push(corner);
            }
        }
        let dead_ends: Vec<Cell> = walkable
            .iter()
            .copied()
            .filter(|&cell| grid.walkable_neighbors(cell).count() == 1)
            .collect();
        candidates.extend(dead_ends.iter().copied().filter(|cell| {
            cell.row > 2 && cell.row < rows - 3 && cell.col > 2 && cell.col < cols - 3
        }));

        let power = if candidates.len() >= self.power_pellets {
            separated(&candidates, self.power_pellets)
        } else {
            let spare: Vec<Cell> = dead_ends
                .into_iter()
                .filter(|cell| !candidates.contains(cell))
                .collect();
            let mut power = separated(&spare, self.power_pellets - candidates.len());
            power.splice(0..0, candidates);
            power
        };
        for &cell in &power {
            board.set(cell, Tile::PowerPellet);
        }

        for &cell in walkable {
            let cleared = power
                .iter()
                .any(|&pellet| pellet.manhattan_distance(cell) <= clearance);
            if !cleared {
                board.set(cell, Tile::Pellet);
            }
        }
    }
}

struct Board {
    tiles: Vec<Vec<Tile>>,
}

impl Board {
    fn new(grid: &Grid) -> Self {
        let tiles = grid
            .to_codes()
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|code| {
                        if code == Grid::WALL {
                            Tile::Wall
                        } else {
                            Tile::Path
                        }
                    })
                    .collect()
            })
            .collect();
        Self { tiles }
    }

    fn set(&mut self, cell: Cell, tile: Tile) {
        self.tiles[cell.row as usize][cell.col as usize] = tile;
    }

    fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().flatten().filter(|&&t| t == tile).count()
    }
}

/// `floor(len * density)`, with the density clamped to `0..=1`
fn share(len: usize, density: f64) -> usize {
    (len as f64 * density.clamp(0.0, 1.0)).floor() as usize
}

/// `amount` distinct cells drawn at random, clamped to what is available
fn sample<R: Rng + ?Sized>(cells: &[Cell], amount: usize, rng: &mut R) -> HashSet<Cell> {
    index::sample(rng, cells.len(), amount.min(cells.len()))
        .into_iter()
        .map(|i| cells[i])
        .collect()
}

/// Walkable cells whose two open neighbours meet at a right angle
fn l_corners(grid: &Grid, walkable: &[Cell]) -> Vec<Cell> {
    walkable
        .iter()
        .copied()
        .filter(|&cell| {
            let open: Vec<Cell> = grid.walkable_neighbors(cell).collect();
            matches!(open.as_slice(), [a, b] if a.row != b.row && a.col != b.col)
        })
        .collect()
}

/// Greedily pick `count` candidates maximizing the smallest pairwise
/// Manhattan distance, starting from the first one
///
/// Ties go to the earlier candidate.
fn separated(candidates: &[Cell], count: usize) -> Vec<Cell> {
    if candidates.len() <= count {
        return candidates.to_vec();
    }
    let mut selected: Vec<Cell> = candidates.iter().copied().take(1).collect();
    while selected.len() < count {
        let best = candidates
            .iter()
            .copied()
            .filter(|cell| !selected.contains(cell))
            .map(|cell| {
                let nearest = selected
                    .iter()
                    .map(|s| s.manhattan_distance(cell))
                    .min()
                    .unwrap_or(u32::MAX);
                (cell, nearest)
            })
            .fold(None, |best: Option<(Cell, u32)>, (cell, nearest)| match best {
                Some((_, best_nearest)) if best_nearest >= nearest => best,
                _ => Some((cell, nearest)),
            });
        match best {
            Some((cell, _)) => selected.push(cell),
            None => break,
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{l_corners, separated, PelletPlacer, Tile};
    use crate::cell::Cell;
    use crate::grid::Grid;

    fn count(board: &[Vec<Tile>], tile: Tile) -> usize {
        board.iter().flatten().filter(|&&t| t == tile).count()
    }

    fn serpentine() -> Grid {
        Grid::from_codes(&[
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    fn comb() -> Grid {
        Grid::from_codes(&[
            vec![1, 1, 1, 1, 1, 1, 1],
            vec![1, 0, 1, 0, 1, 0, 1],
            vec![1, 0, 0, 0, 0, 0, 1],
            vec![1, 1, 1, 1, 1, 1, 1],
        ])
        .unwrap()
    }

    #[test]
    fn random_counts() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = Grid::open(5, 5);
        let board = PelletPlacer::random(0.5).place(&grid, &mut rng);
        assert_eq!(count(&board, Tile::PowerPellet), 4);
        assert_eq!(count(&board, Tile::Pellet), 12);
        assert_eq!(count(&board, Tile::Path), 9);

        // Full density leaves room for the power pellets
        let board = PelletPlacer::random(3.0).place(&grid, &mut rng);
        assert_eq!(count(&board, Tile::PowerPellet), 4);
        assert_eq!(count(&board, Tile::Pellet), 21);
    }

    #[test]
    fn random_never_covers_walls() {
        let mut rng = StdRng::seed_from_u64(6);
        let grid = serpentine();
        let board = PelletPlacer::random(1.0)
            .with_power_pellets(2)
            .place(&grid, &mut rng);
        for row in [1, 3] {
            assert_eq!(&board[row][1..4], &[Tile::Wall; 3]);
        }
        assert_eq!(count(&board, Tile::PowerPellet), 2);
        assert_eq!(count(&board, Tile::Pellet), 17);
    }

    #[test]
    fn more_power_pellets_than_cells() {
        let mut rng = StdRng::seed_from_u64(6);
        let grid = Grid::from_codes(&[vec![0, 1, 0]]).unwrap();
        let board = PelletPlacer::random(1.0)
            .with_power_pellets(5)
            .place(&grid, &mut rng);
        assert_eq!(board, vec![vec![Tile::PowerPellet, Tile::Wall, Tile::PowerPellet]]);
    }

    #[test]
    fn strategic_uses_corners_without_dead_ends() {
        let mut rng = StdRng::seed_from_u64(8);
        let board = PelletPlacer::strategic(0.8, 0.4).place(&serpentine(), &mut rng);
        for (row, col) in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            assert_eq!(board[row][col], Tile::PowerPellet);
        }
        // 13 corridor cells left, none of the 2 junctions
        assert_eq!(count(&board, Tile::Pellet), 10);
        assert_eq!(board[2][0], Tile::Path);
        assert_eq!(board[2][4], Tile::Path);
    }

    #[test]
    fn strategic_prefers_dead_ends() {
        let mut rng = StdRng::seed_from_u64(8);
        let board = PelletPlacer::strategic(0.8, 0.4)
            .with_power_pellets(2)
            .place(&comb(), &mut rng);
        let dead_ends = [board[1][1], board[1][3], board[1][5]];
        assert_eq!(dead_ends.iter().filter(|&&t| t == Tile::PowerPellet).count(), 2);
        assert_eq!(dead_ends.iter().filter(|&&t| t == Tile::Pellet).count(), 1);
        // 3 of the 4 corridor cells, the junction stays empty
        assert_eq!(count(&board, Tile::Pellet), 4);
        assert_eq!(board[2][3], Tile::Path);
    }

    #[test]
    fn classic_clears_around_corners() {
        let mut rng = StdRng::seed_from_u64(0);
        let board = PelletPlacer::classic(2).place(&Grid::open(9, 9), &mut rng);
        for (row, col) in [(1, 1), (1, 7), (7, 1), (7, 7)] {
            assert_eq!(board[row][col], Tile::PowerPellet);
        }
        assert_eq!(count(&board, Tile::PowerPellet), 4);
        assert_eq!(count(&board, Tile::Path), 40);
        assert_eq!(count(&board, Tile::Pellet), 37);
        assert_eq!(board[4][4], Tile::Pellet);
        assert_eq!(board[0][2], Tile::Path);
    }

    #[test]
    fn classic_is_deterministic() {
        let grid = comb();
        let first = PelletPlacer::classic(1).place(&grid, &mut StdRng::seed_from_u64(1));
        let second = PelletPlacer::classic(1).place(&grid, &mut StdRng::seed_from_u64(2));
        assert_eq!(first, second);
    }

    #[test]
    fn corners_are_l_shaped() {
        let grid = comb();
        let walkable: Vec<Cell> = grid.walkable_cells().collect();
        assert_eq!(l_corners(&grid, &walkable), vec![Cell::new(2, 1), Cell::new(2, 5)]);
    }

    #[test]
    fn separated_picks_far_apart() {
        let candidates = [
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(9, 9),
            Cell::new(5, 5),
            Cell::new(0, 9),
        ];
        assert_eq!(
            separated(&candidates, 3),
            vec![Cell::new(0, 0), Cell::new(9, 9), Cell::new(0, 9)]
        );
        assert_eq!(separated(&candidates[..2], 3).len(), 2);
    }

    #[test]
    fn tiles_serialize_as_codes() {
        let board = vec![vec![Tile::Path, Tile::Wall, Tile::Pellet, Tile::PowerPellet]];
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[0,1,2,3]]");
    }
}
