//! Playable walkability grid
//!
//! The grid is built once, either from an integer matrix (`1` = wall) or by
//! rasterizing an [`InternalMaze`], and is only read afterwards: the path
//! search, the ghosts and the pellet placers all borrow it.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::MazeError;
use crate::imperfecteur::Tunnels;
use crate::maze_generator::{InternalMaze, Wall};

/// Rectangular walkability matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    walkable: Vec<bool>,
}

impl Grid {
    pub const PATH: u8 = 0;
    pub const WALL: u8 = 1;

    const S_VALID: char = '🟩';
    const S_WALL: char = '🟫';

    /// Grid without any walls
    pub fn open(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            walkable: vec![true; rows * cols],
        }
    }

    /// Parse an integer matrix
    ///
    /// `1` is a wall; every other code (empty path, pellets) is walkable.
    /// Returns error, if the matrix is empty or its rows differ in length.
    pub fn from_codes(codes: &[Vec<u8>]) -> Result<Self, MazeError> {
        let cols = codes.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(MazeError::EmptyGrid);
        }
        let mut walkable = Vec::with_capacity(codes.len() * cols);
        for (row, line) in codes.iter().enumerate() {
            if line.len() != cols {
                return Err(MazeError::RaggedGrid {
                    row,
                    expected: cols,
                    actual: line.len(),
                });
            }
            walkable.extend(line.iter().map(|&code| code != Self::WALL));
        }
        Ok(Self {
            rows: codes.len(),
            cols,
            walkable,
        })
    }

    /// Rasterize a maze into a `(2 * height + 1) × (2 * width + 1)` grid
    ///
    /// Logical cell `(y, x)` lands on `(2y + 1, 2x + 1)`, carved walls between
    /// cells become path, and the border is opened at both ends of every
    /// tunnel row and column. Tunnel indices outside the maze are ignored.
    pub fn rasterize(maze: &InternalMaze, tunnels: &Tunnels) -> Self {
        let (width, height) = (maze.width(), maze.height());
        let mut grid = Self {
            rows: 2 * height + 1,
            cols: 2 * width + 1,
            walkable: vec![false; (2 * height + 1) * (2 * width + 1)],
        };

        for y in 0..height {
            for x in 0..width {
                let (row, col) = (2 * y + 1, 2 * x + 1);
                grid.open_at(row, col);
                if x + 1 < width && !maze.has_wall(Wall::horizontal(y, x)) {
                    grid.open_at(row, col + 1);
                }
                if y + 1 < height && !maze.has_wall(Wall::vertical(y, x)) {
                    grid.open_at(row + 1, col);
                }
            }
        }

        for &y in tunnels.horizontal.iter().filter(|&&y| y < height) {
            grid.open_at(2 * y + 1, 0);
            grid.open_at(2 * y + 1, grid.cols - 1);
        }
        for &x in tunnels.vertical.iter().filter(|&&x| x < width) {
            grid.open_at(0, 2 * x + 1);
            grid.open_at(grid.rows - 1, 2 * x + 1);
        }
        grid
    }

    fn open_at(&mut self, row: usize, col: usize) {
        self.walkable[row * self.cols + col] = true;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.walkable.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// Flat index of an in-bounds cell
    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    /// In bounds and not a wall
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.walkable[i])
    }

    /// Nearest in-bounds cell
    pub fn clamp(&self, cell: Cell) -> Cell {
        let max_row = self.rows as i32 - 1;
        let max_col = self.cols as i32 - 1;
        Cell::new(cell.row.min(max_row).max(0), cell.col.min(max_col).max(0))
    }

    /// Walkable orthogonal neighbours: up, down, left, right
    pub fn walkable_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors()
            .into_iter()
            .filter(move |&neighbor| self.is_walkable(neighbor))
    }

    /// All walkable cells in row-major order
    pub fn walkable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.walkable
            .iter()
            .enumerate()
            .filter(|(_, &walkable)| walkable)
            .map(|(i, _)| self.cell_at(i))
    }

    /// Integer matrix, `0` = path and `1` = wall
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.walkable
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|&walkable| if walkable { Self::PATH } else { Self::WALL })
                    .collect()
            })
            .collect()
    }

    /// Emoji picture of the grid, with `overlays` drawn on top
    ///
    /// Overlays outside the grid are skipped; later ones win.
    pub fn render(&self, overlays: &[(Cell, char)]) -> String {
        let mut squares: Vec<Vec<char>> = self
            .walkable
            .chunks(self.cols)
            .map(|row| {
                row.iter()
                    .map(|&walkable| if walkable { Self::S_VALID } else { Self::S_WALL })
                    .collect()
            })
            .collect();
        for &(cell, symbol) in overlays {
            if let Some(i) = self.index(cell) {
                squares[i / self.cols][i % self.cols] = symbol;
            }
        }
        squares.iter().map(|row| row.iter().join("")).join("\n")
    }
}

impl From<Grid> for Vec<Vec<u8>> {
    fn from(grid: Grid) -> Self {
        grid.to_codes()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Grid {
    type Error = MazeError;

    fn try_from(codes: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_codes(&codes)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::cell::Cell;
    use crate::error::MazeError;
    use crate::imperfecteur::Tunnels;
    use crate::maze_generator::{InternalMaze, Wall};

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

    #[test]
    fn parse_codes() {
        let grid = serpentine();
        assert_eq!((grid.rows(), grid.cols()), (5, 5));
        assert!(grid.is_walkable(Cell::new(0, 0)));
        assert!(!grid.is_walkable(Cell::new(1, 1)));
        assert!(!grid.is_walkable(Cell::new(-1, 0)));
        assert!(!grid.is_walkable(Cell::new(0, 5)));
        assert_eq!(grid.walkable_cells().count(), 19);
        assert_eq!(grid.to_codes()[3], vec![0, 1, 1, 1, 0]);
    }

    #[test]
    fn pellet_codes_are_walkable() {
        let grid = Grid::from_codes(&[vec![2, 1, 3]]).unwrap();
        assert!(grid.is_walkable(Cell::new(0, 0)));
        assert!(!grid.is_walkable(Cell::new(0, 1)));
        assert!(grid.is_walkable(Cell::new(0, 2)));
    }

    #[test]
    fn malformed_codes_are_rejected() {
        assert_eq!(Grid::from_codes(&[]), Err(MazeError::EmptyGrid));
        assert_eq!(Grid::from_codes(&[vec![]]), Err(MazeError::EmptyGrid));
        assert_eq!(
            Grid::from_codes(&[vec![0, 0], vec![0]]),
            Err(MazeError::RaggedGrid {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
        assert!(serde_json::from_str::<Grid>("[[0, 1], [1]]").is_err());
    }

    #[test]
    fn json_round_trip_keeps_codes() {
        let grid = serpentine();
        let json = serde_json::to_string(&grid).unwrap();
        assert!(json.starts_with("[[0,0,0,0,0],[0,1,1,1,0]"));
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }

    #[test]
    fn neighbors_skip_walls_and_borders() {
        let grid = serpentine();
        let neighbors: Vec<_> = grid.walkable_neighbors(Cell::new(0, 0)).collect();
        assert_eq!(neighbors, vec![Cell::new(1, 0), Cell::new(0, 1)]);
        let neighbors: Vec<_> = grid.walkable_neighbors(Cell::new(2, 2)).collect();
        assert_eq!(neighbors, vec![Cell::new(2, 1), Cell::new(2, 3)]);
    }

    #[test]
    fn clamp_to_bounds() {
        let grid = Grid::open(5, 5);
        assert_eq!(grid.clamp(Cell::new(2, 6)), Cell::new(2, 4));
        assert_eq!(grid.clamp(Cell::new(-3, 9)), Cell::new(0, 4));
        assert_eq!(grid.clamp(Cell::new(3, 1)), Cell::new(3, 1));
    }

    #[test]
    fn rasterize_opens_cells_passages_and_tunnels() {
        let mut maze = InternalMaze::new(3, 3);
        maze.remove_wall(Wall::horizontal(0, 0));
        maze.remove_wall(Wall::vertical(0, 1));
        let tunnels = Tunnels {
            horizontal: [1].into(),
            vertical: [2, 7].into(),
        };
        let grid = Grid::rasterize(&maze, &tunnels);

        assert_eq!((grid.rows(), grid.cols()), (7, 7));
        for y in 0..3 {
            for x in 0..3 {
                assert!(grid.is_walkable(Cell::new(2 * y + 1, 2 * x + 1)));
            }
        }
        // Carved passages
        assert!(grid.is_walkable(Cell::new(1, 2)));
        assert!(grid.is_walkable(Cell::new(2, 3)));
        // Standing walls
        assert!(!grid.is_walkable(Cell::new(1, 4)));
        assert!(!grid.is_walkable(Cell::new(2, 1)));
        // Tunnel row 1 and column 2; column 7 is outside the maze
        assert!(grid.is_walkable(Cell::new(3, 0)));
        assert!(grid.is_walkable(Cell::new(3, 6)));
        assert!(grid.is_walkable(Cell::new(0, 5)));
        assert!(grid.is_walkable(Cell::new(6, 5)));
        assert!(!grid.is_walkable(Cell::new(0, 1)));
        assert_eq!(grid.walkable_cells().count(), 9 + 2 + 4);
    }

    #[test]
    fn render_with_overlays() {
        let grid = Grid::from_codes(&[vec![0, 1], vec![0, 0]]).unwrap();
        assert_eq!(grid.to_string(), "🟩🟫\n🟩🟩");
        let rendered = grid.render(&[(Cell::new(1, 1), '🏃'), (Cell::new(5, 5), '👻')]);
        assert_eq!(rendered, "🟩🟫\n🟩🏃");
    }
}
