//! Shortest paths on a [`Grid`]
//!
//! Both engines move in four directions at unit cost, so they agree on path
//! lengths. Endpoints that are walls, outside the grid or cut off from each
//! other give `None`; a query never fails.

mod astar;
mod bfs;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cell::Cell;
use crate::grid::Grid;

/// Path search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchAlgorithm {
    /// Best-first search guided by Manhattan distance
    #[default]
    AStar,
    /// Breadth-first flood
    Bfs,
}

/// Path queries against one grid
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'g> {
    grid: &'g Grid,
    algorithm: SearchAlgorithm,
}

impl<'g> PathFinder<'g> {
    pub fn new(grid: &'g Grid, algorithm: SearchAlgorithm) -> Self {
        Self { grid, algorithm }
    }

    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    /// Shortest path from `start` to `goal`, both ends included
    ///
    /// # Examples
    /// ```
    /// use pacman_lab::{Grid, PathFinder, SearchAlgorithm};
    ///
    /// let grid = Grid::from_codes(&[vec![0, 0, 0], vec![1, 1, 0], vec![0, 0, 0]]).unwrap();
    /// let finder = PathFinder::new(&grid, SearchAlgorithm::AStar);
    /// let path = finder.find_path((0, 0), (2, 0)).unwrap();
    /// assert_eq!(path.len(), 7);
    /// assert!(finder.find_path((0, 0), (1, 1)).is_none());
    /// ```
    pub fn find_path(&self, start: impl Into<Cell>, goal: impl Into<Cell>) -> Option<Vec<Cell>> {
        let (start, goal) = (start.into(), goal.into());
        let start_idx = self.walkable_index(start)?;
        let goal_idx = self.walkable_index(goal)?;

        let path = match self.algorithm {
            SearchAlgorithm::AStar => astar::search(self.grid, start_idx, goal_idx),
            SearchAlgorithm::Bfs => bfs::search(self.grid, start_idx, goal_idx),
        };
        trace!(
            algorithm = ?self.algorithm,
            ?start,
            ?goal,
            length = path.as_ref().map(Vec::len),
            "path query"
        );
        path
    }

    /// Second cell of the shortest path
    ///
    /// `None` when the goal is unreachable or already reached.
    pub fn find_next_move(&self, start: impl Into<Cell>, goal: impl Into<Cell>) -> Option<Cell> {
        self.find_path(start, goal)?.get(1).copied()
    }

    fn walkable_index(&self, cell: Cell) -> Option<usize> {
        self.grid.index(cell).filter(|_| self.grid.is_walkable(cell))
    }
}

/// Walk the predecessor links back from `goal` and return the path in
/// start-to-goal order
fn reconstruct_path(grid: &Grid, came_from: &[Option<usize>], goal: usize) -> Vec<Cell> {
    let mut path = vec![grid.cell_at(goal)];
    let mut current = goal;
    while let Some(previous) = came_from[current] {
        path.push(grid.cell_at(previous));
        current = previous;
    }
    path.reverse();
    path
}

/// Flat indices of the walkable neighbours of `index`: up, down, left, right
fn neighbor_indices(grid: &Grid, index: usize) -> impl Iterator<Item = usize> + '_ {
    grid.walkable_neighbors(grid.cell_at(index))
        .filter_map(move |cell| grid.index(cell))
}
