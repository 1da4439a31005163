use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{neighbor_indices, reconstruct_path};
use crate::cell::Cell;
use crate::grid::Grid;

/// A* with Manhattan distance as heuristic
///
/// Heap entries are ordered by `(f, insertion counter)`, so ties go to the
/// earlier push. A cell may be pushed several times; entries whose cost has
/// since improved are skipped when popped.
pub(super) fn search(grid: &Grid, start: usize, goal: usize) -> Option<Vec<Cell>> {
    let goal_cell = grid.cell_at(goal);
    let heuristic = |index: usize| grid.cell_at(index).manhattan_distance(goal_cell);

    let mut g_score: Vec<Option<u32>> = vec![None; grid.cell_count()];
    let mut came_from: Vec<Option<usize>> = vec![None; grid.cell_count()];
    let mut frontier = BinaryHeap::new();
    let mut counter: u64 = 0;

    g_score[start] = Some(0);
    frontier.push(Reverse((heuristic(start), counter, start)));

    while let Some(Reverse((f, _, current))) = frontier.pop() {
        let Some(g) = g_score[current] else {
            continue;
        };
        if f > g + heuristic(current) {
            continue;
        }
        if current == goal {
            return Some(reconstruct_path(grid, &came_from, goal));
        }

        let tentative = g + 1;
        for neighbor in neighbor_indices(grid, current) {
            if g_score[neighbor].map_or(true, |known| tentative < known) {
                g_score[neighbor] = Some(tentative);
                came_from[neighbor] = Some(current);
                counter += 1;
                frontier.push(Reverse((tentative + heuristic(neighbor), counter, neighbor)));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::search;
    use crate::cell::Cell;
    use crate::grid::Grid;

    #[test]
    fn detour_around_wall() {
        let grid = Grid::from_codes(&[
            vec![0, 0, 0, 0],
            vec![0, 1, 1, 0],
            vec![0, 1, 0, 0],
            vec![0, 0, 0, 1],
        ])
        .unwrap();
        let start = grid.index(Cell::new(2, 2)).unwrap();
        let goal = grid.index(Cell::new(1, 0)).unwrap();
        let path = search(&grid, start, goal).unwrap();
        // (2,2) -> (3,2) -> (3,1) -> (3,0) -> (2,0) -> (1,0)
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], Cell::new(2, 2));
        assert_eq!(path[5], Cell::new(1, 0));
    }

    #[test]
    fn first_node_is_start() {
        let grid = Grid::open(3, 3);
        let path = search(&grid, 4, 4).unwrap();
        assert_eq!(path, vec![Cell::new(1, 1)]);
    }
}
