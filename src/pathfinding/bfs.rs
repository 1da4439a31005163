use std::collections::VecDeque;

use super::{neighbor_indices, reconstruct_path};
use crate::cell::Cell;
use crate::grid::Grid;

/// Breadth-first search, cells are marked when enqueued
pub(super) fn search(grid: &Grid, start: usize, goal: usize) -> Option<Vec<Cell>> {
    let mut seen = vec![false; grid.cell_count()];
    let mut came_from: Vec<Option<usize>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(reconstruct_path(grid, &came_from, goal));
        }
        for neighbor in neighbor_indices(grid, current) {
            if !seen[neighbor] {
                seen[neighbor] = true;
                came_from[neighbor] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }
    None
}
