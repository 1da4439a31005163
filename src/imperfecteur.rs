//! Turning perfect mazes into imperfect ones
//!
//! Extra walls are knocked down to introduce loops, and rows and columns are
//! picked for wraparound tunnels. Walls are only ever removed, so a connected
//! maze stays connected.

use std::collections::BTreeSet;

use rand::{seq::index, Rng};
use serde::Serialize;
use tracing::debug;

use crate::maze_generator::{InternalMaze, Wall};

/// Rows and columns whose border cells open onto the opposite side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tunnels {
    /// Cell rows wrapping left to right
    pub horizontal: BTreeSet<usize>,
    /// Cell columns wrapping top to bottom
    pub vertical: BTreeSet<usize>,
}

/// Knock down a share of `remaining_walls` and pick tunnel rows and columns
///
/// `level` is a fraction in `0..=1`, or a percentage when larger than 1. At
/// least one wall is removed whenever `level > 0` and any wall remains.
/// Requests beyond what is available are clamped.
pub fn make_imperfect<R: Rng + ?Sized>(
    mut maze: InternalMaze,
    remaining_walls: &[Wall],
    level: f64,
    tunnels_h: usize,
    tunnels_v: usize,
    rng: &mut R,
) -> (InternalMaze, Tunnels) {
    let removed = walls_to_remove(remaining_walls.len(), level);
    for i in index::sample(rng, remaining_walls.len(), removed) {
        maze.remove_wall(remaining_walls[i]);
    }

    let tunnels = Tunnels {
        horizontal: pick_lines(maze.height(), tunnels_h, rng),
        vertical: pick_lines(maze.width(), tunnels_v, rng),
    };
    debug!(
        removed,
        available = remaining_walls.len(),
        ?tunnels,
        "made maze imperfect"
    );
    (maze, tunnels)
}

/// Imperfection level as a fraction
pub fn normalize_level(level: f64) -> f64 {
    if level > 1.0 {
        level / 100.0
    } else {
        level
    }
}

fn walls_to_remove(available: usize, level: f64) -> usize {
    let level = normalize_level(level);
    let share = (available as f64 * level).floor();
    let mut count = if share > 0.0 { share as usize } else { 0 };
    if level > 0.0 && count == 0 && available > 0 {
        count = 1;
    }
    count.min(available)
}

/// `requested` distinct indices below `available`
fn pick_lines<R: Rng + ?Sized>(available: usize, requested: usize, rng: &mut R) -> BTreeSet<usize> {
    index::sample(rng, available, requested.min(available))
        .into_iter()
        .collect()
}
