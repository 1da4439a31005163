//! Randomized Prim's algorithm: growth from a frontier of boundary walls

use rand::Rng;

use super::{InternalMaze, MazeCell, Wall};

/// Grow the maze from a random cell until every cell is reached
///
/// A wall may sit in the frontier more than once (it is pushed by both of
/// its cells); stale copies are skipped when drawn. Nothing is recorded
/// here: the caller sweeps the standing walls afterwards.
pub(super) fn carve<R: Rng + ?Sized>(maze: &mut InternalMaze, rng: &mut R) -> Vec<Wall> {
    let (width, height) = (maze.width(), maze.height());
    let mut visited = vec![vec![false; width]; height];
    let mut frontier = Vec::new();

    let start = (rng.gen_range(0..height), rng.gen_range(0..width));
    visited[start.0][start.1] = true;
    push_boundary(start, width, height, &mut frontier);

    while !frontier.is_empty() {
        let wall = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        let (a, b) = wall.cells();
        let joined = match (visited[a.0][a.1], visited[b.0][b.1]) {
            (true, false) => b,
            (false, true) => a,
            _ => continue,
        };
        maze.remove_wall(wall);
        visited[joined.0][joined.1] = true;
        push_boundary(joined, width, height, &mut frontier);
    }
    Vec::new()
}

/// Push the walls on the east, south, west and north of a cell
fn push_boundary((y, x): MazeCell, width: usize, height: usize, frontier: &mut Vec<Wall>) {
    if x + 1 < width {
        frontier.push(Wall::horizontal(y, x));
    }
    if y + 1 < height {
        frontier.push(Wall::vertical(y, x));
    }
    if x > 0 {
        frontier.push(Wall::horizontal(y, x - 1));
    }
    if y > 0 {
        frontier.push(Wall::vertical(y - 1, x));
    }
}

#[cfg(test)]
mod tests {
    use super::push_boundary;
    use crate::maze_generator::Wall;

    #[test]
    fn corner_cell_has_two_boundary_walls() {
        let mut frontier = Vec::new();
        push_boundary((0, 0), 5, 5, &mut frontier);
        assert_eq!(frontier, vec![Wall::horizontal(0, 0), Wall::vertical(0, 0)]);

        frontier.clear();
        push_boundary((4, 4), 5, 5, &mut frontier);
        assert_eq!(frontier, vec![Wall::horizontal(4, 3), Wall::vertical(3, 4)]);
    }

    #[test]
    fn inner_cell_has_four_boundary_walls() {
        let mut frontier = Vec::new();
        push_boundary((2, 2), 5, 5, &mut frontier);
        assert_eq!(frontier.len(), 4);
        assert!(frontier.iter().all(|wall| {
            let (a, b) = wall.cells();
            a == (2, 2) || b == (2, 2)
        }));
    }
}
