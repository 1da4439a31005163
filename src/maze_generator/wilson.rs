//! Wilson's algorithm: loop-erased random walks into the growing maze

use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};

use super::{InternalMaze, MazeCell, Wall};

/// Attach cells to the maze one loop-erased walk at a time
///
/// Every spanning tree of the lattice is equally likely.
pub(super) fn carve<R: Rng + ?Sized>(maze: &mut InternalMaze, rng: &mut R) -> Vec<Wall> {
    let (width, height) = (maze.width(), maze.height());
    let mut in_maze = vec![vec![false; width]; height];
    let mut joined = 1;
    in_maze[rng.gen_range(0..height)][rng.gen_range(0..width)] = true;

    while joined < width * height {
        let outside: Vec<MazeCell> = (0..height)
            .flat_map(|y| (0..width).map(move |x| (y, x)))
            .filter(|&(y, x)| !in_maze[y][x])
            .collect();
        let Some(&start) = outside.choose(rng) else {
            break;
        };

        let path = loop_erased_walk(maze, start, &in_maze, rng);
        for step in path.windows(2) {
            maze.remove_wall(Wall::between(step[0], step[1]));
        }
        // The last cell of the walk was already part of the maze
        for &(y, x) in &path[..path.len() - 1] {
            in_maze[y][x] = true;
            joined += 1;
        }
    }
    Vec::new()
}

/// Walk randomly from `start` until hitting the maze, erasing loops as they
/// form
///
/// The returned path ends at the first maze cell reached.
fn loop_erased_walk<R: Rng + ?Sized>(
    maze: &InternalMaze,
    start: MazeCell,
    in_maze: &[Vec<bool>],
    rng: &mut R,
) -> Vec<MazeCell> {
    let mut path = vec![start];
    let mut index_on_path = HashMap::from([(start, 0)]);
    let mut current = start;

    while !in_maze[current.0][current.1] {
        let Some(&next) = maze.adjacent(current).choose(rng) else {
            break;
        };
        if let Some(&index) = index_on_path.get(&next) {
            for erased in path.drain(index + 1..) {
                index_on_path.remove(&erased);
            }
        } else {
            index_on_path.insert(next, path.len());
            path.push(next);
        }
        current = next;
    }
    path
}
