//! Recursive backtracker, run on an explicit stack

use rand::{seq::SliceRandom, Rng};

use super::{InternalMaze, Wall};

/// Random depth-first walk, backing up whenever it gets stuck
pub(super) fn carve<R: Rng + ?Sized>(maze: &mut InternalMaze, rng: &mut R) -> Vec<Wall> {
    let (width, height) = (maze.width(), maze.height());
    let mut visited = vec![vec![false; width]; height];

    let start = (rng.gen_range(0..height), rng.gen_range(0..width));
    visited[start.0][start.1] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited: Vec<_> = maze
            .adjacent(current)
            .into_iter()
            .filter(|&(y, x)| !visited[y][x])
            .collect();

        match unvisited.choose(rng) {
            Some(&next) => {
                maze.remove_wall(Wall::between(current, next));
                visited[next.0][next.1] = true;
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
    Vec::new()
}
