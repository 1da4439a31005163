//! Kruskal's algorithm: shuffled edges joined through a disjoint-set forest

use rand::{seq::SliceRandom, Rng};

use super::{InternalMaze, Wall};
use crate::disjoint_set::DisjointSet;

/// Knock down every wall whose cells are not yet connected
///
/// Walls that would close a loop are returned.
pub(super) fn carve<R: Rng + ?Sized>(maze: &mut InternalMaze, rng: &mut R) -> Vec<Wall> {
    let width = maze.width();
    let mut walls: Vec<Wall> = maze.walls().collect();
    walls.shuffle(rng);

    let mut sets = DisjointSet::new(width * maze.height());
    let mut remaining_walls = Vec::new();
    for wall in walls {
        let ((y0, x0), (y1, x1)) = wall.cells();
        if sets.union(y0 * width + x0, y1 * width + x1) {
            maze.remove_wall(wall);
        } else {
            remaining_walls.push(wall);
        }
    }
    remaining_walls
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::carve;
    use crate::maze_generator::InternalMaze;

    #[test]
    fn rejected_walls_close_loops() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut maze = InternalMaze::new(6, 5);
        let remaining = carve(&mut maze, &mut rng);

        assert!(maze.is_perfect());
        assert_eq!(remaining.len(), maze.walls().count() - 29);
        for wall in remaining {
            let mut looped = maze.clone();
            looped.remove_wall(wall);
            assert_eq!(looped.cycle_rank(), 1);
        }
    }
}
