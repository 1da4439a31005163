//! Targeting rules of the four ghosts

use super::{GhostKind, PeerPositions};
use crate::cell::{Cell, Direction};
use crate::grid::Grid;

/// Chase and scatter targeting of one ghost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Heads straight for the runner
    Blinky,
    /// Ambushes the cell `prediction_distance` ahead of the runner
    Pinky { prediction_distance: i32 },
    /// Flanks the runner, mirroring Blinky around a point ahead of it
    Inky,
    /// Chases from afar, falls back to its corner when within
    /// `retreat_distance`
    Clyde { retreat_distance: u32 },
}

impl Behavior {
    pub const DEFAULT_PREDICTION_DISTANCE: i32 = 4;
    pub const DEFAULT_RETREAT_DISTANCE: u32 = 8;

    /// How far ahead of the runner Inky pivots
    const INKY_LOOKAHEAD: i32 = 2;
    /// Largest square searched around a target that landed on a wall
    const MAX_SEARCH_RADIUS: i32 = 9;

    /// Behavior of `kind` with default parameters
    pub const fn for_kind(kind: GhostKind) -> Self {
        match kind {
            GhostKind::Blinky => Behavior::Blinky,
            GhostKind::Pinky => Behavior::Pinky {
                prediction_distance: Self::DEFAULT_PREDICTION_DISTANCE,
            },
            GhostKind::Inky => Behavior::Inky,
            GhostKind::Clyde => Behavior::Clyde {
                retreat_distance: Self::DEFAULT_RETREAT_DISTANCE,
            },
        }
    }

    pub const fn kind(&self) -> GhostKind {
        match self {
            Behavior::Blinky => GhostKind::Blinky,
            Behavior::Pinky { .. } => GhostKind::Pinky,
            Behavior::Inky => GhostKind::Inky,
            Behavior::Clyde { .. } => GhostKind::Clyde,
        }
    }

    /// Fixed corner targeted in scatter mode
    pub fn scatter_corner(&self, grid: &Grid) -> Cell {
        let last_row = grid.rows() as i32 - 1;
        let last_col = grid.cols() as i32 - 1;
        match self {
            Behavior::Blinky => Cell::new(0, last_col),
            Behavior::Pinky { .. } => Cell::new(0, 0),
            Behavior::Inky => Cell::new(last_row, last_col),
            Behavior::Clyde { .. } => Cell::new(last_row, 0),
        }
    }

    /// Target in chase mode
    ///
    /// - `own`: position of the ghost itself, if known
    /// - `runner`, `heading`: where the runner is and where it is going
    /// - `peers`: positions of the other ghosts
    pub fn chase_target(
        &self,
        grid: &Grid,
        own: Option<Cell>,
        runner: Cell,
        heading: Direction,
        peers: &PeerPositions,
    ) -> Cell {
        match *self {
            Behavior::Blinky => runner,
            Behavior::Pinky {
                prediction_distance,
            } => match ahead(grid, runner, heading, prediction_distance) {
                Some(target) => nearest_walkable(grid, target, runner),
                None => runner,
            },
            Behavior::Inky => {
                let Some(&blinky) = peers.get(&GhostKind::Blinky) else {
                    return runner;
                };
                let pivot = ahead(grid, runner, heading, Self::INKY_LOOKAHEAD).unwrap_or(runner);
                let target = grid.clamp(pivot.offset(
                    pivot.row.saturating_sub(blinky.row),
                    pivot.col.saturating_sub(blinky.col),
                ));
                nearest_walkable(grid, target, runner)
            }
            Behavior::Clyde { retreat_distance } => {
                let far = own.map_or(true, |cell| cell.manhattan_distance(runner) > retreat_distance);
                if far {
                    runner
                } else {
                    self.scatter_corner(grid)
                }
            }
        }
    }
}

/// Cell `distance` steps along `heading`, clamped to the grid
fn ahead(grid: &Grid, from: Cell, heading: Direction, distance: i32) -> Option<Cell> {
    let (d_row, d_col) = heading.delta()?;
    Some(grid.clamp(from.offset(
        d_row.saturating_mul(distance),
        d_col.saturating_mul(distance),
    )))
}

/// `target` itself if walkable, else the first walkable cell on squares of
/// growing radius around it, else `fallback`
fn nearest_walkable(grid: &Grid, target: Cell, fallback: Cell) -> Cell {
    if grid.is_walkable(target) {
        return target;
    }
    (1..=Behavior::MAX_SEARCH_RADIUS)
        .flat_map(move |radius| {
            (-radius..=radius).flat_map(move |d_row| {
                (-radius..=radius).map(move |d_col| target.offset(d_row, d_col))
            })
        })
        .find(|&cell| grid.is_walkable(cell))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::{nearest_walkable, Behavior};
    use crate::cell::{Cell, Direction};
    use crate::ghost::{GhostKind, PeerPositions};
    use crate::grid::Grid;

    #[test]
    fn blinky_targets_runner() {
        let grid = Grid::open(5, 5);
        let target = Behavior::Blinky.chase_target(
            &grid,
            Some(Cell::new(0, 0)),
            Cell::new(4, 4),
            Direction::None,
            &PeerPositions::new(),
        );
        assert_eq!(target, Cell::new(4, 4));
    }

    #[test]
    fn pinky_prediction_is_clamped() {
        let grid = Grid::open(5, 5);
        let pinky = Behavior::for_kind(GhostKind::Pinky);
        let peers = PeerPositions::new();
        let target = pinky.chase_target(&grid, None, Cell::new(2, 2), Direction::Right, &peers);
        assert_eq!(target, Cell::new(2, 4));
        let target = pinky.chase_target(&grid, None, Cell::new(3, 2), Direction::Up, &peers);
        assert_eq!(target, Cell::new(0, 2));
        // No heading, no prediction
        let target = pinky.chase_target(&grid, None, Cell::new(3, 2), Direction::None, &peers);
        assert_eq!(target, Cell::new(3, 2));
    }

    #[test]
    fn pinky_prediction_avoids_walls() {
        let grid = Grid::from_codes(&[
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap();
        let pinky = Behavior::Pinky {
            prediction_distance: 2,
        };
        let target = pinky.chase_target(
            &grid,
            None,
            Cell::new(0, 2),
            Direction::Down,
            &PeerPositions::new(),
        );
        // (2, 2) is walkable
        assert_eq!(target, Cell::new(2, 2));
        let target = pinky.chase_target(
            &grid,
            None,
            Cell::new(2, 2),
            Direction::Down,
            &PeerPositions::new(),
        );
        // (4, 2) is walkable as well
        assert_eq!(target, Cell::new(4, 2));
        let pinky = Behavior::Pinky {
            prediction_distance: 1,
        };
        let target = pinky.chase_target(
            &grid,
            None,
            Cell::new(2, 2),
            Direction::Up,
            &PeerPositions::new(),
        );
        // (1, 2) is a wall; first hit of the radius-1 square is (0, 1)
        assert_eq!(target, Cell::new(0, 1));
    }

    #[test]
    fn wall_search_falls_back() {
        let grid = Grid::from_codes(&vec![vec![1; 25]; 25]).unwrap();
        assert_eq!(
            nearest_walkable(&grid, Cell::new(12, 12), Cell::new(3, 3)),
            Cell::new(3, 3)
        );
    }

    #[test]
    fn inky_flanks_around_blinky() {
        let grid = Grid::open(11, 11);
        let mut peers = PeerPositions::new();
        peers.insert(GhostKind::Blinky, Cell::new(5, 2));
        // Pivot (5, 5), vector (0, 3)
        let target = Behavior::Inky.chase_target(&grid, None, Cell::new(5, 3), Direction::Right, &peers);
        assert_eq!(target, Cell::new(5, 8));
        // Clamped to the grid
        peers.insert(GhostKind::Blinky, Cell::new(9, 0));
        let target = Behavior::Inky.chase_target(&grid, None, Cell::new(2, 8), Direction::None, &peers);
        assert_eq!(target, Cell::new(0, 10));
    }

    #[test]
    fn inky_without_blinky_chases_directly() {
        let grid = Grid::open(11, 11);
        let mut peers = PeerPositions::new();
        peers.insert(GhostKind::Pinky, Cell::new(0, 0));
        let target = Behavior::Inky.chase_target(&grid, None, Cell::new(5, 3), Direction::Right, &peers);
        assert_eq!(target, Cell::new(5, 3));
    }

    #[test]
    fn clyde_retreats_when_close() {
        let grid = Grid::open(10, 10);
        let clyde = Behavior::Clyde {
            retreat_distance: 5,
        };
        let own = Some(Cell::new(2, 2));
        let peers = PeerPositions::new();
        let runner = Cell::new(6, 5);
        assert_eq!(clyde.chase_target(&grid, own, runner, Direction::None, &peers), runner);
        let runner = Cell::new(3, 4);
        assert_eq!(
            clyde.chase_target(&grid, own, runner, Direction::None, &peers),
            Cell::new(9, 0)
        );
        // At exactly the threshold Clyde still retreats
        let runner = Cell::new(5, 4);
        assert_eq!(
            clyde.chase_target(&grid, own, runner, Direction::None, &peers),
            Cell::new(9, 0)
        );
        // Unknown own position counts as far away
        assert_eq!(clyde.chase_target(&grid, None, runner, Direction::None, &peers), runner);
    }

    #[test]
    fn extreme_coordinates_are_clamped() {
        let grid = Grid::open(5, 5);
        let mut peers = PeerPositions::new();
        let far = Cell::new(i32::MIN, i32::MIN);

        let clyde = Behavior::for_kind(GhostKind::Clyde);
        assert_eq!(
            clyde.chase_target(&grid, Some(Cell::new(4, 0)), far, Direction::None, &peers),
            far
        );

        let pinky = Behavior::Pinky {
            prediction_distance: i32::MAX,
        };
        let target = pinky.chase_target(&grid, None, Cell::new(i32::MAX, 0), Direction::Down, &peers);
        assert_eq!(target, Cell::new(4, 0));
        let pinky = Behavior::Pinky {
            prediction_distance: i32::MIN,
        };
        let target = pinky.chase_target(&grid, None, Cell::new(2, 2), Direction::Up, &peers);
        assert_eq!(target, Cell::new(4, 2));

        peers.insert(GhostKind::Blinky, far);
        let target = Behavior::Inky.chase_target(&grid, None, Cell::new(2, 2), Direction::None, &peers);
        assert_eq!(target, Cell::new(4, 4));
    }

    #[test]
    fn scatter_corners() {
        let grid = Grid::open(7, 9);
        let corners: Vec<_> = [GhostKind::Blinky, GhostKind::Pinky, GhostKind::Inky, GhostKind::Clyde]
            .into_iter()
            .map(|kind| Behavior::for_kind(kind).scatter_corner(&grid))
            .collect();
        assert_eq!(
            corners,
            vec![Cell::new(0, 8), Cell::new(0, 0), Cell::new(6, 8), Cell::new(6, 0)]
        );
    }

    #[test]
    fn kind_round_trip() {
        for kind in GhostKind::ALL {
            assert_eq!(Behavior::for_kind(kind).kind(), kind);
        }
    }
}
