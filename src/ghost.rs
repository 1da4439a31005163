//! Chasing agents
//!
//! An [`Agent`] couples a targeting [`Behavior`] with a [`PathFinder`] on the
//! shared grid: every tick it picks a target cell for its current [`Mode`]
//! and takes one step along the shortest path towards it.

mod behavior;

pub use behavior::Behavior;

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cell::{Cell, Direction};
use crate::grid::Grid;
use crate::pathfinding::{PathFinder, SearchAlgorithm};

/// Ghost identity
///
/// Deserialized from its name in any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum GhostKind {
    #[default]
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

/// What the ghost is currently aiming for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Chase,
    /// Head for the ghost's own corner
    Scatter,
    /// Targets as in chase mode
    Frightened,
}

/// Current cells of the ghosts, by identity
pub type PeerPositions = HashMap<GhostKind, Cell>;

/// Ghost moving on a grid
#[derive(Debug, Clone)]
pub struct Agent<'g> {
    grid: &'g Grid,
    finder: PathFinder<'g>,
    behavior: Behavior,
    position: Option<Cell>,
    mode: Mode,
}

impl GhostKind {
    pub const ALL: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];
}

impl TryFrom<String> for GhostKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GhostKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(&value))
            .ok_or_else(|| format!("unknown ghost type `{value}`"))
    }
}

impl fmt::Display for GhostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GhostKind::Blinky => "blinky",
            GhostKind::Pinky => "pinky",
            GhostKind::Inky => "inky",
            GhostKind::Clyde => "clyde",
        };
        f.write_str(name)
    }
}

impl<'g> Agent<'g> {
    /// Ghost of `kind` with default behavior parameters and no position
    pub fn new(kind: GhostKind, grid: &'g Grid, algorithm: SearchAlgorithm) -> Self {
        Self::with_behavior(Behavior::for_kind(kind), grid, algorithm)
    }

    pub fn with_behavior(behavior: Behavior, grid: &'g Grid, algorithm: SearchAlgorithm) -> Self {
        Self {
            grid,
            finder: PathFinder::new(grid, algorithm),
            behavior,
            position: None,
            mode: Mode::default(),
        }
    }

    pub fn kind(&self) -> GhostKind {
        self.behavior.kind()
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn position(&self) -> Option<Cell> {
        self.position
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Place the ghost
    ///
    /// A cell that is not walkable is replaced by the closest walkable cell,
    /// searched breadth-first over the grid from the (clamped) cell. If the
    /// grid has no walkable cell at all, the raw cell is kept.
    pub fn set_position(&mut self, cell: impl Into<Cell>) {
        let cell = cell.into();
        if self.grid.is_walkable(cell) {
            self.position = Some(cell);
            return;
        }
        self.position = match nearest_walkable_cell(self.grid, cell) {
            Some(nearest) => Some(nearest),
            None => {
                warn!(ghost = %self.kind(), ?cell, "no walkable cell near ghost position");
                Some(cell)
            }
        };
    }

    /// Manhattan distance to `target`, `None` if the ghost is not placed
    pub fn distance_to(&self, target: Cell) -> Option<u32> {
        self.position.map(|cell| cell.manhattan_distance(target))
    }

    /// Cell the ghost is heading for in its current mode
    pub fn get_target(&self, runner: Cell, heading: Direction, peers: &PeerPositions) -> Cell {
        match self.mode {
            Mode::Scatter => self.behavior.scatter_corner(self.grid),
            Mode::Chase | Mode::Frightened => {
                self.behavior
                    .chase_target(self.grid, self.position, runner, heading, peers)
            }
        }
    }

    /// Next cell on the way to the target
    ///
    /// `None` if the ghost is not placed, already on target, or cut off.
    pub fn get_next_move(&self, runner: Cell, heading: Direction, peers: &PeerPositions) -> Option<Cell> {
        let position = self.position?;
        let target = self.get_target(runner, heading, peers);
        self.finder.find_next_move(position, target)
    }
}

/// Breadth-first flood from `cell` over in-bounds cells, stopping at the
/// first walkable one
fn nearest_walkable_cell(grid: &Grid, cell: Cell) -> Option<Cell> {
    let start = grid.clamp(cell);
    if !grid.contains(start) {
        return None;
    }
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if grid.is_walkable(current) {
            return Some(current);
        }
        for neighbor in current.neighbors() {
            if grid.contains(neighbor) && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    None
}
