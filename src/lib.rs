//! Maze generation, path search and ghost pursuit for a maze-chase game
//!
//! # Examples
//! ## Build a maze and chase the runner through it
//! ```
//! use pacman_lab::{
//!     Agent, Cell, Direction, GeneratorAlgorithm, GhostKind, MazeConfig, MazeGenerator,
//!     PeerPositions, SearchAlgorithm,
//! };
//!
//! let mut gen = MazeGenerator::new(Some(13));
//! let built = gen
//!     .build(&MazeConfig {
//!         width: 8,
//!         height: 6,
//!         algorithm: GeneratorAlgorithm::Wilson,
//!         imperfection: 10.0,
//!         tunnels_h: 1,
//!         tunnels_v: 0,
//!     })
//!     .unwrap();
//! assert_eq!((built.grid.rows(), built.grid.cols()), (13, 17));
//!
//! let mut blinky = Agent::new(GhostKind::Blinky, &built.grid, SearchAlgorithm::AStar);
//! blinky.set_position((1, 1));
//! let next = blinky
//!     .get_next_move(Cell::new(11, 15), Direction::Left, &PeerPositions::new())
//!     .unwrap();
//! assert_eq!(next.manhattan_distance(Cell::new(1, 1)), 1);
//! ```
//!
//! ## Replay a trajectory
//! ```
//! use pacman_lab::{GhostConfig, Grid, Simulation, Trajectory};
//!
//! let grid = Grid::from_codes(&[vec![0, 0, 0, 0, 0, 0]]).unwrap();
//! let configs: Vec<GhostConfig> =
//!     serde_json::from_str(r#"[{"type": "blinky", "startPos": [0, 0]}]"#).unwrap();
//! let trajectory: Trajectory = serde_json::from_str(
//!     r#"{"moves": [
//!         {"position": {"x": 5, "y": 0}, "direction": "LEFT"},
//!         {"position": {"x": 4, "y": 0}, "direction": "LEFT"},
//!         {"position": {"x": 3, "y": 0}, "direction": "LEFT"},
//!         {"position": {"x": 2, "y": 0}, "direction": "LEFT"}
//!     ]}"#,
//! )
//! .unwrap();
//!
//! let mut sim = Simulation::new(&grid, &configs);
//! let report = sim.simulate(&trajectory.moves).unwrap();
//! assert!(report.caught);
//! assert_eq!(report.total_frames, 3);
//! assert_eq!(report.catch_time, Some(200));
//! report.print_report();
//! ```

pub mod cell;
pub mod disjoint_set;
pub mod error;
pub mod ghost;
pub mod grid;
pub mod imperfecteur;
pub mod maze_generator;
pub mod pathfinding;
pub mod pellets;
pub mod simulation;

pub use cell::{Cell, Direction, Position};
pub use disjoint_set::DisjointSet;
pub use error::MazeError;
pub use ghost::{Agent, Behavior, GhostKind, Mode, PeerPositions};
pub use grid::Grid;
pub use imperfecteur::Tunnels;
pub use maze_generator::{
    BuiltMaze, GeneratorAlgorithm, InternalMaze, MazeConfig, MazeGenerator, Wall,
};
pub use pathfinding::{PathFinder, SearchAlgorithm};
pub use pellets::{PelletPlacer, PlacementStrategy, Tile};
pub use simulation::{GhostConfig, Simulation, SimulationReport, Trajectory, TrajectoryStep};

use tracing_subscriber::EnvFilter;

/// Log to stderr, filtered by `RUST_LOG` and `warn` by default
///
/// Keeps stdout free for the JSON output of the binaries.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
