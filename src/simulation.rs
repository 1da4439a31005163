//! Replay of a recorded runner trajectory against the ghosts

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cell::{Cell, Direction};
use crate::error::MazeError;
use crate::ghost::{Agent, GhostKind, PeerPositions};
use crate::grid::Grid;
use crate::pathfinding::SearchAlgorithm;

/// Ghost taking part in a replay
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GhostConfig {
    #[serde(rename = "type", default)]
    pub kind: GhostKind,
    #[serde(default)]
    pub algorithm: SearchAlgorithm,
    /// Where the ghost starts; an unplaced ghost never moves
    #[serde(default)]
    pub start_pos: Option<Cell>,
}

/// One recorded runner position
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrajectoryStep {
    pub position: Cell,
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Milliseconds, `index * 100` when missing
    #[serde(default)]
    pub timestamp: Option<u64>,
}

/// Recorded runner trajectory
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Trajectory {
    pub moves: Vec<TrajectoryStep>,
}

/// State after one replayed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub timestamp: u64,
    pub pacman: Cell,
    pub ghosts: Vec<GhostFrame>,
    pub caught: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GhostFrame {
    #[serde(rename = "type")]
    pub kind: GhostKind,
    pub position: Option<Cell>,
}

/// Outcome of a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub caught: bool,
    pub catch_position: Option<Cell>,
    pub catch_time: Option<u64>,
    pub total_frames: usize,
    pub frames: Vec<Frame>,
}

/// Ghosts chasing a replayed runner on one grid
pub struct Simulation<'g> {
    grid: &'g Grid,
    ghosts: Vec<Agent<'g>>,
}

impl<'g> Simulation<'g> {
    const S_RUNNER: char = '🏃';
    const S_GHOST: char = '👻';

    /// Set up one ghost per config, placed at its start position
    pub fn new(grid: &'g Grid, configs: &[GhostConfig]) -> Self {
        let ghosts = configs
            .iter()
            .map(|config| {
                let mut ghost = Agent::new(config.kind, grid, config.algorithm);
                if let Some(start) = config.start_pos {
                    ghost.set_position(start);
                }
                ghost
            })
            .collect();
        Self { grid, ghosts }
    }

    pub fn ghosts(&self) -> &[Agent<'g>] {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> &mut [Agent<'g>] {
        &mut self.ghosts
    }

    /// Replay the trajectory until a ghost lands on the runner
    ///
    /// Each step, every ghost sees where the others stood at the start of
    /// that step and moves one cell. The frame in which the runner is caught
    /// is the last one.
    ///
    /// Fails before moving any ghost if a step puts the runner off the grid.
    pub fn simulate(&mut self, trajectory: &[TrajectoryStep]) -> Result<SimulationReport, MazeError> {
        if let Some((step, runner)) = trajectory
            .iter()
            .map(|step| step.position)
            .enumerate()
            .find(|&(_, cell)| !self.grid.contains(cell))
        {
            return Err(MazeError::RunnerOutOfBounds {
                step,
                row: runner.row,
                col: runner.col,
            });
        }

        let mut frames = Vec::with_capacity(trajectory.len());
        let mut catch = None;

        for (i, step) in trajectory.iter().enumerate() {
            let runner = step.position;
            let heading = step.direction.unwrap_or(Direction::None);
            let timestamp = step.timestamp.unwrap_or(i as u64 * 100);

            let peers: PeerPositions = self
                .ghosts
                .iter()
                .filter_map(|ghost| Some((ghost.kind(), ghost.position()?)))
                .collect();

            let mut ghosts = Vec::with_capacity(self.ghosts.len());
            for ghost in &mut self.ghosts {
                if let Some(next) = ghost.get_next_move(runner, heading, &peers) {
                    ghost.set_position(next);
                }
                if catch.is_none() && ghost.position() == Some(runner) {
                    catch = Some((runner, timestamp));
                }
                ghosts.push(GhostFrame {
                    kind: ghost.kind(),
                    position: ghost.position(),
                });
            }

            frames.push(Frame {
                timestamp,
                pacman: runner,
                ghosts,
                caught: catch.is_some(),
            });
            if catch.is_some() {
                break;
            }
        }

        debug!(
            ghosts = self.ghosts.len(),
            steps = trajectory.len(),
            frames = frames.len(),
            caught = catch.is_some(),
            "replayed trajectory"
        );
        Ok(SimulationReport {
            caught: catch.is_some(),
            catch_position: catch.map(|(cell, _)| cell),
            catch_time: catch.map(|(_, time)| time),
            total_frames: frames.len(),
            frames,
        })
    }

    /// Board of one frame, ghosts drawn over the runner
    pub fn render_frame(&self, frame: &Frame) -> String {
        let overlays: Vec<(Cell, char)> = std::iter::once((frame.pacman, Self::S_RUNNER))
            .chain(
                frame
                    .ghosts
                    .iter()
                    .filter_map(|ghost| Some((ghost.position?, Self::S_GHOST))),
            )
            .collect();
        self.grid.render(&overlays)
    }

    /// Print the replay to console
    ///
    /// ## Arguments
    /// - `report`: Result of [`Self::simulate`].
    /// - `step_ms`: Time step for each frame, milliseconds.
    pub fn playback(&self, report: &SimulationReport, step_ms: u64) {
        for (i, frame) in report.frames.iter().enumerate() {
            if i > 0 {
                thread::sleep(Duration::from_millis(step_ms));
            }
            print!("\x1B[2J\x1B[1;1H");
            println!("{}", self.render_frame(frame));
        }
        report.print_report();
    }
}

impl SimulationReport {
    /// Print report
    pub fn print_report(&self) {
        match (self.catch_position, self.catch_time) {
            (Some(cell), Some(time)) => println!(
                "The runner was caught at (row {}, col {}) after {} ms, {} frames.",
                cell.row, cell.col, time, self.total_frames
            ),
            _ => println!("The runner escaped for all {} frames.", self.total_frames),
        }
    }
}
