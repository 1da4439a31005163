use thiserror::Error;

/// Errors raised while building mazes and grids or replaying on them
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("{axis} must be between 3 and 50, got {value}")]
    InvalidDimension { axis: &'static str, value: usize },
    #[error("grid must contain at least one row and one column")]
    EmptyGrid,
    #[error("grid row {row} has {actual} columns, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("trajectory step {step} puts the runner at (row {row}, col {col}), outside the grid")]
    RunnerOutOfBounds { step: usize, row: i32, col: i32 },
}
