//! Grid coordinates, headings and distances

use serde::{Deserialize, Serialize};

/// Location on a [`Grid`](crate::Grid)
///
/// `row` grows downwards and `col` grows rightwards. Coordinates are signed,
/// so target arithmetic may step outside the grid before it is clamped back.
///
/// Serializes as `{"y": row, "x": col}` and deserializes from any
/// [`Position`] form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Position")]
pub struct Cell {
    #[serde(rename = "y")]
    pub row: i32,
    #[serde(rename = "x")]
    pub col: i32,
}

/// Position as it arrives from the outside world
///
/// Only used at the boundary: it is converted into a [`Cell`] right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Position {
    /// Ordered `[row, col]` pair
    Pair(i32, i32),
    /// Keyed record `{"x": col, "y": row}`
    Keyed { x: i32, y: i32 },
}

/// Heading of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Standing still, or a heading that could not be recognized
    None,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Cell displaced by `(d_row, d_col)`, saturating at the `i32` range
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row.saturating_add(d_row), self.col.saturating_add(d_col))
    }

    /// The four orthogonal neighbours: up, down, left, right
    pub const fn neighbors(self) -> [Cell; 4] {
        [
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, -1),
            self.offset(0, 1),
        ]
    }

    /// Sum of absolute coordinate differences
    ///
    /// Admissible heuristic for 4-directional unit-cost movement.
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    pub fn euclidean_distance(self, other: Cell) -> f64 {
        let d_row = f64::from(self.row) - f64::from(other.row);
        let d_col = f64::from(self.col) - f64::from(other.col);
        d_row.hypot(d_col)
    }

    /// Chessboard distance
    pub fn chebyshev_distance(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Position> for Cell {
    fn from(position: Position) -> Self {
        match position {
            Position::Pair(row, col) => Self::new(row, col),
            Position::Keyed { x, y } => Self::new(y, x),
        }
    }
}

impl Direction {
    /// Unit step `(d_row, d_col)`, or `None` when not moving
    pub const fn delta(self) -> Option<(i32, i32)> {
        match self {
            Direction::Up => Some((-1, 0)),
            Direction::Down => Some((1, 0)),
            Direction::Left => Some((0, -1)),
            Direction::Right => Some((0, 1)),
            Direction::None => None,
        }
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "UP" => Direction::Up,
            "DOWN" => Direction::Down,
            "LEFT" => Direction::Left,
            "RIGHT" => Direction::Right,
            _ => Direction::None,
        }
    }
}
