//! Error types for the pathfinding core.

use grid_util::Point;
use thiserror::Error;

/// Failures the pathfinding core reports instead of looping forever.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// The adjacency index holds no route between the two cells.
    #[error("no route from {start:?} to {goal:?}")]
    Unreachable { start: Point, goal: Point },

    /// Expanding-ring snapping ran out of grid without finding a free cell.
    #[error("no traversable cell found around {origin:?}")]
    NoTraversableCell { origin: Point },

    #[error("cell ({x}, {y}) lies outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("invalid map configuration: {0}")]
    InvalidConfig(String),
}

impl PathError {
    /// Out-of-grid error for unsigned coordinates. Values past `i32::MAX` are reported as
    /// `i32::MAX`.
    pub fn out_of_bounds(x: usize, y: usize) -> PathError {
        let saturate = |v: usize| i32::try_from(v).unwrap_or(i32::MAX);
        PathError::OutOfBounds {
            x: saturate(x),
            y: saturate(y),
        }
    }
}

pub type Result<T> = std::result::Result<T, PathError>;
