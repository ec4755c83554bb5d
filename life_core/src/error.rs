// error.rs - Error kinds surfaced by the engine

use thiserror::Error;

/// Everything the engine can refuse to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Width and height must both be at least 1 and the grid must fit in memory.
    #[error("invalid grid dimensions {width}x{height}: both must be positive and allocatable")]
    InvalidDimension { width: i64, height: i64 },

    /// Coordinate outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },
}

pub type Result<T> = std::result::Result<T, LifeError>;
