//! Error types for gftools.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for grid, container and grid object operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur in grid, container and grid object operations.
#[derive(Debug, Error)]
pub enum GridError {
    /// Grid index outside `[0, size)`.
    #[error("grid index {index} out of bounds for grid of size {size}")]
    OutOfBounds { index: usize, size: usize },

    /// Container index outside the extent of one axis.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// A coordinate does not resolve to a stored grid point.
    #[error("coordinate {value} is not a point of the {grid} grid")]
    PointNotFound { value: String, grid: &'static str },

    /// Shapes of two containers or grid objects disagree.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A point carries an index that disagrees with the grid's own record.
    #[error("point {value} carries index {index}, but the grid stores it at {expected}")]
    IndexMismatch {
        value: String,
        index: usize,
        expected: usize,
    },

    /// Operation requires a specific rank.
    #[error("expected rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// A coordinate of the wrong kind was passed to a grid.
    #[error("coordinate kind mismatch: {grid} grid expects {expected}, got {actual}")]
    CoordKindMismatch {
        grid: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Explicit k-mesh values are not equally spaced.
    #[error("k-mesh values are not uniformly spaced: step {step} at position {position}, expected {expected}")]
    NonUniformMesh {
        position: usize,
        step: f64,
        expected: f64,
    },

    /// Grid parameters cannot describe a grid.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Text file missing, unreadable, malformed or inconsistent with the grids.
    #[error("I/O problem with {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl GridError {
    pub(crate) fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GridError::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors raised while resolving a coordinate to a grid point.
    ///
    /// These are the errors a grid object recovers from by consulting its tail.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            GridError::PointNotFound { .. } | GridError::OutOfBounds { .. }
        )
    }
}
