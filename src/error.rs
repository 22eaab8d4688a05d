//! Error types for grid construction and placement.

use crate::edges::EdgeKey;
use crate::lattice::PointId;

/// Why a candidate placement was rejected.
///
/// Rejection is recoverable: the caller treats it as "placement refused" and
/// the board is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// The candidate at this position did not resolve to a lattice point.
    #[error("anchor {index} does not resolve to a lattice point")]
    Unresolved { index: usize },
    /// The same point appears twice in the candidate path.
    #[error("point {point} appears more than once in the placement")]
    DuplicatePoint { point: PointId },
    /// Two consecutive candidates are not lattice neighbours.
    #[error("points {from} and {to} are not connected by an edge")]
    NotAdjacent { from: PointId, to: PointId },
    /// The edge between two consecutive candidates is already filled.
    #[error("edge {key} is already filled")]
    EdgeFilled { key: EdgeKey },
}

/// Failure of a fill transaction. The board is unchanged in both cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FillError {
    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementError),
    /// An edge was found filled between validation and commit.
    #[error("edge {key} was filled concurrently with this placement")]
    Conflict { key: EdgeKey },
}

/// The grid could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    #[error("grid {width}x{height} is below the minimum dimension {min}")]
    TooSmall { width: usize, height: usize, min: usize },
    #[error("grid {width}x{height} exceeds the maximum dimension {max}")]
    TooLarge { width: usize, height: usize, max: usize },
    #[error("edge {key} was created twice")]
    DuplicateEdge { key: EdgeKey },
    #[error("two points share coordinate ({row}, {col})")]
    DuplicatePoint { row: usize, col: usize },
}
