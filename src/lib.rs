//! Edge-Fill Puzzle Rule Engine
//!
//! Pieces are open paths of lattice points snapped onto a grid of dots. The
//! edges under a piece become filled, a cell whose four edges are filled is
//! completed, and any full row or column of completed cells is cleared.
//! The engine also answers whether a piece can still be placed anywhere,
//! which is how a lost game is detected.

pub mod blast;
pub mod board;
pub mod cells;
pub mod edges;
pub mod error;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod lattice;
mod oracle;
pub mod pieces;
pub mod placement;
pub mod shared;

pub use blast::ClearedLine;
pub use board::{build_grid, Board, GridConfig};
pub use cells::{Cell, CellId, LineKind};
pub use edges::{Edge, EdgeKey, FillTag};
pub use error::{ConstructionError, FillError, PlacementError};
pub use events::{EventSink, GridEvent, NullSink};
pub use lattice::PointId;
pub use pieces::{Offset, Shape};
pub use placement::FillOutcome;
pub use shared::SharedBoard;

/// Placement queries shared by [`Board`] and [`SharedBoard`].
///
/// Lets callers such as a drag preview or a loss check work against either
/// an owned board or a locked handle.
pub trait PlacementOracle {
    fn can_place(&self, offsets: &[Offset], anchor: PointId) -> bool;
    fn has_any_legal_placement(&self, offsets: &[Offset]) -> bool;

    /// True when no shape in `tray` fits anywhere. An empty tray counts as lost.
    fn is_lost(&self, tray: &[&[Offset]]) -> bool {
        oracle::no_shape_fits(tray, |shape| self.has_any_legal_placement(shape))
    }
}

impl PlacementOracle for Board {
    fn can_place(&self, offsets: &[Offset], anchor: PointId) -> bool {
        Board::can_place(self, offsets, anchor)
    }

    fn has_any_legal_placement(&self, offsets: &[Offset]) -> bool {
        Board::has_any_legal_placement(self, offsets)
    }
}

impl PlacementOracle for SharedBoard {
    fn can_place(&self, offsets: &[Offset], anchor: PointId) -> bool {
        SharedBoard::can_place(self, offsets, anchor)
    }

    fn has_any_legal_placement(&self, offsets: &[Offset]) -> bool {
        SharedBoard::has_any_legal_placement(self, offsets)
    }
}
