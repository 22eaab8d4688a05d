//! The board aggregate: lattice, edge set and cell grid.
//!
//! Points and edges are plain data owned by the lattice and the edge set.
//! Cells refer to them by id only, so the whole graph lives in three flat
//! arenas with no ownership cycles. Only the fill transaction
//! ([`Board::try_fill`]) and the blast cascade it triggers mutate a board.

use crate::cells::{Cell, CellGrid, CellId};
use crate::edges::{Edge, EdgeKey, EdgeSet};
use crate::error::ConstructionError;
use crate::lattice::{Lattice, PointId};

/// Smallest allowed width or height, in cells.
pub const MIN_GRID_DIMENSION: usize = 1;

/// Largest allowed width or height, in cells.
pub const MAX_GRID_DIMENSION: usize = 256;

/// Board dimensions in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
        }
    }
}

impl GridConfig {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConstructionError> {
        let (width, height) = (self.width, self.height);
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(ConstructionError::TooSmall {
                width,
                height,
                min: MIN_GRID_DIMENSION,
            });
        }
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(ConstructionError::TooLarge {
                width,
                height,
                max: MAX_GRID_DIMENSION,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) lattice: Lattice,
    pub(crate) edges: EdgeSet,
    pub(crate) cells: CellGrid,
    /// Set while a blast cascade runs; a second trigger is dropped.
    pub(crate) cascade_in_progress: bool,
}

/// Builds a `width x height` board. See [`Board::new`].
pub fn build_grid(width: usize, height: usize) -> Result<Board, ConstructionError> {
    Board::new(GridConfig::new(width, height))
}

impl Board {
    /// Builds points, then edges, then cells, wiring the back-references.
    pub fn new(config: GridConfig) -> Result<Self, ConstructionError> {
        config.validate()?;

        let mut lattice = Lattice::new(config.width, config.height)?;
        let mut edges = EdgeSet::build(&mut lattice)?;
        let cells = CellGrid::build(&mut lattice, &mut edges);

        log::info!(
            "built {}x{} board: {} points, {} edges, {} cells",
            config.width,
            config.height,
            lattice.len(),
            edges.len(),
            cells.len()
        );

        Ok(Self {
            lattice,
            edges,
            cells,
            cascade_in_progress: false,
        })
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    pub fn point_at(&self, row: i32, col: i32) -> Option<PointId> {
        self.lattice.point_at(row, col).map(|point| point.id())
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    pub fn edge_between(&self, a: PointId, b: PointId) -> Option<&Edge> {
        self.edges.edge_between(EdgeKey::new(a, b))
    }

    /// Whether the edge joining two lattice coordinates exists and is filled.
    pub fn is_filled_between(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        let point = |(row, col): (usize, usize)| self.point_at(row as i32, col as i32);
        match (point(a), point(b)) {
            (Some(a), Some(b)) => self.edge_between(a, b).is_some_and(Edge::is_filled),
            _ => false,
        }
    }

    /// Whether any edge touching `point` is filled.
    ///
    /// A point with no filled edge left after a blast can be drawn in its
    /// initial style again.
    pub fn point_has_filled_edge(&self, point: PointId) -> bool {
        self.lattice.point(point).is_some_and(|point| {
            point
                .edges()
                .iter()
                .any(|&edge| self.edges.get(edge).is_some_and(Edge::is_filled))
        })
    }

    pub fn completed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_completed()).count()
    }

    /// Recounts a cell's unfilled edges and resyncs its completed flag.
    ///
    /// Calling this without an intervening edge change leaves the cell as is.
    pub fn recompute_completion(&mut self, cell: CellId) {
        self.cells.recompute_completion(cell, &self.edges);
    }

    /// True when every cell's counter and flag agree with the live edge state.
    pub fn is_consistent(&self) -> bool {
        self.cells
            .iter()
            .all(|cell| self.cells.is_consistent(cell.id(), &self.edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_bounds() {
        assert!(GridConfig::new(1, 1).validate().is_ok());
        assert_eq!(
            GridConfig::new(0, 4).validate(),
            Err(ConstructionError::TooSmall {
                width: 0,
                height: 4,
                min: MIN_GRID_DIMENSION
            })
        );
        assert!(matches!(
            GridConfig::new(4, MAX_GRID_DIMENSION + 1).validate(),
            Err(ConstructionError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_build_grid_sizes() {
        let board = build_grid(4, 4).unwrap();
        assert_eq!(board.lattice().len(), 25);
        assert_eq!(board.edges().len(), 40);
        assert_eq!(board.cells().len(), 16);
        assert_eq!(board.completed_count(), 0);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_non_square_board() {
        let board = build_grid(5, 2).unwrap();
        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 2);
        assert_eq!(board.lattice().rows(), 3);
        assert_eq!(board.lattice().cols(), 6);
        assert!(board.cells().cell_at(1, 4).is_some());
        assert!(board.cells().cell_at(2, 0).is_none());
    }

    #[test]
    fn test_recompute_is_idempotent_on_fresh_board() {
        let mut board = build_grid(2, 2).unwrap();
        let before = board.clone();
        board.recompute_completion(CellId(3));
        board.recompute_completion(CellId(3));
        assert_eq!(board, before);
    }
}
