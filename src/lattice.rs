//! The point lattice ("dots") a board is built on.
//!
//! A board of `width x height` cells sits on `(width + 1) x (height + 1)`
//! points. Points are stored row-major, and a point's id is its index in
//! that order, so id lookups never need a map.

use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cells::CellId;
use crate::edges::EdgeId;
use crate::error::ConstructionError;
use crate::grid::{coord_to_idx, idx_to_coord};
use crate::pieces::Offset;

/// Identity of a lattice point. Assigned once at build time.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PointId(pub u32);

impl PointId {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        PointId(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lattice vertex.
///
/// Coordinates never change after construction. The cell and edge lists are
/// non-owning back-references filled in while the rest of the board is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Point {
    id: PointId,
    row: usize,
    col: usize,
    neighbors: SmallVec<[PointId; 4]>,
    pub(crate) edges: SmallVec<[EdgeId; 4]>,
    pub(crate) cells: SmallVec<[CellId; 4]>,
}

impl Point {
    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Lattice neighbours in up, down, left, right order (0 to 4 of them).
    pub fn neighbors(&self) -> &[PointId] {
        &self.neighbors
    }

    /// Edges incident to this point.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Cells this point is a corner of.
    pub fn cells(&self) -> &[CellId] {
        &self.cells
    }
}

/// Matrix of points with 4-neighbour adjacency. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    rows: usize,
    cols: usize,
    points: Vec<Point>,
}

impl Lattice {
    /// Lays out `(width + 1) x (height + 1)` points.
    pub(crate) fn new(width: usize, height: usize) -> Result<Self, ConstructionError> {
        let rows = height + 1;
        let cols = width + 1;
        let mut points = Vec::with_capacity(rows * cols);
        let mut seen = FxHashSet::default();

        for index in 0..rows * cols {
            let (row, col) = idx_to_coord(cols, index);
            if !seen.insert((row, col)) {
                return Err(ConstructionError::DuplicatePoint { row, col });
            }

            let mut neighbors: SmallVec<[PointId; 4]> = SmallVec::new();
            if row > 0 {
                neighbors.push(PointId::from_index(coord_to_idx(cols, row - 1, col)));
            }
            if row + 1 < rows {
                neighbors.push(PointId::from_index(coord_to_idx(cols, row + 1, col)));
            }
            if col > 0 {
                neighbors.push(PointId::from_index(coord_to_idx(cols, row, col - 1)));
            }
            if col + 1 < cols {
                neighbors.push(PointId::from_index(coord_to_idx(cols, row, col + 1)));
            }

            points.push(Point {
                id: PointId::from_index(index),
                row,
                col,
                neighbors,
                edges: SmallVec::new(),
                cells: SmallVec::new(),
            });
        }

        Ok(Self { rows, cols, points })
    }

    /// Number of point rows (`height + 1`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of point columns (`width + 1`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.index())
    }

    pub(crate) fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.index())
    }

    /// Returns the point at `(row, col)`, or `None` when out of range.
    pub fn point_at(&self, row: i32, col: i32) -> Option<&Point> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.points.get(coord_to_idx(self.cols, row, col))
    }

    /// Lattice neighbours of `id`; empty for an unknown id.
    pub fn neighbors_of(&self, id: PointId) -> &[PointId] {
        match self.point(id) {
            Some(point) => point.neighbors(),
            None => &[],
        }
    }

    pub fn are_adjacent(&self, a: PointId, b: PointId) -> bool {
        self.neighbors_of(a).contains(&b)
    }

    /// The point `offset` away from `anchor`, if it lies on the lattice.
    pub fn offset_from(&self, anchor: PointId, (d_row, d_col): Offset) -> Option<PointId> {
        let anchor = self.point(anchor)?;
        let row = (anchor.row as i32).checked_add(d_row)?;
        let col = (anchor.col as i32).checked_add(d_col)?;
        self.point_at(row, col).map(Point::id)
    }

    /// Resolves each offset relative to `anchor`. Off-lattice offsets map to `None`.
    pub fn resolve_path(&self, anchor: PointId, offsets: &[Offset]) -> Vec<Option<PointId>> {
        offsets
            .iter()
            .map(|&offset| self.offset_from(anchor, offset))
            .collect()
    }

    /// Snaps a continuous lattice-space position to the closest point.
    ///
    /// Positions more than half a unit outside the lattice resolve to `None`.
    pub fn nearest_point(&self, row: f64, col: f64) -> Option<PointId> {
        let max_row = (self.rows - 1) as f64 + 0.5;
        let max_col = (self.cols - 1) as f64 + 0.5;
        if !(-0.5..=max_row).contains(&row) || !(-0.5..=max_col).contains(&col) {
            return None;
        }
        let row = row.round().clamp(0.0, (self.rows - 1) as f64) as i32;
        let col = col.round().clamp(0.0, (self.cols - 1) as f64) as i32;
        self.point_at(row, col).map(Point::id)
    }
}
