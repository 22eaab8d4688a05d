//! Unit cells bounded by four points and their edges.

use std::fmt;

use smallvec::SmallVec;

use crate::edges::{EdgeId, EdgeKey, EdgeSet};
use crate::grid::coord_to_idx;
use crate::lattice::{Lattice, PointId};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellId(pub u32);

impl CellId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Orientation of a line of cells.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LineKind {
    Row,
    Column,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Row => f.write_str("row"),
            LineKind::Column => f.write_str("column"),
        }
    }
}

/// A unit square of the board.
///
/// `completed == (remaining_edges == 0)` holds whenever control is outside
/// the board's own mutation methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    row: usize,
    col: usize,
    corners: [PointId; 4],
    edges: SmallVec<[EdgeId; 4]>,
    remaining_edges: usize,
    completed: bool,
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Corner points, clockwise from the top left.
    pub fn corners(&self) -> &[PointId; 4] {
        &self.corners
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn remaining_edges(&self) -> usize {
        self.remaining_edges
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// The `width x height` matrix of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Binds every cell to its corner points and bounding edges.
    ///
    /// A cell's corners are the four points around its center; its edges are
    /// whichever edges of the set join two of those corners. The reverse links
    /// (point to cell, edge to cell) are recorded as well.
    pub(crate) fn build(lattice: &mut Lattice, edge_set: &mut EdgeSet) -> Self {
        let width = lattice.cols() - 1;
        let height = lattice.rows() - 1;
        let point_cols = lattice.cols();
        let mut cells = Vec::with_capacity(width * height);

        for row in 0..height {
            for col in 0..width {
                let id = CellId(coord_to_idx(width, row, col) as u32);
                let corner_at = |r: usize, c: usize| PointId(coord_to_idx(point_cols, r, c) as u32);
                let corners = [
                    corner_at(row, col),
                    corner_at(row, col + 1),
                    corner_at(row + 1, col + 1),
                    corner_at(row + 1, col),
                ];

                let mut edges: SmallVec<[EdgeId; 4]> = SmallVec::new();
                for (i, &a) in corners.iter().enumerate() {
                    for &b in &corners[i + 1..] {
                        if let Some(edge) = edge_set.id_of(EdgeKey::new(a, b)) {
                            edges.push(edge);
                        }
                    }
                }

                for &corner in &corners {
                    if let Some(point) = lattice.point_mut(corner) {
                        point.cells.push(id);
                    }
                }
                for &edge in &edges {
                    if let Some(edge) = edge_set.get_mut(edge) {
                        edge.cells.push(id);
                    }
                }

                cells.push(Cell {
                    id,
                    row,
                    col,
                    corners,
                    remaining_edges: edges.len(),
                    edges,
                    completed: false,
                });
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.index())
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(coord_to_idx(self.width, row, col))
    }

    /// Number of lines of the given kind.
    pub fn line_count(&self, kind: LineKind) -> usize {
        match kind {
            LineKind::Row => self.height,
            LineKind::Column => self.width,
        }
    }

    /// Cells of row `row`, left to right. Empty when out of range.
    pub fn cells_in_row(&self, row: usize) -> impl Iterator<Item = CellId> + '_ {
        let cols = if row < self.height { self.width } else { 0 };
        (0..cols).map(move |col| CellId(coord_to_idx(self.width, row, col) as u32))
    }

    /// Cells of column `col`, top to bottom. Empty when out of range.
    pub fn cells_in_column(&self, col: usize) -> impl Iterator<Item = CellId> + '_ {
        let rows = if col < self.width { self.height } else { 0 };
        (0..rows).map(move |row| CellId(coord_to_idx(self.width, row, col) as u32))
    }

    pub fn cells_in_line(&self, kind: LineKind, index: usize) -> Vec<CellId> {
        match kind {
            LineKind::Row => self.cells_in_row(index).collect(),
            LineKind::Column => self.cells_in_column(index).collect(),
        }
    }

    /// A line is complete when it is non-empty and every cell in it is completed.
    pub fn is_line_complete(&self, kind: LineKind, index: usize) -> bool {
        let cells = self.cells_in_line(kind, index);
        !cells.is_empty() && cells.iter().all(|&id| self.cells[id.index()].completed)
    }

    /// Orthogonal neighbours in the cell grid (up to 4).
    pub fn neighbors_of(&self, id: CellId) -> SmallVec<[CellId; 4]> {
        let mut neighbors = SmallVec::new();
        let Some(cell) = self.get(id) else {
            return neighbors;
        };
        let (row, col) = (cell.row, cell.col);
        if row > 0 {
            neighbors.push(CellId(coord_to_idx(self.width, row - 1, col) as u32));
        }
        if row + 1 < self.height {
            neighbors.push(CellId(coord_to_idx(self.width, row + 1, col) as u32));
        }
        if col > 0 {
            neighbors.push(CellId(coord_to_idx(self.width, row, col - 1) as u32));
        }
        if col + 1 < self.width {
            neighbors.push(CellId(coord_to_idx(self.width, row, col + 1) as u32));
        }
        neighbors
    }

    /// Recounts unfilled bounding edges and resyncs the completed flag.
    pub(crate) fn recompute_completion(&mut self, id: CellId, edge_set: &EdgeSet) {
        let Some(cell) = self.cells.get_mut(id.index()) else {
            return;
        };
        let unfilled = cell
            .edges
            .iter()
            .filter(|&&edge| edge_set.get(edge).is_some_and(|edge| !edge.is_filled()))
            .count();
        cell.remaining_edges = unfilled;
        cell.completed = unfilled == 0;
    }

    /// Records one newly filled bounding edge. Returns true if this completed the cell.
    pub(crate) fn decrement(&mut self, id: CellId) -> bool {
        let cell = &mut self.cells[id.index()];
        assert!(
            cell.remaining_edges > 0,
            "cell {} at ({}, {}) has no unfilled edge left to fill",
            cell.id,
            cell.row,
            cell.col
        );
        cell.remaining_edges -= 1;
        if cell.remaining_edges == 0 {
            cell.completed = true;
            return true;
        }
        false
    }

    /// Checks the completion invariant of one cell against the live edge state.
    pub(crate) fn is_consistent(&self, id: CellId, edge_set: &EdgeSet) -> bool {
        let Some(cell) = self.get(id) else {
            return false;
        };
        let unfilled = cell
            .edges
            .iter()
            .filter(|&&edge| edge_set.get(edge).is_some_and(|edge| !edge.is_filled()))
            .count();
        cell.remaining_edges == unfilled && cell.completed == (cell.remaining_edges == 0)
    }
}
