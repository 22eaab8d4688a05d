//! Clearing of fully completed rows and columns.
//!
//! A cascade takes one snapshot of the complete lines, clears rows before
//! columns, then resyncs every neighbour of a cleared cell. A cell where a
//! cleared row crosses a cleared column is cleared once, in the row pass.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::board::Board;
use crate::cells::{CellId, LineKind};
use crate::edges::EdgeId;
use crate::events::{EventSink, GridEvent};

/// A row or column removed by a cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearedLine {
    pub kind: LineKind,
    pub index: usize,
    /// Every cell of the line, in line order.
    pub cells: Vec<CellId>,
}

impl Board {
    /// Every complete line, rows first, each kind in index order.
    pub fn complete_lines(&self) -> Vec<(LineKind, usize)> {
        [LineKind::Row, LineKind::Column]
            .into_iter()
            .flat_map(|kind| {
                (0..self.cells.line_count(kind))
                    .filter(move |&index| self.cells.is_line_complete(kind, index))
                    .map(move |index| (kind, index))
            })
            .collect()
    }

    /// Runs one blast cascade over the current state.
    ///
    /// Returns nothing if a cascade is already running on this board.
    pub(crate) fn blast(&mut self, sink: &mut dyn EventSink) -> Vec<ClearedLine> {
        if self.cascade_in_progress {
            log::debug!("cascade already in progress, trigger dropped");
            return Vec::new();
        }
        self.cascade_in_progress = true;

        let lines = self.complete_lines();
        let clearing: FxHashSet<CellId> = lines
            .iter()
            .flat_map(|&(kind, index)| self.cells.cells_in_line(kind, index))
            .collect();

        let mut cleared: FxHashSet<CellId> = FxHashSet::default();
        let mut pending: Vec<CellId> = Vec::new();
        let mut report = Vec::with_capacity(lines.len());

        for (kind, index) in lines {
            let cells = self.cells.cells_in_line(kind, index);
            for &cell in &cells {
                if cleared.insert(cell) {
                    self.clear_cell(cell, &clearing, sink);
                }
            }
            for &cell in &cells {
                pending.extend(self.cells.neighbors_of(cell));
            }

            log::debug!("cleared {kind} {index}");
            sink.on_event(&GridEvent::LineCleared {
                kind,
                index,
                cells: cells.clone(),
            });
            report.push(ClearedLine { kind, index, cells });
        }

        pending.sort_unstable();
        pending.dedup();
        for cell in pending {
            self.cells.recompute_completion(cell, &self.edges);
        }

        self.cascade_in_progress = false;
        report
    }

    /// Un-fills a cleared cell's edges, except edges still bounding a completed
    /// cell that stays on the board, then resyncs the cell.
    fn clear_cell(&mut self, cell: CellId, clearing: &FxHashSet<CellId>, sink: &mut dyn EventSink) {
        let edges: SmallVec<[EdgeId; 4]> = match self.cells.get(cell) {
            Some(cell) => cell.edges().iter().copied().collect(),
            None => return,
        };

        for edge in edges {
            if self.edge_held_by_survivor(edge, cell, clearing) {
                continue;
            }
            if self.edges.unfill(edge) {
                if let Some(edge) = self.edges.get(edge) {
                    log::trace!("unfilled edge {}", edge.key());
                    sink.on_event(&GridEvent::EdgeUnfilled { key: edge.key() });
                }
            }
        }

        self.cells.recompute_completion(cell, &self.edges);
        assert!(
            self.cells.get(cell).is_some_and(|cell| !cell.is_completed()),
            "cell {cell} is still completed after being cleared"
        );
    }

    fn edge_held_by_survivor(&self, edge: EdgeId, cell: CellId, clearing: &FxHashSet<CellId>) -> bool {
        let Some(edge) = self.edges.get(edge) else {
            return false;
        };
        edge.cells().iter().any(|&other| {
            other != cell
                && !clearing.contains(&other)
                && self.cells.get(other).is_some_and(|other| other.is_completed())
        })
    }
}
