//! Placement validation and the atomic fill transaction.

use smallvec::SmallVec;

use crate::blast::ClearedLine;
use crate::board::Board;
use crate::cells::CellId;
use crate::edges::{EdgeId, EdgeKey, FillTag};
use crate::error::{FillError, PlacementError};
use crate::events::{EventSink, GridEvent};
use crate::lattice::PointId;

/// Result of a committed fill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FillOutcome {
    /// Edges filled by this placement, in path order.
    pub filled_edges: Vec<EdgeKey>,
    /// Cells that became completed, in id order.
    pub newly_completed: Vec<CellId>,
    /// Lines cleared by the cascade this fill triggered.
    pub cleared: Vec<ClearedLine>,
}

impl FillOutcome {
    /// Every cleared cell, once each, in id order.
    pub fn cleared_cells(&self) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self
            .cleared
            .iter()
            .flat_map(|line| line.cells.iter().copied())
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

impl Board {
    /// Checks whether a candidate path may be placed, without touching the board.
    ///
    /// `candidates` holds one entry per piece anchor, in path order; `None`
    /// marks an anchor that did not land on the lattice. Returns the keys of
    /// the edges between consecutive candidates.
    pub fn validate(&self, candidates: &[Option<PointId>]) -> Result<Vec<EdgeKey>, PlacementError> {
        let mut points: SmallVec<[PointId; 8]> = SmallVec::with_capacity(candidates.len());

        for (index, &candidate) in candidates.iter().enumerate() {
            let point = candidate
                .filter(|&point| self.lattice.point(point).is_some())
                .ok_or(PlacementError::Unresolved { index })?;
            if points.contains(&point) {
                return Err(PlacementError::DuplicatePoint { point });
            }
            points.push(point);
        }

        points
            .windows(2)
            .map(|pair| {
                let key = EdgeKey::new(pair[0], pair[1]);
                match self.edges.edge_between(key) {
                    None => Err(PlacementError::NotAdjacent {
                        from: pair[0],
                        to: pair[1],
                    }),
                    Some(edge) if edge.is_filled() => Err(PlacementError::EdgeFilled { key }),
                    Some(_) => Ok(key),
                }
            })
            .collect()
    }

    /// Places a piece: fills the edges along `candidates`, then runs the blast
    /// cascade if any cell completed.
    ///
    /// On error the board is exactly as it was before the call and no event
    /// has been emitted.
    pub fn try_fill(
        &mut self,
        candidates: &[Option<PointId>],
        tag: FillTag,
        sink: &mut dyn EventSink,
    ) -> Result<FillOutcome, FillError> {
        let keys = self.validate(candidates)?;
        let touched = self.touched_cells(candidates);
        let newly_completed = self.commit(&keys, &touched, tag)?;

        log::debug!(
            "filled {} edges, {} cells completed",
            keys.len(),
            newly_completed.len()
        );

        for &key in &keys {
            sink.on_event(&GridEvent::EdgeFilled { key, tag });
        }
        for &cell in &newly_completed {
            sink.on_event(&GridEvent::CellCompleted { cell });
        }

        let cleared = if newly_completed.is_empty() {
            Vec::new()
        } else {
            self.blast(sink)
        };

        debug_assert!(self.is_consistent());
        Ok(FillOutcome {
            filled_edges: keys,
            newly_completed,
            cleared,
        })
    }

    /// Union of the cells having any candidate as a corner, in id order.
    pub(crate) fn touched_cells(&self, candidates: &[Option<PointId>]) -> Vec<CellId> {
        let mut touched: Vec<CellId> = candidates
            .iter()
            .flatten()
            .filter_map(|&point| self.lattice.point(point))
            .flat_map(|point| point.cells().iter().copied())
            .collect();
        touched.sort_unstable();
        touched.dedup();
        touched
    }

    /// Fills `keys` and updates the touched cells' counters.
    ///
    /// Edges are filled first under an undo journal; if one turns out to be
    /// filled already, the journal is unwound and the cell counters are never
    /// touched.
    pub(crate) fn commit(
        &mut self,
        keys: &[EdgeKey],
        touched: &[CellId],
        tag: FillTag,
    ) -> Result<Vec<CellId>, FillError> {
        let mut journal: SmallVec<[EdgeId; 8]> = SmallVec::with_capacity(keys.len());
        for &key in keys {
            match self.edges.fill(key, tag) {
                Ok(id) => journal.push(id),
                Err(err) => {
                    for &id in journal.iter().rev() {
                        self.edges.unfill(id);
                    }
                    log::error!("fill aborted and rolled back: {err}");
                    return Err(err);
                }
            }
        }

        let mut newly_completed = Vec::new();
        for &cell_id in touched {
            let Some(cell) = self.cells.get(cell_id) else {
                continue;
            };
            if cell.is_completed() {
                continue;
            }
            let hits = cell
                .edges()
                .iter()
                .filter(|&edge| journal.contains(edge))
                .count();
            for _ in 0..hits {
                if self.cells.decrement(cell_id) {
                    newly_completed.push(cell_id);
                }
            }
        }

        Ok(newly_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::build_grid;
    use crate::events::NullSink;

    fn path(board: &Board, coords: &[(i32, i32)]) -> Vec<Option<PointId>> {
        coords
            .iter()
            .map(|&(row, col)| board.point_at(row, col))
            .collect()
    }

    #[test]
    fn test_validate_returns_edge_keys_in_order() {
        let board = build_grid(3, 3).unwrap();
        let candidates = path(&board, &[(0, 0), (0, 1), (1, 1)]);
        let keys = board.validate(&candidates).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], EdgeKey::new(PointId(0), PointId(1)));
        assert_eq!(keys[1], EdgeKey::new(PointId(1), PointId(5)));
    }

    #[test]
    fn test_validate_rejects_unresolved_anchor() {
        let board = build_grid(2, 2).unwrap();
        let candidates = path(&board, &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(
            board.validate(&candidates),
            Err(PlacementError::Unresolved { index: 2 })
        );
        let bogus = [Some(PointId(0)), Some(PointId(999))];
        assert_eq!(
            board.validate(&bogus),
            Err(PlacementError::Unresolved { index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_point() {
        let board = build_grid(2, 2).unwrap();
        let candidates = path(&board, &[(0, 0), (0, 1), (0, 0)]);
        assert!(matches!(
            board.validate(&candidates),
            Err(PlacementError::DuplicatePoint { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_adjacent_pair() {
        let board = build_grid(2, 2).unwrap();
        let candidates = path(&board, &[(0, 0), (1, 1)]);
        assert!(matches!(
            board.validate(&candidates),
            Err(PlacementError::NotAdjacent { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_filled_edge() {
        let mut board = build_grid(2, 2).unwrap();
        let first = path(&board, &[(1, 0), (1, 1)]);
        board.try_fill(&first, FillTag(1), &mut NullSink).unwrap();
        let overlapping = path(&board, &[(1, 2), (1, 1), (1, 0)]);
        assert!(matches!(
            board.validate(&overlapping),
            Err(PlacementError::EdgeFilled { .. })
        ));
    }

    #[test]
    fn test_shared_edge_decrements_both_cells() {
        let mut board = build_grid(2, 1).unwrap();
        let candidates = path(&board, &[(0, 1), (1, 1)]);
        board.try_fill(&candidates, FillTag(1), &mut NullSink).unwrap();
        assert_eq!(board.cells().cell_at(0, 0).unwrap().remaining_edges(), 3);
        assert_eq!(board.cells().cell_at(0, 1).unwrap().remaining_edges(), 3);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_fill_records_tag() {
        let mut board = build_grid(2, 2).unwrap();
        let candidates = path(&board, &[(2, 0), (2, 1)]);
        board.try_fill(&candidates, FillTag(42), &mut NullSink).unwrap();
        let (a, b) = (board.point_at(2, 0).unwrap(), board.point_at(2, 1).unwrap());
        assert_eq!(board.edge_between(a, b).unwrap().tag(), Some(FillTag(42)));
    }

    #[test]
    fn test_commit_conflict_rolls_back() {
        let mut board = build_grid(2, 2).unwrap();
        let candidates = path(&board, &[(0, 0), (0, 1), (0, 2)]);
        let mut keys = board.validate(&candidates).unwrap();
        // a repeated key reaches the edge set a second time mid-commit
        keys.push(keys[0]);
        let touched = board.touched_cells(&candidates);
        let before = board.clone();

        let result = board.commit(&keys, &touched, FillTag(7));

        assert_eq!(result, Err(FillError::Conflict { key: keys[0] }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_fill_emits_nothing() {
        let mut board = build_grid(2, 2).unwrap();
        let before = board.clone();
        let mut events: Vec<GridEvent> = Vec::new();
        let candidates = path(&board, &[(0, 0), (0, 1), (0, 5)]);
        let result = board.try_fill(&candidates, FillTag(1), &mut events);
        assert!(matches!(result, Err(FillError::InvalidPlacement(_))));
        assert!(events.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_single_point_placement_fills_nothing() {
        let mut board = build_grid(1, 1).unwrap();
        let single = [board.point_at(0, 0)];
        let outcome = board
            .try_fill(&single, FillTag(1), &mut NullSink)
            .unwrap();
        assert!(outcome.filled_edges.is_empty());
        assert_eq!(board.edges().filled_count(), 0);
    }
}
