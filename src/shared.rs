//! A board handle that can be shared between threads.
//!
//! Fills take the write lock, so a fill and the cascade it triggers run to
//! completion before anything else sees the board. Oracle queries take read
//! locks and may overlap with each other but never with a fill.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::board::Board;
use crate::edges::FillTag;
use crate::error::FillError;
use crate::events::EventSink;
use crate::lattice::PointId;
use crate::pieces::Offset;
use crate::placement::FillOutcome;

#[derive(Clone, Debug)]
pub struct SharedBoard {
    inner: Arc<RwLock<Board>>,
}

impl SharedBoard {
    pub fn new(board: Board) -> Self {
        Self {
            inner: Arc::new(RwLock::new(board)),
        }
    }

    /// Runs a fill transaction under the write lock. Events are delivered
    /// while the lock is held.
    pub fn try_fill(
        &self,
        candidates: &[Option<PointId>],
        tag: FillTag,
        sink: &mut dyn EventSink,
    ) -> Result<FillOutcome, FillError> {
        self.inner.write().try_fill(candidates, tag, sink)
    }

    pub fn can_place(&self, offsets: &[Offset], anchor: PointId) -> bool {
        self.inner.read().can_place(offsets, anchor)
    }

    pub fn has_any_legal_placement(&self, offsets: &[Offset]) -> bool {
        self.inner.read().has_any_legal_placement(offsets)
    }

    pub fn is_lost<I>(&self, tray: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<[Offset]>,
    {
        self.inner.read().is_lost(tray)
    }

    /// Read access to the board for rendering or inspection.
    pub fn read(&self) -> RwLockReadGuard<'_, Board> {
        self.inner.read()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::board::build_grid;
    use crate::error::PlacementError;
    use crate::events::NullSink;

    #[test]
    fn test_concurrent_fills_of_one_edge() {
        let shared = SharedBoard::new(build_grid(3, 3).unwrap());
        let path = {
            let board = shared.read();
            vec![board.point_at(1, 1), board.point_at(1, 2)]
        };

        let handles: Vec<_> = (0..2)
            .map(|tag| {
                let shared = shared.clone();
                let path = path.clone();
                thread::spawn(move || shared.try_fill(&path, FillTag(tag), &mut NullSink))
            })
            .collect();
        let results: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        let failure = results.into_iter().find_map(Result::err).unwrap();
        assert!(matches!(
            failure,
            FillError::InvalidPlacement(PlacementError::EdgeFilled { .. })
        ));

        let board = shared.read();
        assert_eq!(board.edges().filled_count(), 1);
        assert!(board.is_consistent());
    }

    #[test]
    fn test_readers_run_alongside_each_other() {
        let shared = SharedBoard::new(build_grid(4, 4).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.has_any_legal_placement(&[(0, 0), (0, 1), (1, 1)]))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
