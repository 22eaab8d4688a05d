//! Notifications emitted to the presentation layer.
//!
//! Events are delivered synchronously from inside a fill or cascade. A sink
//! must not call back into the board it is observing.

use crate::cells::{CellId, LineKind};
use crate::edges::{EdgeKey, FillTag};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridEvent {
    EdgeFilled { key: EdgeKey, tag: FillTag },
    EdgeUnfilled { key: EdgeKey },
    CellCompleted { cell: CellId },
    LineCleared {
        kind: LineKind,
        index: usize,
        cells: Vec<CellId>,
    },
}

/// Receiver for [`GridEvent`]s.
pub trait EventSink {
    fn on_event(&mut self, event: &GridEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &GridEvent) {}
}

/// Collects events in order, mostly for tests and replays.
impl EventSink for Vec<GridEvent> {
    fn on_event(&mut self, event: &GridEvent) {
        self.push(event.clone());
    }
}
