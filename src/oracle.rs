//! Read-only placement feasibility and loss detection.

use crate::board::Board;
use crate::lattice::PointId;
use crate::pieces::Offset;

impl Board {
    /// Whether `offsets`, taken relative to `anchor`, form a legal placement.
    ///
    /// Any offset that falls off the lattice makes the placement illegal.
    pub fn can_place(&self, offsets: &[Offset], anchor: PointId) -> bool {
        let candidates = self.lattice.resolve_path(anchor, offsets);
        self.validate(&candidates).is_ok()
    }

    /// Every anchor at which the shape can be placed, in point id order.
    pub fn legal_anchors<'a>(&'a self, offsets: &'a [Offset]) -> impl Iterator<Item = PointId> + 'a {
        self.lattice
            .points()
            .iter()
            .map(|point| point.id())
            .filter(move |&anchor| self.can_place(offsets, anchor))
    }

    /// The first anchor (in point id order) at which the shape fits.
    pub fn first_legal_anchor(&self, offsets: &[Offset]) -> Option<PointId> {
        self.legal_anchors(offsets).next()
    }

    /// Whether the shape fits anywhere on the board.
    pub fn has_any_legal_placement(&self, offsets: &[Offset]) -> bool {
        self.first_legal_anchor(offsets).is_some()
    }

    /// True when no shape in `tray` can be placed anywhere.
    ///
    /// An empty tray counts as lost.
    pub fn is_lost<I>(&self, tray: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<[Offset]>,
    {
        no_shape_fits(tray, |shape| self.has_any_legal_placement(shape))
    }
}

/// Loss rule shared by [`Board::is_lost`] and the
/// [`PlacementOracle`](crate::PlacementOracle) default.
pub(crate) fn no_shape_fits<I>(tray: I, fits: impl Fn(&[Offset]) -> bool) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<[Offset]>,
{
    let lost = !tray.into_iter().any(|shape| fits(shape.as_ref()));
    if lost {
        log::debug!("no tray piece can be placed");
    }
    lost
}
