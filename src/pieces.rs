//! Piece definitions and offset types.
//!
//! A piece is an open path of lattice points. Consecutive points are one step
//! apart, so each piece covers `len - 1` edges when placed.

/// A (row, col) displacement on the lattice.
pub type Offset = (i32, i32);

/// Maximum number of anchor points in any catalog piece.
pub const MAX_ANCHORS: usize = 5;

/// A named piece shape in its base orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub offsets: &'static [Offset],
}

impl Shape {
    /// Creates a shape with compile-time validation of its path.
    pub const fn new(name: &'static str, offsets: &'static [Offset]) -> Self {
        assert!(offsets.len() >= 2, "a shape needs at least one edge");
        assert!(offsets.len() <= MAX_ANCHORS, "shape exceeds MAX_ANCHORS");
        let mut i = 1;
        while i < offsets.len() {
            let d_row = offsets[i].0 - offsets[i - 1].0;
            let d_col = offsets[i].1 - offsets[i - 1].1;
            assert!(
                d_row.abs() + d_col.abs() == 1,
                "consecutive anchors must be lattice neighbours"
            );
            i += 1;
        }
        Self { name, offsets }
    }

    /// Number of edges the shape fills.
    pub fn edge_count(&self) -> usize {
        self.offsets.len() - 1
    }
}

impl AsRef<[Offset]> for Shape {
    fn as_ref(&self) -> &[Offset] {
        self.offsets
    }
}

/// The catalog of pieces a tray can offer.
///
/// Each shape is listed once; rotations come from
/// [`all_orientations`](crate::geometry::all_orientations).
pub const SHAPES: &[Shape] = &[
    // single edge
    Shape::new("stick", &[(0, 0), (0, 1)]),
    // two edges in a line
    Shape::new("long stick", &[(0, 0), (0, 1), (0, 2)]),
    // two edges at a right angle
    Shape::new("corner", &[(0, 0), (0, 1), (1, 1)]),
    // three sides of a cell, open at the top
    Shape::new("cup", &[(0, 0), (1, 0), (1, 1), (0, 1)]),
    // three edges: two straight, then a turn
    Shape::new("hook", &[(0, 0), (0, 1), (0, 2), (1, 2)]),
    // three edges: right, down, right
    Shape::new("zigzag", &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    // three edges in a line
    Shape::new("line", &[(0, 0), (0, 1), (0, 2), (0, 3)]),
];
