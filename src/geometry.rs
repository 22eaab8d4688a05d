//! Quarter-turn rotations of piece paths.
//!
//! A flat piece has four orientations. Symmetric pieces cover the same set of
//! edges in several of them, so orientations are deduplicated by the edges
//! they cover rather than by point order.

use rustc_hash::FxHashSet;

use crate::pieces::Offset;

/// The four quarter-turn rotations, clockwise, applied to (row, col).
pub const ROTATIONS: [fn(Offset) -> Offset; 4] = [
    |(row, col)| (row, col),   // 0 degrees
    |(row, col)| (col, -row),  // 90 degrees
    |(row, col)| (-row, -col), // 180 degrees
    |(row, col)| (-col, row),  // 270 degrees
];

/// Generates all distinct orientations of a path.
///
/// Each rotation is translated so its minimum row and column are zero. Two
/// orientations that cover the same edges count once, even if their points
/// run in opposite directions.
pub fn all_orientations(path: &[Offset]) -> Vec<Vec<Offset>> {
    let mut seen = FxHashSet::default();
    let mut orientations = Vec::new();

    for rotate in ROTATIONS {
        let rotated = normalize_to_origin(path.iter().map(|&offset| rotate(offset)).collect());
        if seen.insert(edge_signature(&rotated)) {
            orientations.push(rotated);
        }
    }

    orientations
}

/// Translates offsets so the minimum row and column are both zero.
fn normalize_to_origin(mut offsets: Vec<Offset>) -> Vec<Offset> {
    let min_row = offsets.iter().map(|&(row, _)| row).min().unwrap_or(0);
    let min_col = offsets.iter().map(|&(_, col)| col).min().unwrap_or(0);

    for (row, col) in &mut offsets {
        *row -= min_row;
        *col -= min_col;
    }

    offsets
}

/// Sorted list of the undirected segments a path covers.
fn edge_signature(path: &[Offset]) -> Vec<(Offset, Offset)> {
    let mut segments: Vec<(Offset, Offset)> = path
        .windows(2)
        .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
        .collect();
    segments.sort_unstable();
    segments
}
