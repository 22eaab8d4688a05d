//! Flat-array coordinate helpers and text rendering of a board.
//!
//! Points and cells are both stored row-major. A `width x height` board has
//! `width + 1` points per row and `width` cells per row, so each helper takes
//! the row stride explicitly.

use crate::board::Board;

/// Converts (row, col) to a linear index for rows of `stride` entries.
#[inline(always)]
pub const fn coord_to_idx(stride: usize, row: usize, col: usize) -> usize {
    row * stride + col
}

/// Converts a linear index back to (row, col) for rows of `stride` entries.
#[inline(always)]
pub const fn idx_to_coord(stride: usize, index: usize) -> (usize, usize) {
    (index / stride, index % stride)
}

/// Formats a board as ASCII art.
///
/// Points are drawn as `+`, filled horizontal edges as `---`, filled vertical
/// edges as `|` and completed cells as `###`. Trailing blanks are trimmed from
/// every line.
pub fn format_board(board: &Board) -> String {
    let width = board.width();
    let height = board.height();
    let mut output = String::new();

    for row in 0..=height {
        let mut line = String::new();
        for col in 0..=width {
            line.push('+');
            if col < width {
                let filled = board.is_filled_between((row, col), (row, col + 1));
                line.push_str(if filled { "---" } else { "   " });
            }
        }
        push_trimmed(&mut output, &line);

        if row == height {
            break;
        }

        let mut line = String::new();
        for col in 0..=width {
            let filled = board.is_filled_between((row, col), (row + 1, col));
            line.push(if filled { '|' } else { ' ' });
            if col < width {
                let completed = board
                    .cells()
                    .cell_at(row, col)
                    .is_some_and(|cell| cell.is_completed());
                line.push_str(if completed { "###" } else { "   " });
            }
        }
        push_trimmed(&mut output, &line);
    }

    output
}

fn push_trimmed(output: &mut String, line: &str) {
    output.push_str(line.trim_end());
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, GridConfig};
    use crate::edges::FillTag;
    use crate::events::NullSink;

    fn fill_path(board: &mut Board, coords: &[(i32, i32)]) {
        let candidates: Vec<_> = coords
            .iter()
            .map(|&(row, col)| board.point_at(row, col))
            .collect();
        board
            .try_fill(&candidates, FillTag(1), &mut NullSink)
            .expect("placement should be legal");
    }

    #[test]
    fn test_coordinate_conversion_roundtrip() {
        for stride in 1..6 {
            for index in 0..stride * 4 {
                let (row, col) = idx_to_coord(stride, index);
                assert!(col < stride);
                assert_eq!(coord_to_idx(stride, row, col), index);
            }
        }
    }

    #[test]
    fn test_format_empty_board() {
        let board = Board::new(GridConfig::new(2, 1)).unwrap();
        assert_eq!(format_board(&board), "+   +   +\n\n+   +   +\n");
    }

    #[test]
    fn test_format_completed_cell_snapshot() {
        let mut board = Board::new(GridConfig::new(3, 2)).unwrap();
        fill_path(&mut board, &[(1, 0), (0, 0), (0, 1), (1, 1)]);
        fill_path(&mut board, &[(1, 0), (1, 1), (1, 2)]);
        insta::assert_snapshot!(format_board(&board), @r"
+---+   +   +
|###|
+---+---+   +

+   +   +   +
");
    }

    #[test]
    fn test_format_after_row_clear_snapshot() {
        let mut board = Board::new(GridConfig::new(2, 3)).unwrap();
        // complete the cell below the top-left one
        fill_path(&mut board, &[(1, 0), (2, 0), (2, 1), (1, 1)]);
        fill_path(&mut board, &[(1, 0), (1, 1)]);
        // then the whole top row
        fill_path(&mut board, &[(1, 0), (0, 0), (0, 1), (0, 2), (1, 2)]);
        fill_path(&mut board, &[(0, 1), (1, 1), (1, 2)]);
        insta::assert_snapshot!(format_board(&board), @r"
+   +   +

+---+   +
|###|
+---+   +

+   +   +
");
    }
}
