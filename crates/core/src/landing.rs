//! Landing transforms - lock a piece into the board and clear full rows
//!
//! Both operations take their board by reference and return a fresh board, so
//! before/after states can be compared directly.

use crate::board::Board;
use crate::pieces::Piece;

/// Merge `piece` into a copy of `board`.
///
/// Cells above the visible grid are discarded. The input board is not
/// modified.
pub fn lock(piece: &Piece, board: &Board) -> Board {
    let mut out = *board;
    let color = Some(piece.color());
    for (col, row) in piece.board_cells() {
        if row >= 0 {
            out.set(col, row, color);
        }
    }
    out
}

/// Remove every full row, padding empty rows at the top.
///
/// Returns the new board and how many rows were removed (0 when none were
/// full).
pub fn clear_full_rows(board: &Board) -> (Board, usize) {
    let mut out = *board;
    let removed = out.compact_full_rows();
    (out, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_lock_leaves_input_untouched() {
        let board = Board::new();
        let piece = Piece::spawn(PieceKind::T).translated(0, 18);
        let locked = lock(&piece, &board);

        assert_eq!(board.occupied_count(), 0);
        assert_eq!(locked.occupied_count(), 4);
        assert_eq!(locked.get(5, 18), Some(Some(Color::Purple)));
        assert_eq!(locked.get(4, 19), Some(Some(Color::Purple)));
    }

    #[test]
    fn test_lock_drops_cells_above_board() {
        let piece = Piece::spawn(PieceKind::J).translated(0, -1);
        let locked = lock(&piece, &Board::new());

        // Top row of J is at row -1 and is discarded.
        assert_eq!(locked.occupied_count(), 3);
    }

    #[test]
    fn test_clear_without_full_rows_is_identity() {
        let mut board = Board::new();
        board.set(0, 19, Some(Color::Red));
        let (out, removed) = clear_full_rows(&board);
        assert_eq!(removed, 0);
        assert_eq!(out, board);
    }
}
