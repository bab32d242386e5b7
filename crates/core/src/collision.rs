//! Placement validity - the single collision authority
//!
//! Every move, rotation, spawn and drop asks [`is_valid_placement`] before it
//! commits. Cells above the visible grid (negative rows) are always allowed;
//! they are only checked once they enter the board.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Check whether `piece` shifted by (dx, dy) fits on `board`.
///
/// A placement is invalid when any occupied cell lands outside `[0, W)`
/// horizontally, at or below row `H`, or on an occupied board cell.
pub fn is_valid_placement(piece: &Piece, board: &Board, dx: i8, dy: i8) -> bool {
    fits(piece, board, dx as i16, dy as i16)
}

fn fits(piece: &Piece, board: &Board, dx: i16, dy: i16) -> bool {
    piece.shape.cells().iter().all(|&(r, c)| {
        let col = piece.col as i16 + c as i16 + dx;
        let row = piece.row as i16 + r as i16 + dy;

        if col < 0 || col >= BOARD_WIDTH as i16 || row >= BOARD_HEIGHT as i16 {
            return false;
        }
        row < 0 || !board.is_occupied(col as i8, row as i8)
    })
}

/// Largest `dy >= 0` such that every offset `0..=dy` is a valid placement.
///
/// Returns None when the piece is not valid where it stands. A piece parked
/// far above the board can fall further than `i8` reaches, hence `i16`.
pub fn drop_distance(piece: &Piece, board: &Board) -> Option<i16> {
    if !fits(piece, board, 0, 0) {
        return None;
    }
    // The top edge can never reach row H, so this bounds the scan.
    let floor = BOARD_HEIGHT as i16 - piece.row as i16;
    let mut dy = 0;
    while dy < floor && fits(piece, board, 0, dy + 1) {
        dy += 1;
    }
    Some(dy)
}
