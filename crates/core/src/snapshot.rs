//! Snapshot module - read-only render view
//!
//! Copies the locked board and paints the active piece over it, clipped to
//! visible cells, so hosts never observe a half-applied transition.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::{Cell, PieceKind, Status, BOARD_HEIGHT, BOARD_WIDTH};

pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub col: i8,
    pub row: i8,
    /// Absolute (col, row) of each occupied cell, including rows above the board
    pub cells: ArrayVec<(i8, i8), 16>,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind,
            col: value.col,
            row: value.row,
            cells: value.board_cells(),
        }
    }
}

/// Everything a host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Locked cells only
    pub board: Grid,
    /// Locked cells with the active piece drawn on top (visible cells only)
    #[serde(rename = "activePieceOverlay")]
    pub overlay: Grid,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub status: Status,
}

impl Snapshot {
    pub fn capture(board: &Board, active: Option<&Piece>, score: u32, status: Status) -> Self {
        let mut grid: Grid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_grid(&mut grid);

        let mut overlay = grid;
        if let Some(piece) = active {
            let color = Some(piece.color());
            for (col, row) in piece.board_cells() {
                if (0..BOARD_HEIGHT as i8).contains(&row) && (0..BOARD_WIDTH as i8).contains(&col)
                {
                    overlay[row as usize][col as usize] = color;
                }
            }
        }

        Self {
            board: grid,
            overlay,
            active: active.map(ActiveSnapshot::from),
            score,
            status,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::capture(&Board::new(), None, 0, Status::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn overlay_draws_visible_cells_only() {
        let mut board = Board::new();
        board.set(0, 19, Some(Color::Red));
        let piece = Piece::spawn(PieceKind::J).translated(0, -1);

        let snap = Snapshot::capture(&board, Some(&piece), 0, Status::Playing);

        assert_eq!(snap.board[19][0], Some(Color::Red));
        assert_eq!(snap.overlay[19][0], Some(Color::Red));
        // J bottom row lands on row 0, columns 4..=6.
        assert_eq!(snap.overlay[0][4], Some(Color::Blue));
        assert_eq!(snap.overlay[0][6], Some(Color::Blue));
        assert_eq!(snap.board[0][4], None);
        assert_eq!(snap.active.as_ref().unwrap().cells.len(), 4);
    }

    #[test]
    fn default_snapshot_is_idle_and_empty() {
        let snap = Snapshot::default();
        assert_eq!(snap.status, Status::Idle);
        assert!(snap.active.is_none());
        assert!(snap.overlay.iter().flatten().all(|c| c.is_none()));
    }
}
