//! Board module - the fixed-size occupancy grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color of a
//! locked piece. Uses a flat array so the whole board is a cheap `Copy` value:
//! every transform returns a new board and leaves its input untouched.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges
//! 0..19 (top to bottom).

use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Copy of this board with one cell changed (out-of-bounds writes are dropped).
    pub fn with_cell(mut self, col: i8, row: i8, cell: Cell) -> Self {
        self.set(col, row, cell);
        self
    }

    /// Check if (col, row) is within bounds and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Borrow one row of cells, left to right
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = row * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill an entire row with one color (handy for seeding boards)
    pub fn fill_row(&mut self, row: i8, color: Color) {
        for col in 0..BOARD_WIDTH as i8 {
            self.set(col, row, Some(color));
        }
    }

    /// Create from a 2D grid (row-major, top row first)
    ///
    /// Returns None if the grid does not have exactly 20 rows of 10 cells.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        if rows.len() != BOARD_HEIGHT as usize
            || rows.iter().any(|row| row.len() != BOARD_WIDTH as usize)
        {
            return None;
        }

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Some(Self { cells: flat })
    }

    /// Convert to a 2D grid (row-major, top row first)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Copy the grid into a fixed 2D array (used by snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Drop every full row and pad with empty rows at the top.
    ///
    /// Uses a two-pointer compaction from the bottom up; remaining rows keep
    /// their relative order. Returns the number of rows removed.
    pub(crate) fn compact_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut removed = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                removed += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        removed
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
        assert_eq!(Board::index(0, -1), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();
        board.set(0, 0, Some(Color::Cyan));
        board.set(5, 10, Some(Color::Purple));

        assert_eq!(board.get(0, 0), Some(Some(Color::Cyan)));
        assert_eq!(board.get(5, 10), Some(Some(Color::Purple)));
        assert_eq!(board.cells[0], Some(Color::Cyan));
        assert_eq!(board.cells[10 * 10 + 5], Some(Color::Purple));
    }

    #[test]
    fn test_board_rows_roundtrip() {
        let mut rows = vec![vec![None; 10]; 20];
        rows[5][3] = Some(Color::Yellow);
        rows[10][7] = Some(Color::Orange);

        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn test_from_rows_rejects_wrong_dimensions() {
        assert!(Board::from_rows(&vec![vec![None; 10]; 19]).is_none());
        assert!(Board::from_rows(&vec![vec![None; 9]; 20]).is_none());
    }

    #[test]
    fn test_compact_keeps_order_and_pads_top() {
        let mut board = Board::new();
        board.fill_row(19, Color::Red);
        board.set(0, 18, Some(Color::Blue));
        board.fill_row(17, Color::Red);
        board.set(4, 16, Some(Color::Green));

        let removed = board.compact_full_rows();

        assert_eq!(removed, 2);
        assert_eq!(board.get(0, 19), Some(Some(Color::Blue)));
        assert_eq!(board.get(4, 18), Some(Some(Color::Green)));
        assert_eq!(board.occupied_count(), 2);
    }
}
