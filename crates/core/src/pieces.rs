//! Pieces module - tetromino catalog and matrix rotation
//!
//! Shapes are small rectangular occupancy matrices. Rotation is a plain
//! clockwise matrix transform: the bounding box swaps its dimensions and no
//! offset table is applied, so I, S and Z visibly shift when they turn.

use arrayvec::ArrayVec;

use crate::rng::PieceSource;
use crate::types::{Color, PieceKind, BOARD_WIDTH};

/// Largest bounding box side of any tetromino
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupied cell of a shape as (row, col) inside its bounding box
pub type ShapeCell = (u8, u8);

/// Rectangular occupancy matrix of a piece.
///
/// Cells outside `rows x cols` are always unoccupied, so derived equality
/// compares shapes by content and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a 0/1 grid (top row first).
    pub const fn from_grid<const R: usize, const C: usize>(grid: [[u8; C]; R]) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                bits[r][c] = grid[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            bits,
        }
    }

    /// Parse row strings of `#` (occupied) and `.` (empty).
    ///
    /// Returns None for empty, ragged, or larger than 4x4 patterns.
    pub fn from_pattern(pattern: &[&str]) -> Option<Self> {
        let rows = pattern.len();
        let cols = pattern.first().map(|r| r.len()).unwrap_or(0);
        if rows == 0 || rows > MAX_SHAPE_DIM || cols == 0 || cols > MAX_SHAPE_DIM {
            return None;
        }

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, line) in pattern.iter().enumerate() {
            if line.len() != cols {
                return None;
            }
            for (c, ch) in line.bytes().enumerate() {
                bits[r][c] = ch == b'#';
            }
        }

        Some(Self {
            rows: rows as u8,
            cols: cols as u8,
            bits,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Occupied cells in row-major order
    pub fn cells(&self) -> ArrayVec<ShapeCell, 16> {
        let mut out = ArrayVec::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.bits[r as usize][c as usize] {
                    out.push((r, c));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise.
    ///
    /// An R x C matrix becomes C x R with `out[j][R-1-i] = in[i][j]`.
    pub fn rotate_clockwise(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for i in 0..rows {
            for j in 0..cols {
                bits[j][rows - 1 - i] = self.bits[i][j];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }
}

/// Free-function form of [`Shape::rotate_clockwise`].
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    shape.rotate_clockwise()
}

const I_SHAPE: Shape = Shape::from_grid([[1, 1, 1, 1]]);
const O_SHAPE: Shape = Shape::from_grid([[1, 1], [1, 1]]);
const T_SHAPE: Shape = Shape::from_grid([[0, 1, 0], [1, 1, 1]]);
const S_SHAPE: Shape = Shape::from_grid([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Shape = Shape::from_grid([[1, 1, 0], [0, 1, 1]]);
const J_SHAPE: Shape = Shape::from_grid([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Shape = Shape::from_grid([[0, 0, 1], [1, 1, 1]]);

/// Base (spawn) orientation of each piece kind
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Active falling piece.
///
/// Immutable value: moves and rotations produce a new `Piece`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Column of the shape's left edge
    pub col: i8,
    /// Row of the shape's top edge (negative while entering from above)
    pub row: i8,
}

impl Piece {
    /// Base orientation, horizontally centered, top edge on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = base_shape(kind);
        let col = (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8;
        Self {
            kind,
            shape,
            col,
            row: 0,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Same piece shifted by (dx, dy)
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            col: self.col + dx,
            row: self.row + dy,
            ..*self
        }
    }

    /// Same piece moved down by a drop distance.
    ///
    /// `dy` must keep the piece on the board, as
    /// [`drop_distance`](crate::collision::drop_distance) guarantees.
    pub fn dropped(&self, dy: i16) -> Self {
        let row = (self.row as i16 + dy).clamp(i8::MIN as i16, i8::MAX as i16);
        Self {
            row: row as i8,
            ..*self
        }
    }

    /// Same anchor with a clockwise-rotated shape
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotate_clockwise(),
            ..*self
        }
    }

    /// Absolute (col, row) of every occupied cell; rows may be negative
    pub fn board_cells(&self) -> ArrayVec<(i8, i8), 16> {
        self.shape
            .cells()
            .iter()
            .map(|&(r, c)| (self.col + c as i8, self.row + r as i8))
            .collect()
    }
}

/// Draw a uniformly random kind from `source` and build its spawn piece.
pub fn spawn(source: &mut impl PieceSource) -> Piece {
    Piece::spawn(source.next_kind())
}
