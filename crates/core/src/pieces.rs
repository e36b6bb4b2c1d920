//! Pieces module - tetromino shapes as boolean matrices
//!
//! A shape is a small row-major matrix (at most 4x4) with exactly four filled
//! cells. Rotation is a plain clockwise matrix rotation (transpose, then reverse
//! each row) with no kick table: a rotation that does not fit where the piece
//! stands is rejected by the caller.

use serde::Serialize;

use crate::types::{PieceKind, BOARD_WIDTH};

/// Offset of a single mino relative to the piece anchor (top-left corner)
pub type MinoOffset = (i8, i8);

/// Largest side of any tetromino matrix
const MAX_SIDE: usize = 4;

/// A tetromino shape matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: [[bool; MAX_SIDE]; MAX_SIDE],
    width: u8,
    height: u8,
}

impl Shape {
    /// Spawn orientation of a piece kind
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[&[1, 1, 1, 1]]),
            PieceKind::O => Self::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::T => Self::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
            PieceKind::L => Self::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
            PieceKind::J => Self::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
            PieceKind::S => Self::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            PieceKind::Z => Self::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        }
    }

    fn from_rows(rows: &[&[u8]]) -> Self {
        let mut out = [[false; MAX_SIDE]; MAX_SIDE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                out[y][x] = v != 0;
            }
        }
        Self {
            rows: out,
            width: rows.first().map_or(0, |r| r.len()) as u8,
            height: rows.len() as u8,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the matrix cell at column `x`, row `y` is filled
    pub fn filled(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.rows[y][x]
    }

    /// Rotate 90° clockwise: row `i` of the result is column `i` read bottom-up
    pub fn rotated_cw(&self) -> Self {
        let w = self.width as usize;
        let h = self.height as usize;
        let mut out = [[false; MAX_SIDE]; MAX_SIDE];
        for (i, out_row) in out.iter_mut().enumerate().take(w) {
            for (j, cell) in out_row.iter_mut().enumerate().take(h) {
                *cell = self.rows[h - 1 - j][i];
            }
        }
        Self {
            rows: out,
            width: self.height,
            height: self.width,
        }
    }

    /// Offsets of the four filled cells, row-major
    pub fn minos(&self) -> [MinoOffset; 4] {
        let mut out = [(0, 0); 4];
        let mut n = 0;
        for y in 0..self.height as usize {
            for x in 0..self.width as usize {
                if self.rows[y][x] && n < out.len() {
                    out[n] = (x as i8, y as i8);
                    n += 1;
                }
            }
        }
        debug_assert_eq!(n, 4, "tetromino must have four cells");
        out
    }

    /// Rows of the matrix as booleans (for renderers)
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.height as usize)
            .map(|y| self.rows[y][..self.width as usize].to_vec())
            .collect()
    }
}

/// Column a piece of the given width spawns at: `floor(cols/2) - floor(width/2)`
pub fn spawn_x(width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (width / 2) as i8
}

/// A piece: shape, identity and anchor position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece of `kind` centered on the top row
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        Self {
            kind,
            shape,
            x: spawn_x(shape.width()),
            y: 0,
        }
    }

    /// The same piece (keeping its current orientation) moved back to spawn
    pub fn recentered(self) -> Self {
        Self {
            x: spawn_x(self.shape.width()),
            y: 0,
            ..self
        }
    }

    /// The piece translated by `(dx, dy)`
    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// The piece with its shape rotated clockwise around the same anchor
    pub fn rotated(self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..self
        }
    }

    /// Absolute board coordinates of the four filled cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape
            .minos()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }
}

/// Renderer-facing copy of a piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub kind: &'static str,
    pub color: &'static str,
    pub x: i8,
    pub y: i8,
    pub shape: Vec<Vec<bool>>,
}

impl From<Piece> for PieceView {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind.as_str(),
            color: piece.kind.color(),
            x: piece.x,
            y: piece.y,
            shape: piece.shape.to_rows(),
        }
    }
}
