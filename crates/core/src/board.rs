//! Board module - manages the settled Tetris grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that settled there. Uses a flat array for cache locality and zero
//! allocation. Coordinates: (x, y) where x ranges 0..9 (left to right) and
//! y ranges 0..19 (top to bottom). Rows above the board (`y < 0`) are open sky.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices removed by one compaction pass
pub type ClearedRows = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may sit at (x, y)
    ///
    /// Columns must be inside the board and rows above the floor. Rows above the
    /// top edge are always free; rows on the board must be empty.
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows in a single compaction pass
    ///
    /// Returns the cleared row indices (as they were before compaction) in
    /// bottom-to-top scan order. Surviving rows keep their relative order and
    /// one empty row enters at the top for each row removed.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y as u8);
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

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Write a piece's cells onto the board
    ///
    /// Returns false without touching the board if any on-board cell is out of
    /// bounds or already settled. Cells above the top edge are dropped.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], kind: PieceKind) -> bool {
        if !cells.iter().all(|&(x, y)| self.is_free(x, y)) {
            return false;
        }

        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }

        true
    }

    /// Number of settled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row `y` as a slice
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Write board into a fixed-size u8 grid (0 = empty, otherwise [`PieceKind::code`])
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, out_row) in out.iter_mut().enumerate() {
            for (x, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.cells[y * BOARD_WIDTH as usize + x].map_or(0, |k| k.code());
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Build a board from text rows, bottom-aligned
    ///
    /// `'.'` or `' '` is empty, any other character settles an `I` cell. Rows
    /// shorter than the board are padded with empty cells.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len().min(BOARD_HEIGHT as usize);
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' && ch != ' ' {
                    board.set(x as i8, (top + i) as i8, Some(PieceKind::I));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
