//! Grid module - the 4x4 numeric board and the line slide/merge rule
//!
//! A shift is computed line by line. Each line is read so that index 0 is the
//! edge tiles travel towards; [`slide_line`] then works the same way for all
//! four directions.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Direction, MERGE_GRID_SIZE};

const N: usize = MERGE_GRID_SIZE;

/// One row or column, index 0 at the destination edge
pub type Line = [u32; N];

/// A merge inside one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineMerge {
    /// Value of the tile produced by the merge
    pub value: u32,
    /// Index of the produced tile in the slid line
    pub offset: usize,
}

/// Result of sliding one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideResult {
    pub line: Line,
    pub merges: ArrayVec<LineMerge, 2>,
    /// Sum of all produced tiles
    pub gained: u32,
}

/// Slide a line towards index 0
///
/// Zeros are squeezed out, then adjacent equal pairs merge once each, scanning
/// from the destination edge. A tile produced by a merge never merges again in
/// the same slide.
///
/// ```
/// use arcade_merge::grid::slide_line;
///
/// assert_eq!(slide_line([2, 2, 0, 0]).line, [4, 0, 0, 0]);
/// assert_eq!(slide_line([2, 2, 2, 2]).line, [4, 4, 0, 0]);
/// assert_eq!(slide_line([4, 0, 4, 8]).line, [8, 8, 0, 0]);
/// ```
pub fn slide_line(line: Line) -> SlideResult {
    let tiles: ArrayVec<u32, N> = line.iter().copied().filter(|&v| v != 0).collect();

    let mut out: Line = [0; N];
    let mut merges = ArrayVec::new();
    let mut gained = 0u32;
    let mut write = 0usize;
    let mut read = 0usize;

    while read < tiles.len() {
        let value = tiles[read];
        if read + 1 < tiles.len() && tiles[read + 1] == value {
            let merged = value.saturating_mul(2);
            out[write] = merged;
            merges.push(LineMerge {
                value: merged,
                offset: write,
            });
            gained = gained.saturating_add(merged);
            read += 2;
        } else {
            out[write] = value;
            read += 1;
        }
        write += 1;
    }

    SlideResult {
        line: out,
        merges,
        gained,
    }
}

/// The 4x4 board, row-major, 0 for empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Grid {
    cells: [[u32; N]; N],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: [[u32; N]; N]) -> Self {
        Self { cells: rows }
    }

    pub fn rows(&self) -> &[[u32; N]; N] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, value: u32) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Board coordinates of `offset` along line `index` for a direction
    pub fn position(direction: Direction, index: usize, offset: usize) -> (usize, usize) {
        match direction {
            Direction::Left => (index, offset),
            Direction::Right => (index, N - 1 - offset),
            Direction::Up => (offset, index),
            Direction::Down => (N - 1 - offset, index),
        }
    }

    /// Read line `index` with index 0 at the destination edge
    pub fn line(&self, direction: Direction, index: usize) -> Line {
        let mut line = [0; N];
        for (offset, slot) in line.iter_mut().enumerate() {
            let (row, col) = Self::position(direction, index, offset);
            *slot = self.cells[row][col];
        }
        line
    }

    /// Write back a line read with [`Grid::line`]
    pub fn set_line(&mut self, direction: Direction, index: usize, line: Line) {
        for (offset, &value) in line.iter().enumerate() {
            let (row, col) = Self::position(direction, index, offset);
            self.cells[row][col] = value;
        }
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> ArrayVec<(usize, usize), { N * N }> {
        let mut out = ArrayVec::new();
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == 0 {
                    out.push((row, col));
                }
            }
        }
        out
    }

    pub fn tile_count(&self) -> usize {
        N * N - self.empty_cells().len()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells
            .iter()
            .flat_map(|r| r.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// Whether any shift can still change the board
    ///
    /// True when a cell is empty or two orthogonal neighbours are equal.
    pub fn has_moves(&self) -> bool {
        for row in 0..N {
            for col in 0..N {
                let value = self.cells[row][col];
                if value == 0 {
                    return true;
                }
                if col + 1 < N && self.cells[row][col + 1] == value {
                    return true;
                }
                if row + 1 < N && self.cells[row + 1][col] == value {
                    return true;
                }
            }
        }
        false
    }

    /// Whether shifting in `direction` would change anything
    pub fn can_shift(&self, direction: Direction) -> bool {
        (0..N).any(|index| {
            let line = self.line(direction, index);
            slide_line(line).line != line
        })
    }
}
