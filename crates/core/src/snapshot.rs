use serde::Serialize;

use crate::pieces::PieceView;
use crate::stats::SessionStats;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Everything a renderer needs after an engine operation
///
/// A snapshot is a detached copy: writing to it never reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Settled cells, 0 for empty, otherwise the piece code
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Falling piece; `None` once the game is over
    pub current: Option<PieceView>,
    pub next: PieceView,
    pub held: Option<PieceView>,
    /// Landing row of the current piece (ghost projection)
    pub ghost_y: Option<i8>,
    pub can_hold: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub drop_interval_ms: u32,
    pub stats: SessionStats,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Number of settled cells in the snapshot grid
    pub fn filled_cells(&self) -> usize {
        self.board
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c != 0)
            .count()
    }
}
