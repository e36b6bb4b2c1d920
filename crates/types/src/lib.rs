//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by both engines and by any
//! driver or renderer sitting on top of them. All types are plain data; the
//! only dependency is `serde` so snapshots and events can carry them.
//!
//! # Board Dimensions
//!
//! - **Tetris**: 10 columns x 20 rows, origin at the top-left, `y` grows downwards
//! - **2048**: 4 x 4 numeric grid
//!
//! # Tetris Timing
//!
//! Gravity is a pure function of the level:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10 | 100ms |
//! | 11+ | 50ms (floor) |
//!
//! # Examples
//!
//! ```
//! use arcade_types::{Direction, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), "#a000f0");
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 50;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear base points, indexed by number of lines cleared in one lock.
///
/// The base is multiplied by the level and by the combo factor `(1 + combo / 10)`.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo bonus in tenths of the base score per combo step
pub const COMBO_TENTHS_PER_STEP: u32 = 1;

/// Side length of the 2048 grid
pub const MERGE_GRID_SIZE: usize = 4;

/// Tile value that wins a 2048 game
pub const WIN_TILE: u32 = 2048;

/// Chance (in tenths) that a spawned 2048 tile is a 2 rather than a 4
pub const TWO_TILE_TENTHS: u32 = 9;

/// The seven tetromino piece kinds
///
/// Each kind owns a fixed display color:
/// - **I**: Cyan bar
/// - **O**: Yellow square
/// - **T**: Purple
/// - **L**: Orange
/// - **J**: Blue
/// - **S**: Green
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in generation order. A uniform draw indexes into this table.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use arcade_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Display color written into the board when a piece of this kind locks
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "#00f5ff",
            PieceKind::O => "#ffff00",
            PieceKind::T => "#a000f0",
            PieceKind::L => "#ffa500",
            PieceKind::J => "#0000ff",
            PieceKind::S => "#00ff00",
            PieceKind::Z => "#ff0000",
        }
    }

    /// Compact cell code for grid snapshots (0 is reserved for empty)
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::L => 4,
            PieceKind::J => 5,
            PieceKind::S => 6,
            PieceKind::Z => 7,
        }
    }
}

/// A cell on the Tetris board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell settled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Discrete Tetris inputs a driver can dispatch
///
/// Pausing is not an engine action: a paused driver simply stops calling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Drop to the lowest valid row and lock
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Hold current piece (once per lock)
    Hold,
    /// Reset the game
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use arcade_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("pause"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}

/// Shift direction for the 2048 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_score_table_matches_arcade_rules() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn piece_codes_are_unique_and_non_zero() {
        let mut seen = [false; 8];
        for kind in PieceKind::ALL {
            let code = kind.code() as usize;
            assert!(code > 0);
            assert!(!seen[code], "duplicate code for {:?}", kind);
            seen[code] = true;
        }
    }

    #[test]
    fn piece_kind_string_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn action_names_parse_back() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::Rotate,
            GameAction::Hold,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn direction_accepts_short_names() {
        assert_eq!(Direction::from_str("u"), Some(Direction::Up));
        assert_eq!(Direction::from_str("Right"), Some(Direction::Right));
        assert_eq!(Direction::from_str("sideways"), None);
    }
}
