//! Tetris core - pure, deterministic, and testable
//!
//! This crate contains the Tetris rules and state machine. It has **no
//! dependency** on rendering, input devices, timers or storage, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Randomness is injected, so tests script exact piece orders
//! - **Portable**: Any driver (terminal, browser, headless) can sit on top
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 settled grid with single-pass line clearing
//! - [`pieces`]: Tetromino matrices and clockwise rotation
//! - [`rng`]: The [`Randomizer`] seam, a seeded LCG and a scripted source
//! - [`scoring`]: Line clear table, combo factor, level and gravity curve
//! - [`grid_engine`]: The [`GridEngine`] state machine
//! - [`snapshot`]: Detached renderer view
//! - [`stats`]: Session counters and stat bar formatting
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each new piece is one of the seven kinds with equal odds
//! - **Rotation**: clockwise only, no wall kicks; a blocked rotation is refused
//! - **Hold**: one stashed piece, usable once per lock
//! - **Scoring**: 100/300/500/800 for 1-4 lines, times level, times `1 + combo/10`
//! - **Level**: `lines / 10 + 1`; gravity 1000ms at level 1, 100ms faster per level, 50ms floor
//!
//! # Example
//!
//! ```
//! use arcade_core::{GridEngine, TickOutcome};
//! use arcade_core::types::GameAction;
//!
//! let mut game = GridEngine::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! assert_eq!(game.soft_tick(), TickOutcome::Fell);
//!
//! let drop = game.hard_drop().unwrap();
//! assert_eq!(drop.event.lines_cleared, 0);
//! assert_eq!(game.stats().total_pieces, 1);
//! ```

pub mod board;
pub mod grid_engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stats;

pub use arcade_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use grid_engine::{DropResult, GridEngine, LockEvent, Phase, TickOutcome};
pub use pieces::{Piece, PieceView, Shape};
pub use rng::{Randomizer, ScriptedRng, SimpleRng};
pub use scoring::{calculate_level, calculate_score, drop_interval_ms, ScoreResult};
pub use snapshot::GameSnapshot;
pub use stats::SessionStats;
