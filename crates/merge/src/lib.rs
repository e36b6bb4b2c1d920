//! 2048 core
//!
//! A 4x4 sliding merge board with a single-step undo. Like the Tetris core it
//! is synchronous and draws randomness only through
//! [`Randomizer`](arcade_core::rng::Randomizer), so seeded games replay.
//!
//! - [`grid`]: board storage, line orientation and the slide/merge rule
//! - [`engine`]: the [`MergeEngine`] state machine
//!
//! ```
//! use arcade_merge::MergeEngine;
//! use arcade_merge::types::Direction;
//!
//! let mut game = MergeEngine::new(2048);
//! let moved = Direction::ALL
//!     .into_iter()
//!     .any(|dir| game.shift(dir).moved);
//!
//! assert!(moved);
//! assert!(game.can_undo());
//! ```

pub mod engine;
pub mod grid;

pub use arcade_types as types;

pub use engine::{MergeEngine, MergeEvent, MergeSnapshot, MoveOutcome, TileSpawn};
pub use grid::{slide_line, Grid, Line, LineMerge, SlideResult};
