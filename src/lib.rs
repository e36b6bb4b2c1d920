//! Arcade grid engines (workspace facade crate).
//!
//! The engines live in dedicated crates under `crates/`; this package
//! re-exports them under one roof and adds the pieces that sit between an
//! engine and a frontend: gravity scheduling and headless autoplay.

pub mod autoplay;
pub mod driver;

pub use arcade_core as core;
pub use arcade_merge as merge;
pub use arcade_store as store;
pub use arcade_types as types;

pub use driver::TickDriver;
