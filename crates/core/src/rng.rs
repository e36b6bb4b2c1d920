//! RNG module - injectable randomness for both engines
//!
//! Engines never reach for ambient randomness. They draw from a [`Randomizer`],
//! so a seeded [`SimpleRng`] replays the exact same game and tests can script
//! the draws they need.

use crate::types::PieceKind;

/// Source of random draws used by the engines
pub trait Randomizer {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniform pick among the seven tetrominoes
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// True with probability `numerator / denominator`
    fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.next_range(denominator) < numerator
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state, usable as a seed to fork an identical stream
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Randomizer for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of a power-of-two LCG cycle quickly; hand out the high half.
        self.state >> 16
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of raw values, cycling when exhausted
///
/// Handy when a caller needs an exact piece order or tile placement.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Script that yields the given pieces in order through [`Randomizer::next_piece`]
    pub fn pieces(kinds: &[PieceKind]) -> Self {
        let values = kinds
            .iter()
            .map(|kind| {
                PieceKind::ALL
                    .iter()
                    .position(|k| k == kind)
                    .unwrap_or_default() as u32
            })
            .collect();
        Self::new(values)
    }
}

impl Randomizer for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
