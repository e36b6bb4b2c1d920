//! Scoring module - line clear points, combo factor and level curve
//!
//! Rules:
//! - A lock clearing `n` lines earns `LINE_SCORES[n] * level * (1 + combo / 10)`,
//!   where `level` and `combo` are the values in effect before that lock.
//! - The level is `lines / 10 + 1`; gravity speeds up by 100ms per level down to 50ms.
//!
//! Everything is integer math: the combo factor is applied in tenths and
//! truncated, so a whole number of points is always awarded.

use serde::Serialize;

use crate::types::{
    BASE_DROP_MS, COMBO_TENTHS_PER_STEP, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL,
    LINE_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreResult {
    /// Table points for the number of lines cleared
    pub base: u32,
    /// Points after level and combo factors
    pub total: u32,
}

/// Table points for clearing `lines` rows in one lock (0 outside 1..=4)
pub fn line_clear_base(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Calculate the points for a lock
///
/// `level` is 1-based; `combo` is the number of consecutive clearing locks
/// before this one.
pub fn calculate_score(lines: usize, level: u32, combo: u32) -> ScoreResult {
    let base = line_clear_base(lines);
    let factor_tenths = 10u64 + u64::from(combo) * u64::from(COMBO_TENTHS_PER_STEP);
    let total = u64::from(base) * u64::from(level) * factor_tenths / 10;
    ScoreResult {
        base,
        total: u32::try_from(total).unwrap_or(u32::MAX),
    }
}

/// Level for a running line total (level 1 until the tenth line)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval for a level in milliseconds, floored at the minimum
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
