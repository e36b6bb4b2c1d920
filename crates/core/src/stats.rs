//! Session statistics and the small formatting helpers used by stat bars.

use serde::Serialize;

/// Counters that only ever grow during one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionStats {
    /// Longest run of consecutive clearing locks
    pub max_combo: u32,
    /// Locks that cleared four lines at once
    pub tetris_count: u32,
    /// Pieces locked onto the board
    pub total_pieces: u32,
}

/// Format elapsed seconds as a zero-padded `MM:SS` clock
///
/// Minutes are not wrapped at an hour.
///
/// ```
/// use arcade_core::stats::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(75), "01:15");
/// assert_eq!(format_clock(3600), "60:00");
/// ```
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Group decimal digits in threes with commas
///
/// ```
/// use arcade_core::stats::group_thousands;
///
/// assert_eq!(group_thousands(0), "0");
/// assert_eq!(group_thousands(1234567), "1,234,567");
/// ```
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
