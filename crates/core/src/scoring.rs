//! Scoring module
//!
//! Flat scoring: each lock adds `lines_cleared * LINE_CLEAR_POINTS`. Clearing
//! four rows at once is worth exactly four single clears.

use crate::types::LINE_CLEAR_POINTS;

/// Points for one lock event that cleared `lines` rows.
pub fn line_clear_score(lines: usize) -> u32 {
    (lines as u32).saturating_mul(LINE_CLEAR_POINTS)
}

/// Add lock points to a running score without ever wrapping.
pub fn add_score(score: u32, lines: usize) -> u32 {
    score.saturating_add(line_clear_score(lines))
}
