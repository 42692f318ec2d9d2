//! Scoring module - line clear points and gravity speed curve
//!
//! - A lock that clears N lines awards `LINE_SCORES[N]` (N capped at 4).
//! - Gravity starts at 800ms per row and speeds up by 1ms for every 5 points,
//!   never dropping below the 100ms floor.

use crate::types::{BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, LINE_SCORES, SCORE_PER_MS};

/// Points for clearing `lines` lines with a single lock
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(4)]
}

/// Gravity interval (milliseconds per row) for a given score
pub fn get_drop_interval_ms(score: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(score / SCORE_PER_MS)
        .max(DROP_INTERVAL_FLOOR_MS)
}

/// Gravity interval in seconds, for display
pub fn drop_interval_secs(interval_ms: u32) -> f64 {
    interval_ms as f64 / 1000.0
}
