//! Scoring module - line clears, combos, hard drops and level speed
//!
//! Rules:
//! - A clearing lock scores `LINE_SCORES[lines] * level`.
//! - Once the combo counter (already incremented for this lock) exceeds 1, a
//!   bonus of `COMBO_BASE * combo * level` is added.
//! - Hard drops award `HARD_DROP_POINTS_PER_ROW` per row descended.
//! - Level is `lines / 10 + 1`; the drop interval shrinks 100ms per level down
//!   to a 100ms floor.

use crate::types::{
    AUTOPLAY_DROP_FLOOR_MS, AUTOPLAY_SPEEDUP, BASE_DROP_MS, COMBO_BASE, DROP_INTERVAL_MIN_MS,
    DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL, LINE_SCORES,
};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the clear, excluding the combo bonus.
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    pub total: u32,
}

/// Line clear points for 1-4 lines at a 1-based level.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Combo bonus for the combo count after this lock.
pub fn calculate_combo_bonus(combo: u32, level: u32) -> u32 {
    if combo <= 1 {
        return 0;
    }
    COMBO_BASE.saturating_mul(combo).saturating_mul(level)
}

/// Complete score for a clearing lock.
///
/// `level` is the level before this clear is counted; `combo` already includes it.
pub fn calculate_score(lines: usize, level: u32, combo: u32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines, level);
    let combo_bonus = if lines > 0 {
        calculate_combo_bonus(combo, level)
    } else {
        0
    };
    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
    }
}

/// Hard drop points for `rows` rows descended.
pub fn calculate_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Drop interval for a level (in milliseconds): `max(100, 1000 - (level-1)*100)`
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}

/// Accelerated drop interval used while autoplay is enabled.
pub fn get_autoplay_drop_interval_ms(base_interval: u32) -> u32 {
    (base_interval / AUTOPLAY_SPEEDUP).max(AUTOPLAY_DROP_FLOOR_MS)
}
