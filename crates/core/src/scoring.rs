//! Scoring module - line clear points, leveling and gravity
//!
//! - A lock that clears N lines awards `LINE_SCORES[N] * level`.
//! - Level starts at 1 and rises by one when a clear leaves the cumulative
//!   line count on a multiple of `LINES_PER_LEVEL`. A clear that jumps over
//!   the multiple does not raise it.
//! - Gravity speeds up linearly with level down to a floor.

use crate::types::{
    BASE_DROP_FRAMES, DROP_STEP_FRAMES, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_FRAMES,
};

/// Points for clearing `lines` rows in one lock at `level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    if lines == 0 || lines as usize >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines as usize].saturating_mul(level)
}

/// Whether a clear that brought the line total to `lines` raises the level
pub fn reaches_next_level(lines: u32) -> bool {
    lines > 0 && lines % LINES_PER_LEVEL == 0
}

/// Frames between automatic drops at `level` (level 1 is the slowest)
pub fn drop_interval_frames(level: u32) -> u32 {
    let step = level.saturating_sub(1).saturating_mul(DROP_STEP_FRAMES);
    BASE_DROP_FRAMES.saturating_sub(step).max(MIN_DROP_FRAMES)
}
