//! Line clear animation countdown.
//!
//! The controller stops in `LineClearAnimation` with the full rows still on
//! the board. The presentation side counts frames here and tells the host when
//! to call `finish_line_clear`.

use arrayvec::ArrayVec;

use crate::types::LINE_CLEAR_ANIMATION_FRAMES;

/// Frames per blink phase of the clearing rows
const FLASH_PERIOD: u32 = 3;

#[derive(Debug, Clone, Default)]
pub struct LineClearAnimation {
    total: u32,
    remaining: u32,
    rows: ArrayVec<usize, 4>,
}

impl LineClearAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin flashing `rows` for the standard duration
    pub fn start(&mut self, rows: &[usize]) {
        self.start_for(rows, LINE_CLEAR_ANIMATION_FRAMES);
    }

    pub fn start_for(&mut self, rows: &[usize], frames: u32) {
        self.rows.clear();
        self.rows.extend(rows.iter().copied().take(4));
        self.total = frames.max(1);
        self.remaining = self.total;
    }

    /// Advance one frame. Returns true on the frame the animation ends.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.rows.clear();
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Whether the clearing rows are drawn highlighted this frame
    pub fn flash_on(&self) -> bool {
        let elapsed = self.total - self.remaining;
        (elapsed / FLASH_PERIOD) % 2 == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
