//! Per-frame host logic between the controller, the animation and the store.
//!
//! Kept out of `main` so it runs headless in tests.

use tracing::{info, warn};

use crate::core::GameController;
use crate::store::ScoreStore;
use crate::term::LineClearAnimation;
use crate::types::{GameAction, GamePhase};

/// Save the session score if it is a new record. Returns true when saved.
pub fn persist_record(game: &mut GameController, store: &mut impl ScoreStore) -> bool {
    let Some(score) = game.take_new_record() else {
        return false;
    };
    match store.save(score) {
        Ok(()) => {
            info!(score, "new high score saved");
            true
        }
        Err(e) => {
            warn!(error = %e, "failed to save high score");
            false
        }
    }
}

/// Drives one game through fixed frames
#[derive(Debug, Default)]
pub struct FrameDriver {
    animation: LineClearAnimation,
    was_over: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame: gravity while playing, the countdown during a line
    /// clear, and a record save on the frame the game ends.
    pub fn step(&mut self, game: &mut GameController, store: &mut impl ScoreStore) {
        if game.phase() == GamePhase::LineClearAnimation {
            if !self.animation.is_running() {
                self.animation.start(game.clearing_rows());
            }
            if self.animation.tick() {
                game.finish_line_clear();
            }
        } else {
            game.update();
        }

        let over = game.phase() == GamePhase::GameOver;
        if over && !self.was_over {
            persist_record(game, store);
        }
        self.was_over = over;
    }

    /// Apply a player action. A pending record is saved before a game over
    /// screen is left, so a retry queued ahead of the next frame keeps it.
    pub fn apply_action(
        &mut self,
        game: &mut GameController,
        store: &mut impl ScoreStore,
        action: GameAction,
    ) -> bool {
        if game.phase() == GamePhase::GameOver {
            persist_record(game, store);
        }
        game.apply_action(action)
    }

    /// Whether clearing rows are highlighted this frame
    pub fn flash_on(&self) -> bool {
        !self.animation.is_running() || self.animation.flash_on()
    }

    pub fn animation(&self) -> &LineClearAnimation {
        &self.animation
    }
}
