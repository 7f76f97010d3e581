//! Terminal runner.
//!
//! Reads settings from the environment, loads the high score, and drives the
//! game at a fixed frame rate with crossterm input and the framebuffer
//! renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::info;

use blocktris::config::Settings;
use blocktris::core::{GameController, GameOptions, GameSnapshot};
use blocktris::input::{accepts_kind, map_key_event};
use blocktris::logging;
use blocktris::session::{persist_record, FrameDriver};
use blocktris::store::{FileScoreStore, ScoreStore};
use blocktris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blocktris::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let settings = Settings::from_env();
    logging::init(&settings)?;

    let mut store = FileScoreStore::new(&settings.highscore_path);
    let high_score = store.load();
    let seed = settings.seed_or_clock();
    info!(seed, high_score, animations = settings.animations, "starting");

    let options = GameOptions {
        line_clear_animation: settings.animations,
    };
    let mut game = GameController::with_options(seed, options).with_high_score(high_score);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &mut store);

    // Always try to restore terminal state.
    let _ = term.exit();
    persist_record(&mut game, &mut store);
    info!(score = game.score(), "exiting");
    result
}

fn run(term: &mut TerminalRenderer, game: &mut GameController, store: &mut impl ScoreStore) -> Result<()> {
    let view = GameView::default();
    let mut driver = FrameDriver::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into_with_flash(&snap, driver.flash_on(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = map_key_event(key) {
                        if accepts_kind(key.kind, action) {
                            if action == GameAction::Quit {
                                return Ok(());
                            }
                            driver.apply_action(game, store, action);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            driver.step(game, store);
        }
    }
}
