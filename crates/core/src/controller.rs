//! Game controller - owns one play session
//!
//! This module ties together the board, the falling piece, the piece generator
//! and the scoring rules, and sequences them through the phase machine:
//!
//! ```text
//! Title -> Playing <-> Paused
//!          Playing -> LineClearAnimation -> Playing
//!          Playing -> GameOver -> (retry) Playing
//! ```
//!
//! Every piece transform uses the same try-then-undo step: apply it, ask the
//! board whether the piece still fits, and apply the inverse if it does not.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::Board;
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_line_score, drop_interval_frames, reaches_next_level};
use crate::snapshot::GameSnapshot;
use crate::tetromino::Tetromino;
use crate::types::{GameAction, GamePhase, PieceKind};

/// Session options chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Stop in `LineClearAnimation` after a clearing lock until the host calls
    /// [`GameController::finish_line_clear`]. When off, clears apply at once.
    pub line_clear_animation: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            line_clear_animation: true,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameController {
    board: Board,
    current: Tetromino,
    next: Tetromino,
    held: Option<PieceKind>,
    pieces: PieceGenerator,
    phase: GamePhase,
    score: u32,
    high_score: u32,
    /// Best score known to be persisted; `take_new_record` compares against it.
    saved_record: u32,
    level: u32,
    lines: u32,
    frame_counter: u32,
    drop_interval: u32,
    can_hold: bool,
    clearing_rows: ArrayVec<usize, 4>,
    options: GameOptions,
}

impl GameController {
    /// Create a session on the title screen with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_options(seed, GameOptions::default())
    }

    pub fn with_options(seed: u32, options: GameOptions) -> Self {
        let mut pieces = PieceGenerator::new(seed);
        let current = Tetromino::new(pieces.draw());
        let next = Tetromino::new(pieces.draw());

        Self {
            board: Board::new(),
            current,
            next,
            held: None,
            pieces,
            phase: GamePhase::Title,
            score: 0,
            high_score: 0,
            saved_record: 0,
            level: 1,
            lines: 0,
            frame_counter: 0,
            drop_interval: drop_interval_frames(1),
            can_hold: true,
            clearing_rows: ArrayVec::new(),
            options,
        }
    }

    /// Seed the high score loaded by the host
    pub fn with_high_score(mut self, high_score: u32) -> Self {
        self.high_score = high_score;
        self.saved_record = high_score;
        self
    }

    /// Begin from a prepared board instead of an empty one
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Tetromino {
        self.current
    }

    pub fn next(&self) -> Tetromino {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Frames between automatic drops at the current level
    pub fn drop_interval(&self) -> u32 {
        self.drop_interval
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    /// Rows waiting to be removed while in `LineClearAnimation`
    pub fn clearing_rows(&self) -> &[usize] {
        &self.clearing_rows
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn seed(&self) -> u32 {
        self.pieces.seed()
    }

    /// Where the current piece would land.
    ///
    /// Derived from the current piece and the board on every call; `None`
    /// when no piece is falling (the locked piece during a line clear
    /// animation is already part of the board).
    pub fn ghost(&self) -> Option<Tetromino> {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::Paused) {
            return None;
        }
        let mut ghost = self.current;
        drop_to_floor(&self.board, &mut ghost);
        Some(ghost)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.current = self.current;
        out.next = self.next;
        out.ghost = self.ghost();
        out.held = self.held;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.high_score = self.high_score;
        out.level = self.level;
        out.lines = self.lines;
        out.phase = self.phase;
        out.clearing_rows.clear();
        for &row in &self.clearing_rows {
            out.clearing_rows.push(row as u8);
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Leave the title screen and start playing the pieces dealt at construction
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Title {
            return false;
        }
        self.phase = GamePhase::Playing;
        info!(seed = self.pieces.seed(), "game started");

        if !self.board.can_place(&self.current) {
            self.top_out();
        }
        true
    }

    /// Start a fresh session on an empty board
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.frame_counter = 0;
        self.level = 1;
        self.drop_interval = drop_interval_frames(1);
        self.held = None;
        self.can_hold = true;
        self.clearing_rows.clear();
        self.current = Tetromino::new(self.pieces.draw());
        self.next = Tetromino::new(self.pieces.draw());
        self.phase = GamePhase::Playing;
        info!(high_score = self.high_score, "game reset");
    }

    /// Advance one frame. Only has an effect while playing.
    ///
    /// Returns true when the piece moved or locked this frame.
    pub fn update(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }

        self.frame_counter += 1;
        if self.frame_counter < self.drop_interval {
            return false;
        }
        self.frame_counter = 0;

        if !self.move_down() {
            self.lock_current();
        }
        true
    }

    /// Apply an input action for the current phase
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match (self.phase, action) {
            (_, GameAction::Quit) => false,
            (GamePhase::Title, GameAction::Confirm) => self.start(),
            (GamePhase::GameOver, GameAction::Retry | GameAction::Confirm) => {
                self.reset();
                true
            }
            (GamePhase::Playing, GameAction::Pause) => {
                self.phase = GamePhase::Paused;
                true
            }
            (GamePhase::Paused, GameAction::Pause) => {
                self.phase = GamePhase::Playing;
                true
            }
            (GamePhase::Playing, action) => self.apply_play_action(action),
            _ => false,
        }
    }

    fn apply_play_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.move_down(),
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.rotate(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::Hold => self.hold(),
            GameAction::Pause | GameAction::Confirm | GameAction::Retry | GameAction::Quit => {
                false
            }
        }
    }

    // Piece operations below act on the current piece regardless of phase;
    // `apply_action` is the phase-aware entry point.

    pub fn move_left(&mut self) -> bool {
        self.try_shift(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_shift(1, 0)
    }

    pub fn move_down(&mut self) -> bool {
        self.try_shift(0, 1)
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        self.current.shift(dx, dy);
        if self.board.can_place(&self.current) {
            return true;
        }
        self.current.shift(-dx, -dy);
        false
    }

    /// Rotate clockwise; rejected as a whole when the result does not fit
    pub fn rotate(&mut self) -> bool {
        self.current.rotate_cw();
        if self.board.can_place(&self.current) {
            return true;
        }
        self.current.rotate_ccw();
        false
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.current.rotate_ccw();
        if self.board.can_place(&self.current) {
            return true;
        }
        self.current.rotate_cw();
        false
    }

    /// Drop the current piece as far as it goes and lock it.
    ///
    /// Returns the number of rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        let rows = drop_to_floor(&self.board, &mut self.current);
        self.lock_current();
        rows
    }

    /// Put the current piece aside, at most once per spawned piece.
    ///
    /// With an empty slot the next piece comes into play; otherwise the held
    /// piece swaps back in at its spawn position.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }

        match self.held.replace(self.current.kind) {
            Some(kind) => self.current = Tetromino::new(kind),
            None => self.promote_next(),
        }
        self.can_hold = false;
        debug!(held = ?self.held, current = ?self.current.kind, "hold");

        if !self.board.can_place(&self.current) {
            self.top_out();
        }
        true
    }

    /// Bring the next piece into play and deal a new next piece.
    ///
    /// Returns false and ends the game when the new piece does not fit.
    pub fn spawn_next(&mut self) -> bool {
        self.promote_next();
        self.can_hold = true;

        if !self.board.can_place(&self.current) {
            self.top_out();
            return false;
        }
        true
    }

    fn promote_next(&mut self) {
        self.current = self.next.respawned();
        self.next = Tetromino::new(self.pieces.draw());
    }

    fn top_out(&mut self) {
        self.phase = GamePhase::GameOver;
        info!(
            score = self.score,
            level = self.level,
            lines = self.lines,
            "game over"
        );
    }

    /// Lock the current piece into the board and handle full rows
    fn lock_current(&mut self) {
        self.board.place(&self.current);

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn_next();
            return;
        }

        if self.options.line_clear_animation {
            debug!(rows = ?rows.as_slice(), "line clear animation");
            self.clearing_rows = rows;
            self.phase = GamePhase::LineClearAnimation;
            return;
        }

        self.apply_line_clear();
    }

    /// End the line clear animation: remove the rows, score them and spawn.
    ///
    /// Returns false outside `LineClearAnimation`.
    pub fn finish_line_clear(&mut self) -> bool {
        if self.phase != GamePhase::LineClearAnimation {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.apply_line_clear();
        true
    }

    fn apply_line_clear(&mut self) {
        let cleared = self.board.clear_lines() as u32;
        self.clearing_rows.clear();
        self.award_lines(cleared);
        self.spawn_next();
    }

    fn award_lines(&mut self, cleared: u32) {
        if cleared == 0 {
            return;
        }

        // Points use the level the lines were cleared at.
        let points = calculate_line_score(cleared, self.level);
        self.score = self.score.saturating_add(points);

        self.lines += cleared;
        if reaches_next_level(self.lines) {
            self.level += 1;
            self.drop_interval = drop_interval_frames(self.level);
            info!(level = self.level, drop_interval = self.drop_interval, "level up");
        }

        self.high_score = self.high_score.max(self.score);
        debug!(cleared, points, score = self.score, lines = self.lines, "lines cleared");
    }

    /// The best score reached, once, if it beats the persisted record.
    ///
    /// The host calls this at session boundaries and saves the value. A record
    /// not yet taken survives `reset`.
    pub fn take_new_record(&mut self) -> Option<u32> {
        if self.high_score <= self.saved_record {
            return None;
        }
        self.saved_record = self.high_score;
        Some(self.high_score)
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Lower `piece` until one more row would collide. Returns rows dropped.
fn drop_to_floor(board: &Board, piece: &mut Tetromino) -> u32 {
    let mut rows = 0;
    loop {
        piece.shift(0, 1);
        if !board.can_place(piece) {
            piece.shift(0, -1);
            return rows;
        }
        rows += 1;
    }
}
