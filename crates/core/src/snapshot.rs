//! Read-only view of a game session handed to the presentation layer.

use arrayvec::ArrayVec;

use crate::tetromino::Tetromino;
use crate::types::{cell_from_code, Cell, GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells as codes (0 = empty, 1..=7 = kind)
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Tetromino,
    pub next: Tetromino,
    /// Landing position of `current`; `None` unless playing or paused
    pub ghost: Option<Tetromino>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub phase: GamePhase,
    /// Rows being flashed during `LineClearAnimation`, top to bottom
    pub clearing_rows: ArrayVec<u8, 4>,
}

impl GameSnapshot {
    /// Decoded board cell; `None` when out of range
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.board.get(y)?.get(x).map(|&code| cell_from_code(code))
    }

    pub fn is_clearing_row(&self, y: usize) -> bool {
        self.clearing_rows.iter().any(|&r| r as usize == y)
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: Tetromino::new(PieceKind::I),
            next: Tetromino::new(PieceKind::I),
            ghost: None,
            held: None,
            can_hold: true,
            score: 0,
            high_score: 0,
            level: 1,
            lines: 0,
            phase: GamePhase::Title,
            clearing_rows: ArrayVec::new(),
        }
    }
}
