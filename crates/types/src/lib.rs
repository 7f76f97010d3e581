//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! from the simulation, the terminal front end and the input layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (3, 0), the top-left of the piece's 4x4 box
//!
//! # Frame Timing
//!
//! The simulation advances one frame per host tick. Gravity is measured in
//! frames, not milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `BASE_DROP_FRAMES` | 60 | Frames per row at level 1 |
//! | `DROP_STEP_FRAMES` | 5 | Frames removed per level |
//! | `MIN_DROP_FRAMES` | 10 | Fastest gravity |
//! | `LINE_CLEAR_ANIMATION_FRAMES` | 18 | Length of the clear flash |
//!
//! # Examples
//!
//! ```
//! use blocktris_types::{GamePhase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(PieceKind::T.index()), Some(PieceKind::T));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::West.index(), 3);
//!
//! assert!(GamePhase::Playing.is_active());
//! assert!(!GamePhase::GameOver.is_active());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column for every new piece
pub const SPAWN_X: i8 = 3;

/// Spawn anchor row for every new piece
pub const SPAWN_Y: i8 = 0;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Frames between automatic drops at level 1
pub const BASE_DROP_FRAMES: u32 = 60;

/// Frames shaved off the drop interval per level above 1
pub const DROP_STEP_FRAMES: u32 = 5;

/// Floor for the drop interval
pub const MIN_DROP_FRAMES: u32 = 10;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Frames the presentation flashes cleared rows before the clear is applied
pub const LINE_CLEAR_ANIMATION_FRAMES: u32 = 18;

/// Line clear scoring table, indexed by rows cleared in one lock.
///
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points (Tetris!)
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Index into shape and color tables (0..7)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`PieceKind::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Rotation states, numbered 0..=3 clockwise from the spawn orientation
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: One clockwise step (index 1)
/// - **South**: Two steps (index 2)
/// - **West**: Three steps (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (index + 1 mod 4)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (index + 3 mod 4)
    ///
    /// # Examples
    ///
    /// ```
    /// use blocktris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation index in 0..4
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation for an index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Game actions produced by the input layer
///
/// Which actions have an effect depends on the current [`GamePhase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to the lowest valid position and lock it
    HardDrop,
    /// Rotate piece one step clockwise
    RotateCw,
    /// Rotate piece one step counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawn)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a game from the title screen
    Confirm,
    /// Start over after game over
    Retry,
    /// Leave the game (handled by the host loop)
    Quit,
}

/// Finite game phase
///
/// `Title → Playing ⇄ Paused`, `Playing → GameOver`,
/// `Playing → LineClearAnimation → Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    Title,
    Playing,
    Paused,
    GameOver,
    LineClearAnimation,
}

impl GamePhase {
    /// Whether a session is in progress (neither title nor game over)
    pub fn is_active(self) -> bool {
        matches!(
            self,
            GamePhase::Playing | GamePhase::Paused | GamePhase::LineClearAnimation
        )
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
///
/// Board probes return `Option<Cell>`, where the outer `None` marks an
/// out-of-bounds coordinate.
pub type Cell = Option<PieceKind>;

/// Encode a cell as the `u8` used in snapshots (0 = empty, 1..=7 = kind)
pub fn cell_code(cell: Cell) -> u8 {
    match cell {
        None => 0,
        Some(kind) => kind.index() as u8 + 1,
    }
}

/// Inverse of [`cell_code`]; unknown codes decode as empty
pub fn cell_from_code(code: u8) -> Cell {
    match code {
        0 => None,
        n => PieceKind::from_index(n as usize - 1),
    }
}
