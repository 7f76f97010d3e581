//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, session state and the per-frame
//! simulation. It never touches the terminal or the filesystem, so the same
//! seed always produces the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and line clearing
//! - [`pieces`]: static shape table, one 4x4 mask per kind and rotation
//! - [`tetromino`]: the falling piece (kind, rotation, anchor)
//! - [`rng`]: seedable uniform piece generator
//! - [`scoring`]: line points, level crossings and gravity speed
//! - [`controller`]: the session state machine driven by the host
//! - [`snapshot`]: read-only view for the renderer
//!
//! # Rules
//!
//! - Pieces spawn at column 3, row 0 and are drawn uniformly at random
//! - Rotation has no wall kicks; a blocked rotation is rejected
//! - Hard drop locks immediately; soft drop only moves one row
//! - Hold swaps once per spawned piece
//! - Clearing N lines scores `[0, 100, 300, 500, 800][N] * level`
//!
//! # Example
//!
//! ```
//! use blocktris_core::GameController;
//! use blocktris_types::{GameAction, GamePhase};
//!
//! let mut game = GameController::new(12345);
//! game.apply_action(GameAction::Confirm);
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // A single drop on an empty board clears nothing.
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! The host calls [`GameController::update`] once per 16ms frame. The piece
//! falls one row every `max(10, 60 - (level - 1) * 5)` frames.

pub mod board;
pub mod controller;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tetromino;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use controller::{GameController, GameOptions};
pub use pieces::{get_shape, shape_offsets, ShapeMask};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_line_score, drop_interval_frames, reaches_next_level};
pub use snapshot::GameSnapshot;
pub use tetromino::Tetromino;
