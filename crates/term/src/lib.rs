//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget toolkits and renders into a plain framebuffer that is flushed to
//! the terminal as a diff.
//!
//! - [`game_view`]: snapshot to framebuffer, pure
//! - [`renderer`]: framebuffer to terminal, via `crossterm`
//! - [`animation`]: the line clear countdown the host drives each frame

pub mod animation;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use animation::LineClearAnimation;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
