//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The mapping
//! is phase-agnostic; the controller decides what an action means in the
//! current phase.

pub mod map;

pub use blocktris_types as types;

pub use map::{accepts_kind, map_key_event};
