//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Human input and
//! the autoplay executor feed the game the same commands.

pub mod map;

pub use auto_tetris_types as types;

pub use map::{map_key, should_quit};
