//! Terminal game renderer.
//!
//! Renders game snapshots into a simple framebuffer which is then flushed to
//! the terminal, rewriting only the cells that changed since the last frame.
//! No widget or layout library is involved; board cells are drawn two columns
//! wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use auto_tetris_core as core;
pub use auto_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
