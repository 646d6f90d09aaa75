//! Auto Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under stable module names so binaries,
//! benches and integration tests only depend on `auto_tetris::{core, engine, ...}`.

pub mod headless;

pub use auto_tetris_core as core;
pub use auto_tetris_engine as engine;
pub use auto_tetris_input as input;
pub use auto_tetris_term as term;
pub use auto_tetris_types as types;
