//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and state. It has no dependencies on
//! terminals, clocks or I/O, so the same seed always produces the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, row clearing and surface metrics
//! - [`piece`]: shape matrices and clockwise rotation
//! - [`collision`]: the single legality test and landing-row simulation
//! - [`rng`]: injectable piece randomness
//! - [`scoring`]: line, combo and hard drop points, level speed
//! - [`game_state`]: lifecycle, commands and events
//! - [`snapshot`]: read-only view for renderers and reports
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly among the seven kinds
//! - Rotation is clockwise only, with no wall kicks
//! - Locking happens on the first soft drop that cannot descend
//! - Game over is detected only when a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use auto_tetris_core::GameState;
//! use auto_tetris_core::types::Command;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::Rotate);
//! game.apply(Command::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! Timing lives outside this crate; a scheduler calls
//! [`GameState::soft_drop`] whenever the drop interval elapses.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use auto_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use collision::{collides, is_grounded, landing_row, simulate_hard_drop};
pub use game_state::GameState;
pub use piece::{Shape, Tetromino, MAX_SHAPE_SIZE};
pub use rng::{RandomSource, ScriptedSource, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
