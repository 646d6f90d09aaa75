//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (core rules, autoplay search, terminal rendering, reports).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: column `BOARD_WIDTH / 2 - 2`, row 0
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal loop (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Drop interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Drop interval floor |
//! | `AUTOPLAY_TICK_MS` | 200 | Period of the autoplay command timer |
//! | `AUTOPLAY_SPEEDUP` | 10 | Drop interval divisor while autoplay is on |
//! | `AUTOPLAY_DROP_FLOOR_MS` | 50 | Drop interval floor while autoplay is on |
//!
//! # Examples
//!
//! ```
//! use auto_tetris_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color_id(), 6);
//! assert_eq!(PieceKind::from_color_id(1), Some(PieceKind::I));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Anchor column of a freshly spawned piece
pub const SPAWN_COLUMN: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Frame interval for the terminal loop (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Drop interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 100;

/// Drop interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Period of the autoplay command timer
pub const AUTOPLAY_TICK_MS: u32 = 200;

/// Drop interval divisor while autoplay is enabled
pub const AUTOPLAY_SPEEDUP: u32 = 10;

/// Drop interval floor while autoplay is enabled
pub const AUTOPLAY_DROP_FLOOR_MS: u32 = 50;

/// Line clear scoring table, multiplied by the current level.
///
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Combo bonus base (`COMBO_BASE * combo * level` once the combo exceeds 1)
pub const COMBO_BASE: u32 = 50;

/// Points awarded for each manual soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points awarded per row descended by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// The seven tetromino piece kinds
///
/// Each kind carries a fixed color id that is written into the board when the
/// piece locks:
/// - **I**: 1, cyan
/// - **J**: 2, blue
/// - **L**: 3, orange
/// - **O**: 4, yellow
/// - **S**: 5, green
/// - **T**: 6, purple
/// - **Z**: 7, red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, ordered by color id.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color id stored in shape matrices and board cells (1..=7).
    pub fn color_id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]. Returns `None` for 0 and unknown ids.
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }
}

/// Commands accepted by the game state machine.
///
/// Human input and the autoplay executor issue the same commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// Leave `Idle` and spawn the first piece
    Start,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop piece one row, locking if it cannot descend
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Toggle pause
    Pause,
    /// Return to `Idle` with a fresh board
    Reset,
    /// Toggle the autoplay search
    ToggleAutoplay,
}

/// Lifecycle phase of a game.
///
/// `Idle → Running ⇄ Paused`, `Running → Over`; only a reset leaves `Over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    Over,
}

/// Notifications emitted by the game for rendering/audio collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    PieceSpawned { kind: PieceKind },
    PieceMoved { dx: i8 },
    PieceRotated,
    /// Hard drop finished descending; `rows` were awarded at 2 points each.
    HardDropped { rows: u32 },
    PieceLocked { kind: PieceKind },
    LinesCleared { count: u32 },
    LevelUp { level: u32 },
    ComboAchieved { combo: u32 },
    GameOver { final_score: u32 },
    Paused,
    Resumed,
    AutoplayChanged { enabled: bool },
}

/// Outcome of a command.
///
/// Rejection is a normal game-rule result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Accepted,
    Rejected,
}

impl Outcome {
    pub fn is_accepted(self) -> bool {
        self == Outcome::Accepted
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, colored by the piece kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_ids_round_trip_and_are_one_based() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color_id() as usize, i + 1);
            assert_eq!(PieceKind::from_color_id(kind.color_id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_color_id(0), None);
        assert_eq!(PieceKind::from_color_id(8), None);
    }

    #[test]
    fn spawn_column_is_centered() {
        assert_eq!(SPAWN_COLUMN, 3);
    }
}
