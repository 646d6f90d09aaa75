//! Read-only view of a game for renderers and reports.

use serde::Serialize;

use crate::piece::{Shape, Tetromino};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for PieceSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    /// Absolute board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

/// Board cells hold color ids (0 = empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<PieceSnapshot>,
    pub ghost_row: Option<i8>,
    pub next: Option<PieceSnapshot>,
    pub phase: Phase,
    pub autoplay: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub pieces_locked: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    /// Effective auto-drop interval, autoplay speedup included.
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            ghost_row: None,
            next: None,
            phase: Phase::Idle,
            autoplay: false,
            episode_id: 0,
            piece_id: 0,
            pieces_locked: 0,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            drop_interval_ms: 0,
        }
    }
}
