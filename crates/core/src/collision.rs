//! Collision and placement checks.
//!
//! [`collides`] is the single legality test used by moves, rotation, drops,
//! spawning and the autoplay search.

use crate::board::Board;
use crate::piece::Tetromino;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// True if any occupied cell of `piece` is outside `[0, W)` horizontally, at or
/// below the floor, or on an occupied board cell. Rows above the board never
/// collide on their own.
pub fn collides(board: &Board, piece: &Tetromino) -> bool {
    piece.cells().any(|(x, y)| {
        x < 0
            || x >= BOARD_WIDTH as i8
            || y >= BOARD_HEIGHT as i8
            || (y >= 0 && board.is_occupied(x, y))
    })
}

/// Row the piece would come to rest on if dropped straight down from its
/// current row. The board is not touched.
pub fn landing_row(board: &Board, piece: &Tetromino) -> i8 {
    let mut landed = *piece;
    while !collides(board, &landed.shifted(0, 1)) {
        landed.y += 1;
    }
    landed.y
}

/// Copy of `piece` moved to its landing row.
pub fn simulate_hard_drop(board: &Board, piece: &Tetromino) -> Tetromino {
    Tetromino {
        y: landing_row(board, piece),
        ..*piece
    }
}

/// True if the piece cannot move down any further.
pub fn is_grounded(board: &Board, piece: &Tetromino) -> bool {
    collides(board, &piece.shifted(0, 1))
}
