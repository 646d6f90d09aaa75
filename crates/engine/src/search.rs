//! Greedy one-piece placement search.
//!
//! For the current piece every distinct rotation state is paired with every
//! anchor column in `-2..=W - cols + 2`. Candidates that collide at row 0 are
//! skipped; the rest are hard-dropped and locked on a copy of the board and
//! scored by the evaluator. The first best candidate wins ties, iterating
//! rotations then columns in ascending order.

use arrayvec::ArrayVec;
use log::{debug, trace};

use auto_tetris_core::{collides, landing_row, Board, Shape, Tetromino};
use auto_tetris_types::BOARD_WIDTH;

use crate::evaluator::{evaluate_with, Weights};

/// Columns of slack beyond each side of the board.
pub const COLUMN_SLACK: i8 = 2;

/// Distinct clockwise rotation states, starting with the current shape.
///
/// Stops at the first repeated shape, so an O yields a single state.
pub fn rotation_states(shape: Shape) -> ArrayVec<Shape, 4> {
    let mut states = ArrayVec::new();
    let mut cur = shape;
    for _ in 0..4 {
        if states.contains(&cur) {
            break;
        }
        states.push(cur);
        cur = cur.rotated_cw();
    }
    states
}

/// A chosen target for the current piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Clockwise rotations to apply from the piece's current shape.
    pub rotations: u8,
    /// Target anchor column.
    pub column: i8,
    pub landing_row: i8,
    pub score: i32,
}

pub fn find_best_placement(board: &Board, piece: &Tetromino) -> Option<Placement> {
    find_best_placement_with(board, piece, &Weights::default())
}

pub fn find_best_placement_with(
    board: &Board,
    piece: &Tetromino,
    weights: &Weights,
) -> Option<Placement> {
    let mut best: Option<Placement> = None;

    for (rotations, shape) in rotation_states(piece.shape).into_iter().enumerate() {
        let max_column = BOARD_WIDTH as i8 - shape.cols() as i8 + COLUMN_SLACK;
        for column in -COLUMN_SLACK..=max_column {
            let candidate = Tetromino {
                shape,
                x: column,
                y: 0,
                ..*piece
            };
            if collides(board, &candidate) {
                continue;
            }

            let row = landing_row(board, &candidate);
            let mut sim = board.clone();
            sim.lock(&Tetromino { y: row, ..candidate });
            let score = evaluate_with(&sim, weights);
            trace!(
                "{:?} rot {} col {} row {} -> {}",
                piece.kind,
                rotations,
                column,
                row,
                score
            );

            if best.map_or(true, |b| score > b.score) {
                best = Some(Placement {
                    rotations: rotations as u8,
                    column,
                    landing_row: row,
                    score,
                });
            }
        }
    }

    if let Some(p) = best {
        debug!(
            "best placement for {:?}: rot {} col {} score {}",
            piece.kind, p.rotations, p.column, p.score
        );
    }
    best
}
