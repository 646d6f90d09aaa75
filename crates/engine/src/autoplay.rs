//! Autoplay executor.
//!
//! Turns a [`Placement`] into discrete commands, one per call to
//! [`Autoplay::step`]: rotations first, then single-column moves toward the
//! target, then a hard drop. The search runs again only when a different piece
//! is under control.

use log::debug;

use auto_tetris_core::{GameState, Shape};
use auto_tetris_types::{Command, Outcome};

use crate::evaluator::Weights;
use crate::search::{find_best_placement_with, Placement};

/// Identity of a controlled piece: spawn id, color and spawn shape.
///
/// Rotating the piece does not change it, so a plan survives its own rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub piece_id: u32,
    pub color_id: u8,
    pub spawn_shape: Shape,
}

impl Fingerprint {
    /// Fingerprint of the piece currently under control, if any.
    pub fn of(game: &GameState) -> Option<Self> {
        let piece = game.current()?;
        Some(Self {
            piece_id: game.piece_id(),
            color_id: piece.color_id(),
            spawn_shape: Shape::spawn(piece.kind),
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    fingerprint: Fingerprint,
    placement: Placement,
    rotations_left: u8,
    column: i8,
}

#[derive(Debug, Clone, Default)]
pub struct Autoplay {
    weights: Weights,
    plan: Option<Plan>,
    placements: u32,
}

impl Autoplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Placement currently being executed.
    pub fn target(&self) -> Option<Placement> {
        self.plan.map(|p| p.placement)
    }

    /// Pieces hard-dropped by the executor so far.
    pub fn placements(&self) -> u32 {
        self.placements
    }

    /// Forget the current plan; the next step searches again.
    pub fn clear_plan(&mut self) {
        self.plan = None;
    }

    /// Issue one command toward the planned placement and return it.
    ///
    /// Returns `None` when there is no running game or no piece to control.
    pub fn step(&mut self, game: &mut GameState) -> Option<Command> {
        if !game.is_running() {
            return None;
        }
        let piece = game.current()?;
        let fingerprint = Fingerprint::of(game)?;

        let mut plan = match self.plan {
            Some(plan) if plan.fingerprint == fingerprint => plan,
            _ => {
                // Nothing fits at row 0: drop where the piece is.
                let placement = find_best_placement_with(game.board(), &piece, &self.weights)
                    .unwrap_or(Placement {
                        rotations: 0,
                        column: piece.x,
                        landing_row: piece.y,
                        score: i32::MIN,
                    });
                debug!(
                    "autoplay plan for piece {}: rot {} col {}",
                    fingerprint.piece_id, placement.rotations, placement.column
                );
                Plan {
                    fingerprint,
                    placement,
                    rotations_left: placement.rotations,
                    column: placement.column,
                }
            }
        };

        let command = if plan.rotations_left > 0 {
            // A rejected rotation still uses up its step.
            plan.rotations_left -= 1;
            Command::Rotate
        } else if piece.x < plan.column {
            Command::MoveRight
        } else if piece.x > plan.column {
            Command::MoveLeft
        } else {
            Command::HardDrop
        };

        let outcome = game.apply(command);
        match command {
            Command::HardDrop => {
                self.plan = None;
                if outcome.is_accepted() {
                    self.placements += 1;
                }
            }
            Command::MoveLeft | Command::MoveRight if outcome == Outcome::Rejected => {
                // Blocked short of the target column; drop from here next tick.
                plan.column = piece.x;
                self.plan = Some(plan);
            }
            _ => self.plan = Some(plan),
        }
        Some(command)
    }
}
