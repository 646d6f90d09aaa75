//! RNG module - injectable piece randomness
//!
//! The game draws pieces through the [`RandomSource`] trait so tests can script
//! exact sequences. The default source is a seedable LCG; pieces are chosen
//! uniformly among the seven kinds.

use crate::types::PieceKind;

/// Source of randomness for piece generation.
pub trait RandomSource {
    /// Uniform-ish value in `[0, bound)`. `bound` is never 0.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Draw a piece kind uniformly among the seven kinds.
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_below(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // Low LCG bits have short periods.
        (self.next_u32() >> 16) % bound.max(1)
    }
}

/// Cycles through a fixed list of piece kinds. Used for reproducible tests.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedSource {
    /// An empty list falls back to `I` pieces.
    pub fn new(kinds: Vec<PieceKind>) -> Self {
        let kinds = if kinds.is_empty() {
            vec![PieceKind::I]
        } else {
            kinds
        };
        Self { kinds, cursor: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_below(&mut self, bound: u32) -> u32 {
        let kind = self.next_kind();
        (kind.color_id() as u32 - 1) % bound.max(1)
    }

    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor = self.cursor.wrapping_add(1);
        kind
    }
}
