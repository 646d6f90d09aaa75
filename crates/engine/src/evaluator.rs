//! Heuristic board evaluation.
//!
//! Scores a hypothetical board that already has a candidate piece locked in but
//! whose full rows have not been cleared yet. Higher is better. Completed lines
//! dominate every other term; height, holes and rough surfaces are penalised and
//! wells are rewarded because an I piece can exploit them.

use auto_tetris_core::Board;
use auto_tetris_types::BOARD_WIDTH;

/// Evaluator weights. Every weight is applied with the sign shown in
/// [`Weights::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub lines: i32,
    pub aggregate_height: i32,
    /// Extra penalty per unit of aggregate height above `height_threshold`.
    pub height_excess: i32,
    pub height_threshold: i32,
    pub holes: i32,
    pub bumpiness: i32,
    pub wells: i32,
    pub row_transitions: i32,
    pub col_transitions: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            lines: 10_000,
            aggregate_height: 5,
            height_excess: 20,
            height_threshold: 15,
            holes: 100,
            bumpiness: 10,
            wells: 20,
            row_transitions: 3,
            col_transitions: 3,
        }
    }
}

impl Weights {
    pub fn score(&self, f: &BoardFeatures) -> i32 {
        let height = f.aggregate_height as i32;
        self.lines * f.lines as i32
            - self.aggregate_height * height
            - self.height_excess * (height - self.height_threshold).max(0)
            - self.holes * f.holes as i32
            - self.bumpiness * f.bumpiness as i32
            + self.wells * f.well_depth_sum as i32
            - self.row_transitions * f.row_transitions as i32
            - self.col_transitions * f.col_transitions as i32
    }
}

/// Raw board measurements feeding the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    /// Full rows still present on the board.
    pub lines: u32,
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub well_depth_sum: u32,
    pub row_transitions: u32,
    pub col_transitions: u32,
}

impl BoardFeatures {
    pub fn measure(board: &Board) -> Self {
        let heights = board.column_heights();
        Self {
            lines: board.full_row_count(),
            aggregate_height: heights.iter().sum(),
            holes: board.count_holes(),
            bumpiness: board.bumpiness(),
            well_depth_sum: well_depth_sum(&heights),
            row_transitions: board.row_transitions(),
            col_transitions: board.col_transitions(),
        }
    }
}

/// For every interior column strictly lower than both neighbours, add how far
/// it sits below the lower neighbour. Edge columns never count as wells.
pub fn well_depth_sum(heights: &[u32; BOARD_WIDTH as usize]) -> u32 {
    heights
        .windows(3)
        .filter(|w| w[1] < w[0] && w[1] < w[2])
        .map(|w| w[0].min(w[2]) - w[1])
        .sum()
}

/// Score a board with the default weights.
pub fn evaluate(board: &Board) -> i32 {
    evaluate_with(board, &Weights::default())
}

pub fn evaluate_with(board: &Board, weights: &Weights) -> i32 {
    weights.score(&BoardFeatures::measure(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_tetris_types::PieceKind;

    fn fill_row(board: &mut Board, y: i8, skip: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !skip.contains(&x) {
                board.set(x, y, Some(PieceKind::J));
            }
        }
    }

    #[test]
    fn test_empty_board_scores_only_transitions() {
        let board = Board::new();
        let f = BoardFeatures::measure(&board);
        assert_eq!(f.lines, 0);
        assert_eq!(f.aggregate_height, 0);
        // Each empty row flips twice against the walls; each column flips once at the floor.
        assert_eq!(f.row_transitions, 40);
        assert_eq!(f.col_transitions, 10);
        assert_eq!(evaluate(&board), -3 * 40 - 3 * 10);
    }

    #[test]
    fn test_well_depth_sum() {
        let heights = [3, 1, 4, 4, 0, 2, 2, 2, 5, 0];
        // Column 1: min(3,4)-1 = 2. Column 4: min(4,2)-0 = 2. Edge column 9 is ignored.
        assert_eq!(well_depth_sum(&heights), 4);
        assert_eq!(well_depth_sum(&[0; 10]), 0);
    }

    #[test]
    fn test_full_row_dominates_penalties() {
        let mut with_line = Board::new();
        fill_row(&mut with_line, 19, &[]);
        let mut without = Board::new();
        fill_row(&mut without, 19, &[0]);
        assert!(evaluate(&with_line) > evaluate(&without) + 9_000);
        assert_eq!(BoardFeatures::measure(&with_line).lines, 1);
    }

    #[test]
    fn test_hole_is_penalised() {
        let mut flat = Board::new();
        fill_row(&mut flat, 19, &[9]);
        fill_row(&mut flat, 18, &[8, 9]);

        let mut holed = flat.clone();
        holed.set(9, 18, Some(PieceKind::T));
        assert_eq!(BoardFeatures::measure(&holed).holes, 1);
        assert!(evaluate(&holed) < evaluate(&flat));
    }

    #[test]
    fn test_height_excess_penalty() {
        let w = Weights::default();
        let low = BoardFeatures {
            aggregate_height: 15,
            ..Default::default()
        };
        let high = BoardFeatures {
            aggregate_height: 16,
            ..Default::default()
        };
        assert_eq!(w.score(&low) - w.score(&high), 5 + 20);
    }
}
