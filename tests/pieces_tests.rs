//! Piece and collision properties

use auto_tetris::core::{collides, is_grounded, landing_row, Board, Shape, Tetromino};
use auto_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    (1usize..=4, 1usize..=4, any::<u16>()).prop_map(|(rows, cols, bits)| {
        let data: Vec<Vec<u8>> = (0..rows)
            .map(|y| {
                (0..cols)
                    .map(|x| ((bits >> (y * 4 + x)) & 1) as u8 * 3)
                    .collect()
            })
            .collect();
        let refs: Vec<&[u8]> = data.iter().map(|r| r.as_slice()).collect();
        Shape::from_rows(&refs)
    })
}

fn board_strategy() -> impl Strategy<Value = Board> {
    proptest::collection::vec(0u8..=7, (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize))
        .prop_map(|ids| {
            let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
            for (i, id) in ids.into_iter().enumerate() {
                // Keep boards sparse so pieces have room to fall.
                grid[i / BOARD_WIDTH as usize][i % BOARD_WIDTH as usize] =
                    if id == 7 { 7 } else { 0 };
            }
            Board::from_u8_grid(&grid)
        })
}

#[test]
fn test_spawn_positions_are_centered() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        assert_eq!((piece.x, piece.y), (3, 0));
        assert!(!collides(&Board::new(), &piece), "{:?}", kind);
    }
}

proptest! {
    #[test]
    fn prop_four_rotations_are_identity(shape in shape_strategy()) {
        let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
        prop_assert_eq!(back, shape);
        let once = shape.rotated_cw();
        prop_assert_eq!((once.rows(), once.cols()), (shape.cols(), shape.rows()));
    }

    #[test]
    fn prop_collides_matches_cell_rule(
        board in board_strategy(),
        kind in kind_strategy(),
        turns in 0usize..4,
        x in -4i8..12,
        y in -4i8..22,
    ) {
        let mut piece = Tetromino::new(kind);
        for _ in 0..turns {
            piece = piece.rotated();
        }
        let piece = Tetromino { x, y, ..piece };

        let expected = piece.cells().any(|(cx, cy)| {
            cx < 0
                || cx >= BOARD_WIDTH as i8
                || cy >= BOARD_HEIGHT as i8
                || (cy >= 0 && board.get(cx, cy) != Some(None))
        });
        prop_assert_eq!(collides(&board, &piece), expected);
    }

    #[test]
    fn prop_hard_drop_lands_grounded(
        board in board_strategy(),
        kind in kind_strategy(),
        x in 0i8..7,
    ) {
        let piece = Tetromino { x, y: -4, ..Tetromino::new(kind) };
        prop_assume!(!collides(&board, &piece));
        let row = landing_row(&board, &piece);
        let landed = Tetromino { y: row, ..piece };
        prop_assert!(!collides(&board, &landed));
        prop_assert!(is_grounded(&board, &landed));
        prop_assert!(row >= piece.y);
    }
}
