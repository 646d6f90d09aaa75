//! Board tests - grid access, locking and row clearing

use auto_tetris::core::{Board, Tetromino};
use auto_tetris::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use proptest::prelude::*;

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(PieceKind::Z));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_lock_skips_cells_above_board() {
    let mut board = Board::new();
    // Vertical I sticking two rows above the top.
    let piece = Tetromino {
        y: -2,
        ..Tetromino::new(PieceKind::I).rotated()
    };
    board.lock(&piece);

    let filled: Vec<_> = board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_some())
        .map(|(i, _)| i)
        .collect();
    // Column 5, rows 0 and 1.
    assert_eq!(filled, vec![5, 15]);
}

#[test]
fn test_clear_shifts_rows_down_and_keeps_order() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    board.set(0, 18, Some(PieceKind::T));
    board.set(1, 17, Some(PieceKind::O));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 1);
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(1, 18), Some(Some(PieceKind::O)));
    assert!(board.row(0).unwrap().iter().all(|c| c.is_none()));
}

#[test]
fn test_clear_adjacent_and_separated_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    fill_row(&mut board, 18);
    fill_row(&mut board, 15);
    board.set(4, 17, Some(PieceKind::J));
    board.set(4, 16, Some(PieceKind::S));

    assert_eq!(board.clear_full_rows().len(), 3);
    assert_eq!(board.get(4, 19), Some(Some(PieceKind::J)));
    assert_eq!(board.get(4, 18), Some(Some(PieceKind::S)));
    assert_eq!(board.full_row_count(), 0);
    assert_eq!(board.aggregate_height(), 2);
}

proptest! {
    #[test]
    fn prop_clearing_leaves_no_full_rows(
        cells in proptest::collection::vec(any::<bool>(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize)),
        full_rows in proptest::collection::vec(0..BOARD_HEIGHT as i8, 0..6),
    ) {
        let mut board = Board::new();
        for (i, &filled) in cells.iter().enumerate() {
            if filled {
                let x = (i % BOARD_WIDTH as usize) as i8;
                let y = (i / BOARD_WIDTH as usize) as i8;
                board.set(x, y, Some(PieceKind::O));
            }
        }
        for y in full_rows {
            fill_row(&mut board, y);
        }

        let occupied_before = board.cells().iter().filter(|c| c.is_some()).count();
        let full_before = board.full_row_count() as usize;
        let cleared = board.clear_full_rows();

        prop_assert_eq!(cleared.len(), full_before);
        prop_assert_eq!(board.full_row_count(), 0);
        prop_assert_eq!(board.cells().len(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize));
        let occupied_after = board.cells().iter().filter(|c| c.is_some()).count();
        prop_assert_eq!(occupied_after, occupied_before - full_before * BOARD_WIDTH as usize);
    }
}
