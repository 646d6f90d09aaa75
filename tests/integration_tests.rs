//! Integration tests for the game state machine

use auto_tetris::core::{Board, GameState, ScriptedSource};
use auto_tetris::engine::{Session, SessionConfig};
use auto_tetris::types::{
    Command, GameEvent, Outcome, Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS,
};

fn scripted(kinds: &[PieceKind]) -> GameState {
    GameState::with_source(Box::new(ScriptedSource::new(kinds.to_vec())))
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.phase(), Phase::Idle);

    assert!(state.apply(Command::Start).is_accepted());
    assert_eq!(state.phase(), Phase::Running);
    assert!(state.current().is_some());
    assert!(state.next_kind().is_some());

    state.apply(Command::Pause);
    assert_eq!(state.phase(), Phase::Paused);
    state.apply(Command::Pause);
    assert_eq!(state.phase(), Phase::Running);

    state.apply(Command::Reset);
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn test_o_hard_drop_on_empty_board() {
    let mut state = scripted(&[PieceKind::O, PieceKind::T]);
    state.start();
    state.drain_events().for_each(drop);

    state.apply(Command::HardDrop);

    let board = state.board();
    for (x, y) in [(3, 18), (4, 18), (3, 19), (4, 19)] {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::O)));
    }
    assert_eq!(state.lines(), 0);
    assert_eq!(state.combo(), 0);
    assert_eq!(state.score(), 2 * 18);

    let events: Vec<_> = state.drain_events().collect();
    assert_eq!(
        events,
        vec![
            GameEvent::HardDropped { rows: 18 },
            GameEvent::PieceLocked { kind: PieceKind::O },
            GameEvent::PieceSpawned { kind: PieceKind::T },
        ]
    );
}

#[test]
fn test_vertical_i_clears_single_line() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 - 1 {
        board.set(x, BOARD_HEIGHT as i8 - 1, Some(PieceKind::L));
    }
    board.set(0, BOARD_HEIGHT as i8 - 2, Some(PieceKind::S));

    let mut state = scripted(&[PieceKind::I, PieceKind::O]);
    state.load_board(board);
    state.start();

    // Vertical I fills matrix column 2; anchor x = 7 puts it in column 9.
    assert!(state.apply(Command::Rotate).is_accepted());
    for _ in 0..4 {
        assert!(state.apply(Command::MoveRight).is_accepted());
    }
    assert_eq!(state.apply(Command::MoveRight), Outcome::Rejected);
    state.apply(Command::HardDrop);

    assert_eq!(state.lines(), 1);
    assert_eq!(state.score(), 2 * 16 + 100);
    assert_eq!(state.combo(), 1);

    // The S cell shifted down into the bottom row; the rest of the I stacks above it.
    let b = state.board();
    assert_eq!(b.get(0, 19), Some(Some(PieceKind::S)));
    assert_eq!(b.get(9, 19), Some(Some(PieceKind::I)));
    assert_eq!(b.get(9, 17), Some(Some(PieceKind::I)));
    assert_eq!(b.get(9, 16), Some(None));
    assert_eq!(b.get(1, 19), Some(None));
}

#[test]
fn test_level_two_at_ten_lines() {
    // Each O clears two rows of a two-wide gap at columns 0-1.
    let mut state = scripted(&[PieceKind::O]);
    let mut board = Board::new();
    for y in 10..BOARD_HEIGHT as i8 {
        for x in 2..BOARD_WIDTH as i8 {
            board.set(x, y, Some(PieceKind::J));
        }
    }
    state.load_board(board);
    state.start();

    let mut levels = Vec::new();
    for _ in 0..5 {
        assert_eq!(state.drop_interval_ms(), 1000);
        for _ in 0..3 {
            state.apply(Command::MoveLeft);
        }
        state.apply(Command::HardDrop);
        levels.extend(state.drain_events().filter_map(|e| match e {
            GameEvent::LevelUp { level } => Some(level),
            _ => None,
        }));
    }

    assert_eq!(state.lines(), 10);
    assert_eq!(state.level(), 2);
    assert_eq!(state.drop_interval_ms(), 900);
    assert_eq!(levels, vec![2]);
}

#[test]
fn test_commands_are_noops_while_paused_or_over() {
    let mut state = scripted(&[PieceKind::T]);
    state.start();
    state.apply(Command::Pause);
    let before = state.snapshot();
    for cmd in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::Rotate,
        Command::SoftDrop,
        Command::HardDrop,
    ] {
        assert_eq!(state.apply(cmd), Outcome::Rejected);
    }
    assert_eq!(state.snapshot(), before);

    // Stack the board until a spawn collides.
    state.apply(Command::Pause);
    while !state.game_over() {
        state.apply(Command::HardDrop);
    }
    let over = state.snapshot();
    assert_eq!(state.apply(Command::MoveLeft), Outcome::Rejected);
    assert_eq!(state.apply(Command::Pause), Outcome::Rejected);
    assert_eq!(state.snapshot(), over);
    assert!(state.apply(Command::Reset).is_accepted());
    assert_eq!(state.phase(), Phase::Idle);
}

#[test]
fn test_score_never_decreases_and_level_tracks_lines() {
    // Autoplay keeps the stack low, so locks regularly clear rows.
    let config = SessionConfig {
        autoplay: true,
        autoplay_tick_ms: 20,
        ..SessionConfig::default()
    };
    let mut session = Session::new(GameState::new(777), config);
    session.apply(Command::Start);

    let mut last_score = 0;
    let mut locks = 0;
    let mut clearing_locks = 0;
    while locks < 150 && !session.game().game_over() {
        session.advance(TICK_MS);
        let mut locked = false;
        let mut cleared = false;
        for event in session.drain_events() {
            match event {
                GameEvent::PieceLocked { .. } => locked = true,
                GameEvent::LinesCleared { .. } => cleared = true,
                _ => {}
            }
        }
        if !locked {
            continue;
        }
        locks += 1;
        if cleared {
            clearing_locks += 1;
        }

        let game = session.game();
        assert!(game.score() >= last_score);
        last_score = game.score();
        assert_eq!(game.level(), game.lines() / 10 + 1);
        let interval = 1000u32.saturating_sub((game.level() - 1) * 100).max(100);
        assert_eq!(game.drop_interval_ms(), interval);
    }

    assert!(clearing_locks > 0);
    assert!(session.game().lines() > 0);
}
