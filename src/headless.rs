//! Headless autoplay runs on the virtual clock.

use log::{debug, info};
use serde::Serialize;

use crate::core::GameState;
use crate::engine::{Session, SessionConfig};
use crate::types::{Command, GameEvent, TICK_MS};

/// Limits for a headless run; whichever is hit first ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessLimits {
    pub max_pieces: u32,
    pub max_ms: u64,
}

impl Default for HeadlessLimits {
    fn default() -> Self {
        Self {
            max_pieces: 500,
            max_ms: 30 * 60 * 1000,
        }
    }
}

/// Summary printed as JSON at the end of a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadlessReport {
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces_placed: u32,
    pub max_combo: u32,
    pub elapsed_ms: u64,
    pub game_over: bool,
}

/// Play a seeded game with autoplay until game over or a limit is reached.
pub fn run_headless(seed: u32, limits: HeadlessLimits, config: SessionConfig) -> HeadlessReport {
    let config = SessionConfig {
        autoplay: true,
        ..config
    };
    let mut session = Session::new(GameState::new(seed), config);
    session.apply(Command::Start);
    info!(
        "headless run: seed {} max_pieces {} max_ms {}",
        seed, limits.max_pieces, limits.max_ms
    );

    loop {
        let game = session.game();
        if game.game_over()
            || game.pieces_locked() >= limits.max_pieces
            || session.now_ms() >= limits.max_ms
        {
            break;
        }
        session.advance(TICK_MS);
        for event in session.drain_events() {
            match event {
                GameEvent::LinesCleared { .. }
                | GameEvent::LevelUp { .. }
                | GameEvent::ComboAchieved { .. }
                | GameEvent::GameOver { .. } => debug!("{:?}", event),
                _ => {}
            }
        }
    }

    let game = session.game();
    HeadlessReport {
        seed,
        score: game.score(),
        level: game.level(),
        lines: game.lines(),
        pieces_placed: game.pieces_locked(),
        max_combo: game.max_combo(),
        elapsed_ms: session.now_ms(),
        game_over: game.game_over(),
    }
}
