//! Session scheduler - drives a game on a virtual clock.
//!
//! [`Session::advance`] moves time forward in fixed frames of `TICK_MS`. Each
//! frame may fire the automatic drop (a soft drop once more than the effective
//! drop interval has passed since the last one) and, while autoplay is on, the
//! autoplay timer every `autoplay_tick_ms`. Paused, idle and finished games let
//! the clock run without firing either path.

use log::debug;

use auto_tetris_core::{GameSnapshot, GameState};
use auto_tetris_types::{Command, GameEvent, Outcome, Phase, AUTOPLAY_TICK_MS, TICK_MS};

use crate::autoplay::Autoplay;
use crate::evaluator::Weights;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Period of the autoplay executor.
    pub autoplay_tick_ms: u32,
    /// Turn autoplay on when the session is created.
    pub autoplay: bool,
    pub weights: Weights,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            autoplay_tick_ms: AUTOPLAY_TICK_MS,
            autoplay: false,
            weights: Weights::default(),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    game: GameState,
    autoplay: Autoplay,
    config: SessionConfig,
    now_ms: u64,
    last_drop_ms: u64,
    /// Time accumulated toward the next autoplay tick.
    autoplay_elapsed_ms: u32,
}

impl Session {
    pub fn new(game: GameState, config: SessionConfig) -> Self {
        let mut session = Self {
            game,
            autoplay: Autoplay::with_weights(config.weights),
            config,
            now_ms: 0,
            last_drop_ms: 0,
            autoplay_elapsed_ms: 0,
        };
        if config.autoplay {
            session.apply(Command::ToggleAutoplay);
        }
        session
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Virtual milliseconds elapsed since the session was created.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn last_drop_ms(&self) -> u64 {
        self.last_drop_ms
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.game.drain_events()
    }

    /// Forward a player command to the game, keeping the timers in step with
    /// phase changes. Soft drops issued here score a point each.
    pub fn apply(&mut self, command: Command) -> Outcome {
        let was = self.game.phase();
        let outcome = self.game.apply(command);
        if !outcome.is_accepted() {
            return outcome;
        }

        match command {
            Command::Start => self.rearm(),
            Command::Pause if was == Phase::Paused => {
                debug!("resumed at {}ms", self.now_ms);
                self.rearm();
            }
            Command::SoftDrop => {
                self.game.award_soft_drop();
                self.last_drop_ms = self.now_ms;
            }
            Command::Reset => {
                self.autoplay.clear_plan();
                self.rearm();
            }
            Command::ToggleAutoplay => {
                self.autoplay.clear_plan();
                self.autoplay_elapsed_ms = 0;
            }
            _ => {}
        }
        outcome
    }

    /// Resynchronise the drop reference to now and restart the autoplay timer.
    fn rearm(&mut self) {
        self.last_drop_ms = self.now_ms;
        self.autoplay_elapsed_ms = 0;
    }

    /// Advance the virtual clock by `dt_ms`, firing due drops and autoplay
    /// ticks frame by frame. Returns the number of commands issued.
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        let mut remaining = dt_ms;
        let mut issued = 0;
        while remaining > 0 {
            let frame = remaining.min(TICK_MS);
            remaining -= frame;
            issued += self.frame(frame);
        }
        issued
    }

    fn frame(&mut self, frame_ms: u32) -> u32 {
        self.now_ms += u64::from(frame_ms);
        if !self.game.is_running() {
            return 0;
        }

        let mut issued = 0;
        let interval = u64::from(self.game.effective_drop_interval_ms());
        if self.now_ms - self.last_drop_ms > interval {
            self.game.soft_drop();
            self.last_drop_ms = self.now_ms;
            issued += 1;
        }

        if self.game.autoplay() && self.game.is_running() {
            let tick = self.config.autoplay_tick_ms.max(1);
            self.autoplay_elapsed_ms += frame_ms;
            while self.autoplay_elapsed_ms >= tick {
                self.autoplay_elapsed_ms -= tick;
                if self.autoplay.step(&mut self.game).is_some() {
                    issued += 1;
                }
            }
        }
        issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auto_tetris_core::ScriptedSource;
    use auto_tetris_types::PieceKind;

    fn session(kinds: &[PieceKind]) -> Session {
        let game = GameState::with_source(Box::new(ScriptedSource::new(kinds.to_vec())));
        Session::new(game, SessionConfig::default())
    }

    #[test]
    fn test_drop_fires_strictly_after_interval() {
        let mut s = session(&[PieceKind::O]);
        s.apply(Command::Start);
        let y0 = s.game().current().unwrap().y;

        // 992ms = 62 frames: not yet past 1000ms.
        s.advance(992);
        assert_eq!(s.game().current().unwrap().y, y0);
        // 1008ms: past it.
        s.advance(16);
        assert_eq!(s.game().current().unwrap().y, y0 + 1);
        assert_eq!(s.last_drop_ms(), 1008);
    }

    #[test]
    fn test_idle_session_does_nothing() {
        let mut s = session(&[PieceKind::O]);
        assert_eq!(s.advance(5_000), 0);
        assert_eq!(s.now_ms(), 5_000);
        assert!(s.game().current().is_none());
    }

    #[test]
    fn test_pause_freezes_and_resume_rearms() {
        let mut s = session(&[PieceKind::T]);
        s.apply(Command::Start);
        s.advance(800);
        s.apply(Command::Pause);
        s.advance(10_000);
        let y = s.game().current().unwrap().y;
        assert_eq!(y, 0);

        // Resume must not force an immediate drop.
        s.apply(Command::Pause);
        assert_eq!(s.last_drop_ms(), s.now_ms());
        s.advance(992);
        assert_eq!(s.game().current().unwrap().y, 0);
        s.advance(16);
        assert_eq!(s.game().current().unwrap().y, 1);
    }

    #[test]
    fn test_manual_soft_drop_resets_timer() {
        let mut s = session(&[PieceKind::O]);
        s.apply(Command::Start);
        s.advance(960);
        s.apply(Command::SoftDrop);
        assert_eq!(s.game().current().unwrap().y, 1);
        s.advance(96);
        assert_eq!(s.game().current().unwrap().y, 1);
    }

    #[test]
    fn test_manual_soft_drops_score_but_gravity_does_not() {
        let mut s = session(&[PieceKind::O]);
        s.apply(Command::Start);
        for _ in 0..5 {
            s.apply(Command::SoftDrop);
        }
        assert_eq!(s.game().current().unwrap().y, 5);
        assert_eq!(s.game().score(), 5);

        // Three gravity steps.
        s.advance(3_024);
        assert_eq!(s.game().current().unwrap().y, 8);
        assert_eq!(s.game().score(), 5);
    }

    #[test]
    fn test_autoplay_ticks_every_200ms() {
        let config = SessionConfig {
            autoplay: true,
            ..SessionConfig::default()
        };
        let game = GameState::with_source(Box::new(ScriptedSource::new(vec![PieceKind::T])));
        let mut s = Session::new(game, config);
        assert!(s.game().autoplay());
        s.apply(Command::Start);

        s.advance(192);
        assert!(s.autoplay().target().is_none());
        assert_eq!(s.autoplay().placements(), 0);

        // The first tick plans and issues one command.
        s.advance(16);
        assert!(s.autoplay().target().is_some() || s.autoplay().placements() == 1);
    }

    #[test]
    fn test_headless_autoplay_clears_lines() {
        let config = SessionConfig {
            autoplay: true,
            ..SessionConfig::default()
        };
        let mut s = Session::new(GameState::new(99), config);
        s.apply(Command::Start);
        for _ in 0..2_000 {
            s.advance(200);
            if s.game().game_over() {
                break;
            }
        }
        assert!(s.game().lines() > 0);
    }
}
