//! Game state module - manages the complete game state
//!
//! This module ties together the board, pieces, randomness and scoring. It owns
//! the lifecycle (`Idle → Running ⇄ Paused → Over`), validates every command
//! through [`collides`], and queues [`GameEvent`]s for collaborators.
//!
//! Every command runs to completion synchronously; rejected commands leave the
//! state untouched and report [`Outcome::Rejected`].

use std::fmt;

use log::{debug, info};

use crate::board::Board;
use crate::collision::{collides, landing_row};
use crate::piece::Tetromino;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_score, get_autoplay_drop_interval_ms,
    get_drop_interval_ms,
};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Command, GameEvent, Outcome, Phase, PieceKind, SOFT_DROP_POINTS};

/// Complete game state
pub struct GameState {
    board: Board,
    current: Option<Tetromino>,
    /// Pre-generated next piece, promoted on spawn.
    next: Option<PieceKind>,
    rng: Box<dyn RandomSource + Send>,
    phase: Phase,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces within an episode.
    piece_id: u32,
    pieces_locked: u32,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    max_combo: u32,
    autoplay: bool,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game drawing pieces from a seeded [`SimpleRng`]
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(SimpleRng::new(seed)))
    }

    /// Create a new game drawing pieces from any random source
    pub fn with_source(rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            board: Board::new(),
            current: None,
            next: None,
            rng,
            phase: Phase::Idle,
            episode_id: 0,
            piece_id: 0,
            pieces_locked: 0,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            max_combo: 0,
            autoplay: false,
            events: Vec::with_capacity(16),
        }
    }

    /// Leave `Idle` and spawn the first piece
    pub fn start(&mut self) -> Outcome {
        if self.phase != Phase::Idle {
            return Outcome::Rejected;
        }
        self.phase = Phase::Running;
        debug!("episode {} started", self.episode_id);
        self.spawn()
    }

    /// Return to `Idle` with an empty board and fresh counters.
    ///
    /// The random source keeps its position, so the next episode continues
    /// the same sequence instead of replaying it.
    pub fn reset(&mut self) {
        if self.autoplay {
            self.autoplay = false;
            self.events.push(GameEvent::AutoplayChanged { enabled: false });
        }
        self.board.clear();
        self.current = None;
        self.next = None;
        self.phase = Phase::Idle;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.pieces_locked = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.max_combo = 0;
    }

    /// Replace the board before the game starts (puzzle setups, tests).
    pub fn load_board(&mut self, board: Board) -> Outcome {
        if self.phase != Phase::Idle {
            return Outcome::Rejected;
        }
        self.board = board;
        Outcome::Accepted
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn current(&self) -> Option<Tetromino> {
        self.current
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    /// The next piece in its spawn orientation and position.
    pub fn next_piece(&self) -> Option<Tetromino> {
        self.next.map(Tetromino::new)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Level-derived drop interval: `max(100, 1000 - (level-1)*100)`
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Drop interval actually used by the scheduler (accelerated under autoplay).
    pub fn effective_drop_interval_ms(&self) -> u32 {
        let base = self.drop_interval_ms();
        if self.autoplay {
            get_autoplay_drop_interval_ms(base)
        } else {
            base
        }
    }

    /// Landing row of the current piece.
    pub fn ghost_row(&self) -> Option<i8> {
        self.current.map(|p| landing_row(&self.board, &p))
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.current = self.current.map(PieceSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.next = self.next_piece().map(PieceSnapshot::from);
        out.phase = self.phase;
        out.autoplay = self.autoplay;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.pieces_locked = self.pieces_locked;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.drop_interval_ms = self.effective_drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the next piece to current and pre-generate a new next piece.
    ///
    /// A spawn that collides ends the game; this is the only place game over
    /// is detected.
    pub fn spawn(&mut self) -> Outcome {
        if self.phase != Phase::Running {
            return Outcome::Rejected;
        }

        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.rng.next_kind(),
        };
        self.next = Some(self.rng.next_kind());

        let piece = Tetromino::new(kind);
        self.current = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);

        if collides(&self.board, &piece) {
            self.finish();
            return Outcome::Rejected;
        }

        debug!("spawned {:?} (piece {})", kind, self.piece_id);
        self.events.push(GameEvent::PieceSpawned { kind });
        Outcome::Accepted
    }

    fn finish(&mut self) {
        self.phase = Phase::Over;
        info!(
            "game over: score {} level {} lines {} after {} pieces",
            self.score, self.level, self.lines, self.pieces_locked
        );
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        if self.autoplay {
            self.autoplay = false;
            self.events.push(GameEvent::AutoplayChanged { enabled: false });
        }
    }

    /// Active piece while the game is running.
    fn playable_piece(&self) -> Option<Tetromino> {
        if self.phase == Phase::Running {
            self.current
        } else {
            None
        }
    }

    /// Try to move the current piece one column (`dir` is -1 or +1).
    pub fn try_move(&mut self, dir: i8) -> Outcome {
        let Some(piece) = self.playable_piece() else {
            return Outcome::Rejected;
        };

        let moved = piece.shifted(dir.signum(), 0);
        if collides(&self.board, &moved) {
            return Outcome::Rejected;
        }

        self.current = Some(moved);
        self.events.push(GameEvent::PieceMoved { dx: dir.signum() });
        Outcome::Accepted
    }

    /// Rotate the current piece clockwise; rejected outright on any collision.
    pub fn rotate(&mut self) -> Outcome {
        let Some(piece) = self.playable_piece() else {
            return Outcome::Rejected;
        };

        let rotated = piece.rotated();
        if collides(&self.board, &rotated) {
            return Outcome::Rejected;
        }

        self.current = Some(rotated);
        self.events.push(GameEvent::PieceRotated);
        Outcome::Accepted
    }

    /// Move the current piece down one row, or lock it if it cannot descend.
    pub fn soft_drop(&mut self) -> Outcome {
        let Some(piece) = self.playable_piece() else {
            return Outcome::Rejected;
        };

        let lowered = piece.shifted(0, 1);
        if collides(&self.board, &lowered) {
            self.lock_current();
        } else {
            self.current = Some(lowered);
        }
        Outcome::Accepted
    }

    /// Credit a player-issued soft drop. Gravity steps go through
    /// [`GameState::soft_drop`] alone and earn nothing.
    pub fn award_soft_drop(&mut self) -> Outcome {
        if self.phase != Phase::Running {
            return Outcome::Rejected;
        }
        self.score = self.score.saturating_add(SOFT_DROP_POINTS);
        Outcome::Accepted
    }

    /// Drop the current piece to its landing row and lock it, scoring 2 points
    /// per row descended.
    pub fn hard_drop(&mut self) -> Outcome {
        let Some(piece) = self.playable_piece() else {
            return Outcome::Rejected;
        };

        let target = landing_row(&self.board, &piece);
        let rows = (target - piece.y).max(0) as u32;
        self.current = Some(Tetromino { y: target, ..piece });
        self.score = self.score.saturating_add(calculate_drop_score(rows));
        self.events.push(GameEvent::HardDropped { rows });

        self.lock_current();
        Outcome::Accepted
    }

    /// Lock, clear, score, and spawn the next piece.
    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.lock(&piece);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        self.events.push(GameEvent::PieceLocked { kind: piece.kind });

        let lines_cleared = self.board.clear_full_rows().len();
        if lines_cleared > 0 {
            self.combo += 1;
            self.max_combo = self.max_combo.max(self.combo);

            let result = calculate_score(lines_cleared, self.level, self.combo);
            self.score = self.score.saturating_add(result.total);
            self.lines += lines_cleared as u32;

            let old_level = self.level;
            self.level = calculate_level(self.lines);

            debug!(
                "cleared {} lines (+{}, combo {})",
                lines_cleared, result.total, self.combo
            );
            self.events.push(GameEvent::LinesCleared {
                count: lines_cleared as u32,
            });
            if self.level > old_level {
                info!(
                    "level {} reached, drop interval {}ms",
                    self.level,
                    self.drop_interval_ms()
                );
                self.events.push(GameEvent::LevelUp { level: self.level });
            }
            if self.combo > 1 {
                self.events.push(GameEvent::ComboAchieved { combo: self.combo });
            }
        } else {
            self.combo = 0;
        }

        self.spawn();
    }

    /// Toggle between `Running` and `Paused`.
    pub fn toggle_pause(&mut self) -> Outcome {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.events.push(GameEvent::Paused);
                Outcome::Accepted
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.events.push(GameEvent::Resumed);
                Outcome::Accepted
            }
            Phase::Idle | Phase::Over => Outcome::Rejected,
        }
    }

    /// Enable or disable autoplay. Rejected once the game is over or when the
    /// flag already has the requested value.
    pub fn set_autoplay(&mut self, enabled: bool) -> Outcome {
        if self.phase == Phase::Over || self.autoplay == enabled {
            return Outcome::Rejected;
        }
        self.autoplay = enabled;
        debug!(
            "autoplay {}, drop interval {}ms",
            if enabled { "on" } else { "off" },
            self.effective_drop_interval_ms()
        );
        self.events.push(GameEvent::AutoplayChanged { enabled });
        Outcome::Accepted
    }

    /// Apply a command
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Start => self.start(),
            Command::MoveLeft => self.try_move(-1),
            Command::MoveRight => self.try_move(1),
            Command::Rotate => self.rotate(),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::Pause => self.toggle_pause(),
            Command::Reset => {
                self.reset();
                Outcome::Accepted
            }
            Command::ToggleAutoplay => self.set_autoplay(!self.autoplay),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("next", &self.next)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .field("combo", &self.combo)
            .field("autoplay", &self.autoplay)
            .finish_non_exhaustive()
    }
}
