//! Auto Tetris runner (default binary).
//!
//! Interactive mode draws the game in the terminal with crossterm and a
//! framebuffer renderer; `--headless` plays a seeded autoplay game on the
//! virtual clock and prints a JSON report.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use log::info;

use auto_tetris::core::{GameSnapshot, GameState};
use auto_tetris::engine::{Session, SessionConfig};
use auto_tetris::headless::{run_headless, HeadlessLimits};
use auto_tetris::input::{map_key, should_quit};
use auto_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use auto_tetris::types::TICK_MS;

#[derive(Parser, Debug)]
#[command(name = "auto-tetris", about = "Falling-block puzzle with a heuristic autoplay")]
struct Config {
    /// Seed for the piece generator (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Start with autoplay enabled
    #[arg(long, default_value_t = false)]
    autoplay: bool,

    /// Play an autoplay game without a terminal and print a JSON report
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Headless: stop after this many pieces
    #[arg(long, default_value_t = 500)]
    max_pieces: u32,

    /// Headless: stop after this many virtual milliseconds
    #[arg(long, default_value_t = 30 * 60 * 1000)]
    max_ms: u64,
}

fn main() -> Result<()> {
    let config = Config::parse();
    let seed = config.seed.unwrap_or_else(clock_seed);

    if config.headless {
        let _logger = start_logger(false)?;
        let limits = HeadlessLimits {
            max_pieces: config.max_pieces,
            max_ms: config.max_ms,
        };
        let report = run_headless(seed, limits, SessionConfig::default());
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Logging to stderr would tear the screen.
    let _logger = start_logger(true)?;
    info!("interactive session, seed {}", seed);

    let session_config = SessionConfig {
        autoplay: config.autoplay,
        ..SessionConfig::default()
    };
    let mut session = Session::new(GameState::new(seed), session_config);

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut session);
    // Restore before reporting any error.
    term.exit()?;
    result
}

fn start_logger(to_file: bool) -> Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str("info")?;
    let logger = if to_file {
        logger.log_to_file(FileSpec::default().basename("auto-tetris").suppress_timestamp())
    } else {
        logger
    };
    logger.start().context("failed to start logger")
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, session: &mut Session) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = map_key(key) {
                        session.apply(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            session.advance(elapsed.as_millis().min(u32::MAX as u128) as u32);
            for event in session.drain_events() {
                log::debug!("{:?}", event);
            }
        }
    }
}
