//! Terminal output for framebuffers.
//!
//! The renderer keeps a mirror of what the terminal currently shows. Each
//! frame is compared with the mirror cell by cell and only differing cells are
//! written; the cursor is repositioned only when the next write is not the
//! cell right after the previous one. Without a usable mirror (first frame,
//! resize, [`TerminalRenderer::invalidate`]) the screen is cleared and every
//! cell repainted.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Owns the terminal while entered. Dropping it restores the terminal, so an
/// error in the game loop never leaves the shell in raw mode.
pub struct TerminalRenderer {
    shown: FrameBuffer,
    stale: bool,
    out: Vec<u8>,
    entered: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            shown: FrameBuffer::new(0, 0),
            stale: true,
            out: Vec::with_capacity(32 * 1024),
            entered: false,
        }
    }

    /// Switch to the alternate screen in raw mode with the cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        self.entered = true;
        self.stale = true;
        Ok(())
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Undo [`TerminalRenderer::enter`]. Does nothing when not entered.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize, for instance).
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Bring the terminal in line with `fb`. Returns the number of cells written.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<usize> {
        self.out.clear();
        let shown = if self.stale { None } else { Some(&self.shown) };
        let painted = encode_frame(shown, fb, &mut self.out)?;
        if !self.out.is_empty() {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&self.out)?;
            stdout.flush()?;
        }
        self.shown.copy_from(fb);
        self.stale = false;
        Ok(painted)
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        if let Err(err) = self.exit() {
            log::warn!("failed to restore terminal: {err:#}");
        }
    }
}

/// Encode the terminal commands that turn `shown` into `next`, returning the
/// number of cells written.
///
/// `None`, or a mirror of a different size, clears the screen first and
/// writes every cell. Identical frames encode to nothing.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let shown = shown.filter(|s| s.width() == next.width() && s.height() == next.height());
    if shown.is_none() {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;
    }

    let width = usize::from(next.width());
    let mut painter = Painter::new(out);
    for (i, cell) in next.cells().iter().enumerate() {
        if shown.is_some_and(|s| s.cells()[i] == *cell) {
            continue;
        }
        painter.put((i % width) as u16, (i / width) as u16, *cell)?;
    }
    painter.finish()
}

/// Tracks cursor position and active style across writes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    cursor: Option<(u16, u16)>,
    style: Option<CellStyle>,
    painted: usize,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            cursor: None,
            style: None,
            painted: 0,
        }
    }

    fn put(&mut self, x: u16, y: u16, cell: Cell) -> Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.out, cursor::MoveTo(x, y))?;
        }
        if self.style != Some(cell.style) {
            let style = cell.style;
            queue!(
                self.out,
                SetAttribute(Attribute::Reset),
                SetForegroundColor(style.fg.into()),
                SetBackgroundColor(style.bg.into())
            )?;
            if style.bold {
                queue!(self.out, SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                queue!(self.out, SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        queue!(self.out, Print(cell.ch))?;
        self.cursor = Some((x.saturating_add(1), y));
        self.painted += 1;
        Ok(())
    }

    fn finish(self) -> Result<usize> {
        if self.painted > 0 {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(self.painted)
    }
}
