//! TerminalRenderer: puts framebuffers on a real terminal.
//!
//! Each frame is compared row by row with the one on screen. A row that
//! changed is rewritten from its first to its last differing column, as one
//! styled run per stretch of equal style, inside a synchronized update.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{PrintStyledContent, StyledContent},
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// What the terminal currently shows; `None` forces a full repaint.
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
    run: String,
    /// Key release reporting was pushed in `enter`.
    key_releases: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
            run: String::new(),
            key_releases: false,
        }
    }

    /// Raw mode and the alternate screen; key releases where the terminal can report them.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.key_releases = terminal::supports_keyboard_enhancement().unwrap_or(false);
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        if self.key_releases {
            self.bytes.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        if std::mem::take(&mut self.key_releases) {
            self.bytes.queue(PopKeyboardEnhancementFlags)?;
        }
        self.bytes
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        self.shown = None;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw (after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previous frame in its place for reuse.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let shown = self.shown.take();
        encode_frame(shown.as_ref(), fb, &mut self.bytes, &mut self.run)?;
        self.flush()?;
        let recycled = shown.unwrap_or_else(|| FrameBuffer::new(0, 0));
        self.shown = Some(std::mem::replace(fb, recycled));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the update from `shown` to `next`, returning how many rows were written.
///
/// Without a previous frame of the same size the screen is cleared and every
/// row is written. `run` is scratch space for one styled run.
pub fn encode_frame(
    shown: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
    run: &mut String,
) -> Result<u16> {
    let shown = shown.filter(|s| s.width() == next.width() && s.height() == next.height());

    out.queue(terminal::BeginSynchronizedUpdate)?;
    if shown.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut written = 0;
    for y in 0..next.height() {
        let row = next.row(y);
        let span = match shown {
            Some(s) => changed_span(s.row(y), row),
            None => Some((0, row.len())),
        };
        let Some((from, to)) = span else {
            continue;
        };
        out.queue(cursor::MoveTo(from as u16, y))?;
        print_runs(out, &row[from..to], run)?;
        written += 1;
    }

    out.queue(terminal::EndSynchronizedUpdate)?;
    Ok(written)
}

/// First and one-past-last column where two rows differ.
fn changed_span(before: &[Glyph], after: &[Glyph]) -> Option<(usize, usize)> {
    let first = before.iter().zip(after).position(|(a, b)| a != b)?;
    let last = before.iter().zip(after).rposition(|(a, b)| a != b)?;
    Some((first, last + 1))
}

fn print_runs(out: &mut Vec<u8>, glyphs: &[Glyph], run: &mut String) -> Result<()> {
    let mut rest = glyphs;
    while let Some(first) = rest.first() {
        let len = rest
            .iter()
            .position(|g| g.style != first.style)
            .unwrap_or(rest.len());
        run.clear();
        run.extend(rest[..len].iter().map(|g| g.ch));
        out.queue(PrintStyledContent(StyledContent::new(
            first.style.content_style(),
            run.as_str(),
        )))?;
        rest = &rest[len..];
    }
    Ok(())
}
