//! Terminal runner (default binary).
//!
//! Drives a [`GameSession`] from crossterm input and a drop timer whose period
//! the session chooses, and draws it with the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{GameSession, GameSnapshot};
use blockfall::input::should_quit;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::{Controls, EventLog, GameConfig};

/// Longest wait for input, so held-key timeouts are noticed while idle.
const MAX_POLL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GameConfig::from_env().with_args(&args)?;
    if config.show_help {
        println!("{}", blockfall::config::USAGE);
        return Ok(());
    }

    let mut log = match &config.log_path {
        Some(path) => EventLog::open(path)?,
        None => EventLog::disabled(),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &GameConfig, log: &mut EventLog) -> Result<()> {
    let mut session = GameSession::new(config.seed);
    let view = GameView::new(config.cell_width, 1);
    let mut controls = Controls::new(config.key_release_timeout_ms);

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until the next drop, if one is scheduled.
        let timeout = match session.drop_interval_ms() {
            Some(ms) => Duration::from_millis(u64::from(ms))
                .saturating_sub(last_tick.elapsed())
                .min(MAX_POLL),
            None => MAX_POLL,
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    let reaction = controls.on_key(&mut session, key);
                    if reaction.restarted {
                        last_tick = Instant::now();
                    }
                    dirty |= reaction.redraw;
                }
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        dirty |= controls.on_idle(&mut session).redraw;

        // Tick.
        if let Some(ms) = session.drop_interval_ms() {
            if last_tick.elapsed() >= Duration::from_millis(u64::from(ms)) {
                last_tick = Instant::now();
                session.tick();
                dirty = true;
            }
        }

        for ev in session.take_events() {
            log.record(&ev);
        }
    }
}
