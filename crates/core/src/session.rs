//! Session module - the game progress state machine
//!
//! A [`GameSession`] owns one board, one falling piece, the score/level
//! counters and the piece source. It moves through
//! `NotStarted -> Playing -> GameOver`. `start()` resets it from any phase,
//! but [`Intent::Start`] only takes effect once no game is running.
//!
//! The session never schedules time itself. A driver calls [`GameSession::tick`]
//! every [`GameSession::drop_interval_ms`] milliseconds and re-reads the
//! interval after each call, since clears and soft drop change it.
//!
//! After every transition the board is redrawn: transient cells are erased,
//! then the landing preview (`Clear`) and the falling piece (`Colliding`) are
//! painted over the landed geometry.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::collision::{drop_position, is_colliding};
use crate::merge::merge_and_clear;
use crate::player::{Player, Position};
use crate::rng::PieceSource;
use crate::rotation::player_rotate;
use crate::scoring::{effective_interval_ms, GameProgress};
use crate::snapshot::GameSnapshot;
use crate::types::{CellState, Direction, Intent, Phase, ShapeKind};

/// Summary returned by every session operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SessionState {
    pub phase: Phase,
    pub progress: GameProgress,
    /// Desired time until the next tick; `None` once the session stopped.
    pub drop_interval_ms: Option<u32>,
    /// Rows cleared by the most recent tick (0 if it did not merge).
    pub last_cleared: u32,
    /// Shape of the piece that spawns after the current one lands.
    pub next: ShapeKind,
}

/// Notable transitions, consumed by observers such as the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum SessionEvent {
    Started {
        session_id: u32,
        seed: u32,
    },
    Locked {
        kind: ShapeKind,
        rows_cleared: u32,
        points: u32,
        score: u32,
        total_rows: u32,
        level: u32,
    },
    GameOver {
        score: u32,
        total_rows: u32,
        level: u32,
    },
}

/// Events buffered between two `take_events` calls
pub type SessionEvents = ArrayVec<SessionEvent, 8>;

/// One game session
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    player: Player,
    progress: GameProgress,
    phase: Phase,
    soft_drop: bool,
    pieces: PieceSource,
    seed: u32,
    /// Incremented by every `start()`.
    session_id: u32,
    last_cleared: u32,
    events: SessionEvents,
}

impl GameSession {
    /// Create a session that has not started yet, with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut pieces = PieceSource::new(seed);
        let player = Player::spawn(pieces.draw());

        Self {
            board: Board::new(),
            player,
            progress: GameProgress::new(),
            phase: Phase::NotStarted,
            soft_drop: false,
            pieces,
            seed,
            session_id: 0,
            last_cleared: 0,
            events: SessionEvents::new(),
        }
    }

    /// Reset board, piece and progress, and enter `Playing`.
    pub fn start(&mut self) -> SessionState {
        self.start_on(Board::new())
    }

    /// Like [`GameSession::start`], but on a prepared board.
    ///
    /// Only the board's `Merged` cells are kept.
    pub fn start_on(&mut self, mut board: Board) -> SessionState {
        board.clear_piece_cells();
        self.board = board;
        self.progress = GameProgress::new();
        self.soft_drop = false;
        self.last_cleared = 0;
        self.session_id = self.session_id.wrapping_add(1);
        self.phase = Phase::Playing;
        self.push_event(SessionEvent::Started {
            session_id: self.session_id,
            seed: self.seed,
        });
        self.spawn();
        self.redraw();
        self.state()
    }

    /// Advance the falling piece by one row, landing it if it cannot fall.
    ///
    /// No-op unless `Playing`.
    pub fn tick(&mut self) -> SessionState {
        if self.phase != Phase::Playing {
            return self.state();
        }

        self.last_cleared = 0;

        if !is_colliding(&self.player, &self.board, Position::DOWN) {
            self.player = self.player.shifted(Position::DOWN);
        } else if self.player.position.y < 1 {
            // Stuck in the spawn row: no room left.
            self.game_over();
        } else {
            self.player.collided = true;
            let outcome = merge_and_clear(&mut self.board, &self.player);
            let rows = outcome.cleared_count();
            let points = self.progress.record_clear(rows);
            self.last_cleared = rows;
            self.push_event(SessionEvent::Locked {
                kind: self.player.piece.kind,
                rows_cleared: rows,
                points,
                score: self.progress.score,
                total_rows: self.progress.rows_cleared,
                level: self.progress.level,
            });
            self.spawn();
        }

        self.redraw();
        self.state()
    }

    /// Shift the piece one column if nothing is in the way.
    pub fn move_piece(&mut self, direction: Direction) -> SessionState {
        if self.phase != Phase::Playing {
            return self.state();
        }

        let delta = Position::new(direction.dx(), 0);
        if !is_colliding(&self.player, &self.board, delta) {
            self.player = self.player.shifted(delta);
            self.redraw();
        }
        self.state()
    }

    /// Rotate the piece clockwise, kicking sideways if needed.
    pub fn rotate(&mut self) -> SessionState {
        if self.phase != Phase::Playing {
            return self.state();
        }

        self.player = player_rotate(&self.board, &self.player);
        self.redraw();
        self.state()
    }

    /// Request the fast drop interval. Does not move the piece.
    pub fn soft_drop_on(&mut self) -> SessionState {
        if self.phase == Phase::Playing {
            self.soft_drop = true;
        }
        self.state()
    }

    /// Back to the level drop interval.
    pub fn soft_drop_off(&mut self) -> SessionState {
        if self.phase == Phase::Playing {
            self.soft_drop = false;
        }
        self.state()
    }

    /// Apply a player intent
    pub fn apply(&mut self, intent: Intent) -> SessionState {
        match intent {
            Intent::MoveLeft => self.move_piece(Direction::Left),
            Intent::MoveRight => self.move_piece(Direction::Right),
            Intent::Rotate => self.rotate(),
            Intent::SoftDropOn => self.soft_drop_on(),
            Intent::SoftDropOff => self.soft_drop_off(),
            Intent::Start => match self.phase {
                Phase::NotStarted | Phase::GameOver => self.start(),
                Phase::Playing => self.state(),
            },
        }
    }

    /// Desired tick interval, or `None` when the session is not running
    pub fn drop_interval_ms(&self) -> Option<u32> {
        match self.phase {
            Phase::Playing => Some(effective_interval_ms(self.progress.level, self.soft_drop)),
            Phase::NotStarted | Phase::GameOver => None,
        }
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            phase: self.phase,
            progress: self.progress,
            drop_interval_ms: self.drop_interval_ms(),
            last_cleared: self.last_cleared,
            next: self.pieces.peek(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> GameProgress {
        self.progress
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Seed the session was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Take the start/lock/game-over events recorded since the last call, oldest first.
    pub fn take_events(&mut self) -> SessionEvents {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (dst, src) in out.board.iter_mut().zip(self.board.rows()) {
            dst.copy_from_slice(src);
        }
        out.player = match self.phase {
            Phase::NotStarted => None,
            Phase::Playing | Phase::GameOver => Some(self.player.position),
        };
        out.next = self.pieces.peek();
        out.phase = self.phase;
        out.progress = self.progress;
        out.drop_interval_ms = self.drop_interval_ms();
        out.soft_drop = self.soft_drop;
        out.session_id = self.session_id;
        out.last_cleared = self.last_cleared;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Bring in the next piece; a spawn that overlaps landed cells ends the game.
    fn spawn(&mut self) {
        self.player = Player::spawn(self.pieces.draw());
        if is_colliding(&self.player, &self.board, Position::ZERO) {
            self.game_over();
        }
    }

    /// Keeps the newest events if nobody drains the queue.
    fn push_event(&mut self, event: SessionEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.soft_drop = false;
        self.push_event(SessionEvent::GameOver {
            score: self.progress.score,
            total_rows: self.progress.rows_cleared,
            level: self.progress.level,
        });
    }

    /// Repaint the falling piece and its landing preview.
    fn redraw(&mut self) {
        self.board.clear_piece_cells();
        if self.phase == Phase::NotStarted {
            return;
        }
        if self.phase == Phase::Playing {
            let landing = Player {
                position: drop_position(&self.player, &self.board),
                ..self.player
            };
            self.board.paint_player(&landing, CellState::Clear);
        }
        self.board.paint_player(&self.player, CellState::Colliding);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
