use crate::player::Position;
use crate::scoring::GameProgress;
use crate::types::{Cell, Phase, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board rows as plain cell arrays, top to bottom.
pub type CellGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Everything a renderer needs for one frame, copied out of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: CellGrid,
    pub player: Option<Position>,
    pub next: ShapeKind,
    pub phase: Phase,
    pub progress: GameProgress,
    pub drop_interval_ms: Option<u32>,
    pub soft_drop: bool,
    pub session_id: u32,
    pub last_cleared: u32,
}

impl GameSnapshot {
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Cell at (x, y), `None` outside the board.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.board.get(y).and_then(|row| row.get(x)).copied()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            player: None,
            next: ShapeKind::I,
            phase: Phase::NotStarted,
            progress: GameProgress::new(),
            drop_interval_ms: None,
            soft_drop: false,
            session_id: 0,
            last_cleared: 0,
        }
    }
}
