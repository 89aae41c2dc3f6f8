//! Player module - the falling piece and where it is

use std::ops::Add;

use crate::pieces::Piece;
use crate::types::{SPAWN_X, SPAWN_Y};

/// Board coordinate or offset: `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const ZERO: Position = Position { x: 0, y: 0 };
    pub const DOWN: Position = Position { x: 0, y: 1 };

    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Player {
    /// Top-left corner of the piece's bounding box on the board
    pub position: Position,
    pub piece: Piece,
    /// Set when the last downward move was rejected and the piece was merged
    /// on the same tick. A freshly spawned player never has it set.
    pub collided: bool,
}

impl Player {
    /// Place a piece at the spawn position
    pub fn spawn(piece: Piece) -> Self {
        Self::at(piece, Position::new(SPAWN_X, SPAWN_Y))
    }

    pub fn at(piece: Piece, position: Position) -> Self {
        Self {
            position,
            piece,
            collided: false,
        }
    }

    /// Same piece moved by `delta`
    pub fn shifted(&self, delta: Position) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }

    /// Absolute board coordinates of every occupied piece cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.piece
            .matrix
            .occupied()
            .map(move |(dx, dy, _)| (self.position.x + dx, self.position.y + dy))
    }
}
