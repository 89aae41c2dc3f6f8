//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data used throughout the workspace. Nothing in
//! here performs I/O, so the same types serve the engine, the terminal view and
//! the event log.
//!
//! # Board Dimensions
//!
//! The playfield is fixed for the lifetime of the program:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, row 0 on top)
//! - **Spawn position**: (4, 0), the bounding box's top-left corner
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Level-scaled part of the drop interval |
//! | `DROP_INTERVAL_FLOOR_MS` | 200 | Interval never drops below this |
//! | `SOFT_DROP_INTERVAL_MS` | 30 | Interval while soft drop is held |
//!
//! # Drop Intervals by Level
//!
//! `BASE_DROP_MS / level + DROP_INTERVAL_FLOOR_MS`:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1200ms |
//! | 2 | 700ms |
//! | 4 | 450ms |
//! | 10 | 300ms |
//! | 1000+ | 200ms |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, CellState, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert_eq!(kind.color_index(), 6);
//!
//! let cell = Cell::EMPTY;
//! assert_eq!(cell.state, CellState::Empty);
//! assert!(cell.occupancy.is_none());
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the spawn bounding box's left edge.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the spawn bounding box's top edge.
pub const SPAWN_Y: i8 = 0;

/// Level-scaled part of the drop interval (ms at level 1, before the floor).
pub const BASE_DROP_MS: u32 = 1000;

/// Added to every level interval; the interval approaches but never passes it.
pub const DROP_INTERVAL_FLOOR_MS: u32 = 200;

/// Drop interval while the soft-drop input is held.
pub const SOFT_DROP_INTERVAL_MS: u32 = 30;

/// Rows that must be cleared to advance one level.
pub const ROWS_PER_LEVEL: u32 = 10;

/// Level at the start of every session.
pub const STARTING_LEVEL: u32 = 1;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N rows in a single merge:
/// - 0 rows: 0 points
/// - 1 row: 40 points
/// - 2 rows: 100 points
/// - 3 rows: 300 points
/// - 4 rows: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_is_centered_for_a_four_wide_box() {
        assert_eq!(SPAWN_X, 4);
        assert_eq!(SPAWN_X as u8 + 2, BOARD_WIDTH / 2);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn line_score_table_rewards_multi_row_clears() {
        assert!(LINE_SCORES.windows(2).all(|w| w[0] <= w[1]));
        assert!(LINE_SCORES[4] > 2 * LINE_SCORES[2]);
    }

    #[test]
    fn shape_color_indices_are_distinct_and_one_based() {
        let mut seen = [false; 8];
        for kind in ShapeKind::ALL {
            let idx = kind.color_index() as usize;
            assert!((1..=7).contains(&idx));
            assert!(!seen[idx], "duplicate index {}", idx);
            seen[idx] = true;
            assert_eq!(ShapeKind::from_color_index(idx as u8), Some(kind));
        }
        assert_eq!(ShapeKind::from_color_index(0), None);
        assert_eq!(ShapeKind::from_color_index(8), None);
    }
}

/// The seven tetromino shapes
///
/// Each shape has a fixed canonical color:
/// - **I**: Cyan
/// - **J**: Blue
/// - **L**: Orange
/// - **O**: Yellow
/// - **S**: Green
/// - **T**: Purple
/// - **Z**: Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All shapes, in color-index order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Stable 1-based color index (0 is reserved for "no occupancy").
    pub fn color_index(&self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::J => 2,
            ShapeKind::L => 3,
            ShapeKind::O => 4,
            ShapeKind::S => 5,
            ShapeKind::T => 6,
            ShapeKind::Z => 7,
        }
    }

    /// Inverse of [`ShapeKind::color_index`].
    pub fn from_color_index(index: u8) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Canonical display color as `(r, g, b)`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ShapeKind::I => (80, 227, 230),
            ShapeKind::J => (36, 95, 223),
            ShapeKind::L => (223, 173, 36),
            ShapeKind::O => (223, 217, 36),
            ShapeKind::S => (48, 211, 56),
            ShapeKind::T => (132, 61, 198),
            ShapeKind::Z => (227, 78, 78),
        }
    }
}

/// Relationship between a board cell and the pieces on it
///
/// - **Empty**: nothing here
/// - **Merged**: permanently landed geometry
/// - **Colliding**: footprint of the currently falling piece
/// - **Clear**: landing preview of the falling piece
///
/// Only `Merged` cells are obstacles. `Colliding` and `Clear` cells are
/// repainted every time the falling piece changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Merged,
    Colliding,
    Clear,
}

impl CellState {
    /// True for the states repainted on every redraw.
    pub fn is_transient(&self) -> bool {
        matches!(self, CellState::Colliding | CellState::Clear)
    }
}

/// A cell on the game board
///
/// `occupancy == None` always pairs with [`CellState::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub occupancy: Option<ShapeKind>,
    pub state: CellState,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        occupancy: None,
        state: CellState::Empty,
    };

    pub fn new(kind: ShapeKind, state: CellState) -> Self {
        Self {
            occupancy: Some(kind),
            state,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupancy.is_none()
    }

    pub fn is_merged(&self) -> bool {
        self.state == CellState::Merged
    }
}

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step in this direction.
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Discrete player intents
///
/// Input translators produce these; the session consumes them. `Tick` is not
/// an intent: the drop timer calls it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Switch to the fast drop interval
    SoftDropOn,
    /// Return to the level drop interval
    SoftDropOff,
    /// Start a new session; ignored while one is running
    Start,
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}
