//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play a falling-block game on a 12x20 board, with no
//! dependency on terminals, clocks or I/O. Time is driven from the outside:
//! the caller asks [`GameSession::drop_interval_ms`] how long to wait and then
//! calls [`GameSession::tick`].
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes and their matrices
//! - [`board`]: cell grid, painting, merging and row removal
//! - [`collision`]: legality of a proposed placement
//! - [`rotation`]: clockwise rotation with sideways kicks
//! - [`merge`]: landing a piece and clearing full rows
//! - [`scoring`]: points, levels and drop speed
//! - [`rng`]: seeded uniform shape selection
//! - [`session`]: the `NotStarted -> Playing -> GameOver` state machine
//! - [`snapshot`]: plain-data copy of a session for rendering
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{Direction, Phase};
//!
//! let mut game = GameSession::new(12345);
//! assert_eq!(game.drop_interval_ms(), None);
//!
//! game.start();
//! game.move_piece(Direction::Right);
//! game.rotate();
//! let state = game.tick();
//!
//! assert_eq!(state.phase, Phase::Playing);
//! assert_eq!(state.drop_interval_ms, Some(1200));
//! ```

pub mod board;
pub mod collision;
pub mod merge;
pub mod pieces;
pub mod player;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{drop_position, is_colliding};
pub use merge::{merge_and_clear, MergeOutcome};
pub use pieces::{shape_matrix, Piece, ShapeMatrix};
pub use player::{Player, Position};
pub use rng::{PieceSource, SimpleRng};
pub use rotation::{player_rotate, rotate};
pub use scoring::{drop_interval_ms, line_score, GameProgress};
pub use session::{GameSession, SessionEvent, SessionEvents, SessionState};
pub use snapshot::GameSnapshot;
