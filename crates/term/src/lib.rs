//! Terminal rendering.
//!
//! A small game-oriented layer: [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and
//! [`TerminalRenderer`] rewrites only the rows that changed since the last
//! frame. No widgets or layout engine; each board cell is a fixed block of
//! terminal columns.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{rgb, Digits, FrameBuffer, Glyph, Style, Weight};
pub use game_view::{AnchorY, BoardFrame, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
