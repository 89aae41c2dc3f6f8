//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`] and tracks the
//! held soft-drop key, including on terminals that never report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, is_soft_drop_key, should_quit};
