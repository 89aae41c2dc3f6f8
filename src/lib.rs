//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core,input,term,types}` and
//! holds the pieces only the binary needs: configuration, key routing and
//! the event log.

pub mod config;
pub mod controls;
pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::GameConfig;
pub use controls::{Controls, Reaction};
pub use event_log::EventLog;
