//! Soft-drop hold tracking for terminal environments.
//!
//! Holding the soft-drop key must produce exactly one `SoftDropOn` and, when
//! it is let go, one `SoftDropOff`. Terminals that report key releases make
//! this direct. For the rest, auto-repeat presses keep the hold alive and a
//! short timeout after the last one stands in for the release.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::map::{handle_key_event, is_soft_drop_key};
use crate::types::Intent;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained soft drop.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks the soft-drop key between presses and releases.
#[derive(Debug, Clone)]
pub struct InputHandler {
    down_held: bool,
    last_down_time: Instant,
    /// Set once the terminal delivered a real release event.
    release_events_seen: bool,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            down_held: false,
            last_down_time: Instant::now(),
            release_events_seen: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Handle a key press (first press, not an auto-repeat).
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<Intent> {
        if is_soft_drop_key(key.code) {
            self.last_down_time = Instant::now();
            if self.down_held {
                return None;
            }
            self.down_held = true;
            return Some(Intent::SoftDropOn);
        }
        handle_key_event(key)
    }

    /// Handle a terminal auto-repeat.
    ///
    /// Sideways moves repeat; a repeated soft-drop key only keeps the hold
    /// alive. Rotation and start do not repeat.
    pub fn handle_key_repeat(&mut self, key: KeyEvent) -> Option<Intent> {
        if is_soft_drop_key(key.code) {
            self.last_down_time = Instant::now();
            return None;
        }
        match handle_key_event(key) {
            Some(intent @ (Intent::MoveLeft | Intent::MoveRight)) => Some(intent),
            _ => None,
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) -> Option<Intent> {
        self.release_events_seen = true;
        if is_soft_drop_key(code) && self.down_held {
            self.down_held = false;
            return Some(Intent::SoftDropOff);
        }
        None
    }

    /// Release a stale hold when the terminal never reports releases.
    pub fn update(&mut self) -> Option<Intent> {
        if !self.down_held || self.release_events_seen {
            return None;
        }
        let since_last = self.last_down_time.elapsed().as_millis();
        if since_last > u128::from(self.key_release_timeout_ms) {
            self.down_held = false;
            return Some(Intent::SoftDropOff);
        }
        None
    }

    pub fn reset(&mut self) {
        self.down_held = false;
        self.last_down_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
