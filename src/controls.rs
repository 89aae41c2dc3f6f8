//! Routes terminal key events into a [`GameSession`].
//!
//! The binary's loop stays a thin poll/tick/draw cycle; everything that
//! decides whether a key changed the game lives here.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::core::GameSession;
use crate::input::InputHandler;

/// What the loop has to do after feeding input to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reaction {
    /// The session was touched; draw a new frame.
    pub redraw: bool,
    /// A new game began; the drop timer starts over.
    pub restarted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Controls {
    input: InputHandler,
}

impl Controls {
    pub fn new(key_release_timeout_ms: u32) -> Self {
        Self {
            input: InputHandler::new().with_key_release_timeout_ms(key_release_timeout_ms),
        }
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.input.is_soft_drop_held()
    }

    /// Feed one key event. Quit keys are the caller's business.
    pub fn on_key(&mut self, session: &mut GameSession, key: KeyEvent) -> Reaction {
        let intent = match key.kind {
            KeyEventKind::Press => self.input.handle_key_press(key),
            KeyEventKind::Repeat => self.input.handle_key_repeat(key),
            KeyEventKind::Release => self.input.handle_key_release(key.code),
        };
        let Some(intent) = intent else {
            return Reaction::default();
        };

        let session_id = session.session_id();
        session.apply(intent);
        let restarted = session.session_id() != session_id;
        if restarted {
            self.input.reset();
        }
        Reaction {
            redraw: true,
            restarted,
        }
    }

    /// Let go of a soft drop the terminal never reported releasing.
    pub fn on_idle(&mut self, session: &mut GameSession) -> Reaction {
        match self.input.update() {
            Some(intent) => {
                session.apply(intent);
                Reaction {
                    redraw: true,
                    restarted: false,
                }
            }
            None => Reaction::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Phase;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_enter_starts_a_new_game() {
        let mut session = GameSession::new(31);
        let mut controls = Controls::new(150);

        let r = controls.on_key(&mut session, press(KeyCode::Enter));
        assert_eq!(r, Reaction { redraw: true, restarted: true });
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_space_while_playing_keeps_the_game() {
        let mut session = GameSession::new(31);
        session.start();
        for _ in 0..40 {
            session.tick();
        }
        let merged = session.board().merged_cells().count();
        assert!(merged > 0);
        let mut controls = Controls::new(150);

        let r = controls.on_key(&mut session, press(KeyCode::Char(' ')));
        assert!(!r.restarted);
        assert_eq!(session.session_id(), 1);
        assert_eq!(session.board().merged_cells().count(), merged);
    }

    #[test]
    fn test_release_ends_soft_drop() {
        let mut session = GameSession::new(8);
        session.start();
        let mut controls = Controls::new(150);

        controls.on_key(&mut session, press(KeyCode::Down));
        assert!(session.is_soft_dropping());
        let r = controls.on_key(&mut session, release(KeyCode::Down));
        assert!(r.redraw);
        assert!(!session.is_soft_dropping());
    }

    #[test]
    fn test_timed_out_soft_drop_asks_for_redraw() {
        let mut session = GameSession::new(8);
        session.start();
        let mut controls = Controls::new(0);

        controls.on_key(&mut session, press(KeyCode::Char('s')));
        assert_eq!(session.drop_interval_ms(), Some(30));
        std::thread::sleep(Duration::from_millis(5));

        let r = controls.on_idle(&mut session);
        assert!(r.redraw);
        assert!(!controls.is_soft_drop_held());
        assert_eq!(session.drop_interval_ms(), Some(1200));
        assert_eq!(controls.on_idle(&mut session), Reaction::default());
    }

    #[test]
    fn test_unmapped_key_changes_nothing() {
        let mut session = GameSession::new(8);
        session.start();
        let player = *session.player();
        let mut controls = Controls::new(150);

        assert_eq!(controls.on_key(&mut session, press(KeyCode::Char('x'))), Reaction::default());
        assert_eq!(*session.player(), player);
    }
}
