/// Keyboard sampling: turns crossterm key events into one `FrameInput` per
/// logic frame.
///
/// Each held key is recorded with the frame its last press/repeat arrived.
/// Terminals with keyboard-enhancement support send `Release`, so there a key
/// stays held until it is released. Classic terminals only repeat `Press`,
/// so a key expires after `HOLD_WINDOW` silent frames.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::HOLD_WINDOW;
use crate::entities::FrameInput;

pub const ATTACK_KEY: KeyCode = KeyCode::Char('a');
/// Shift or Caps Lock turns the attack key upper-case.
pub const ATTACK_KEY_SHIFTED: KeyCode = KeyCode::Char('A');
pub const JUMP_KEY: KeyCode = KeyCode::Char(' ');

#[derive(Debug, Default)]
pub struct InputTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    jump_pressed: bool,
    quit: bool,
    /// The terminal reports key releases.
    release_events: bool,
}

impl InputTracker {
    pub fn new(release_events: bool) -> Self {
        InputTracker {
            release_events,
            ..Self::default()
        }
    }

    /// Start a new frame; events recorded afterwards belong to it.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.jump_pressed = false;
    }

    pub fn record(&mut self, event: &Event) {
        let Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        }) = event
        else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                self.key_frame.insert(*code, self.frame);
                if *code == JUMP_KEY {
                    self.jump_pressed = true;
                }
                if is_quit(*code, *modifiers) {
                    self.quit = true;
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(*code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(code);
            }
        }
    }

    /// Until released when the terminal reports releases; otherwise while
    /// `key` was seen within the last `HOLD_WINDOW` frames.
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.release_events || self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn snapshot(&self) -> FrameInput {
        FrameInput {
            left: self.is_held(KeyCode::Left),
            right: self.is_held(KeyCode::Right),
            jump: self.jump_pressed,
            attack: self.is_held(ATTACK_KEY) || self.is_held(ATTACK_KEY_SHIFTED),
            quit: self.quit,
        }
    }
}

/// Esc, `q` and Ctrl-C all stand for closing the window.
pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
