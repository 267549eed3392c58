/// Keyboard state for the game loop.
///
/// Terminals deliver key events, not key state.  `KeyTracker` records, per
/// key, the frame number of its last press or repeat and forgets it on
/// release.  Each frame the tracker is asked which keys are still "fresh"
/// (seen within the hold window) and all their effects apply at once, so
/// Space can be held together with a direction.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): real `Press` /
///   `Repeat` / `Release` events, keys drop on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows up as
///   repeated presses).  Keys expire after the hold window, which is shorter
///   than the OS repeat interval, so a key stays live while it repeats.

use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One frame's worth of player intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub quit: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// Hold window in frames: about 133 ms, always refreshed by a ≥15 Hz OS
/// key-repeat.
pub fn hold_window(fps: u32) -> u64 {
    (u64::from(fps) * 2 / 15).max(1)
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Key → frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    hold_window: u64,
    quit: bool,
}

impl KeyTracker {
    pub fn new(hold_window: u64) -> Self {
        Self { key_frame: HashMap::new(), hold_window, quit: false }
    }

    /// Feed one terminal event observed during `frame`.
    pub fn handle(&mut self, event: &Event, frame: u64) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
                    _ => {}
                }
                self.key_frame.insert(normalize(*code), frame);
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(normalize(*code), frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&normalize(*code));
            }
        }
    }

    /// True if `key` was seen within the hold window before `frame`.
    pub fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&normalize(key))
            .map(|&last| frame.saturating_sub(last) <= self.hold_window)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&key| self.is_held(key, frame))
    }

    /// Current intent.  The quit signal latches once seen.
    pub fn snapshot(&self, frame: u64) -> InputState {
        InputState {
            quit: self.quit,
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')], frame),
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s')], frame),
            fire: self.is_held(KeyCode::Char(' '), frame),
        }
    }
}

/// Letters are tracked case-insensitively so Shift or Caps Lock do not stick.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
