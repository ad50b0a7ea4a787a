/// Keyboard handling.
///
/// Movement is driven by *held* keys rather than individual key events.
/// `KeyHold` records the frame number of the last press/repeat event for
/// every key; each frame the loop asks which movement keys are still
/// "fresh" and sets the ship's intent flags accordingly.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
///   `Repeat` / `Release` events, keys are dropped on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence,
///   which is shorter than the OS repeat interval.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Command;
use crate::entities::Phase;

/// A key counts as held if its last press/repeat arrived within this many
/// frames (≈133 ms at 30 FPS).
pub const HOLD_WINDOW: u64 = 4;

pub const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
pub const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

#[derive(Debug, Default)]
pub struct KeyHold {
    last_seen: HashMap<KeyCode, u64>,
}

impl KeyHold {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press or repeat.
    pub fn press(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(code, frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.last_seen.remove(&code);
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }

    pub fn is_held(&self, code: &KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(code)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn any_held(&self, codes: &[KeyCode], frame: u64) -> bool {
        codes.iter().any(|code| self.is_held(code, frame))
    }
}

/// What a single key press asks for.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyAction {
    Quit,
    Command(Command),
}

/// Map a key press to an action for the current phase. Movement keys return
/// `None`; they are read from `KeyHold` every frame instead.
pub fn map_key(phase: Phase, key: &KeyEvent) -> Option<KeyAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyAction::Quit);
    }

    if phase == Phase::GameOver {
        // The prompt owns the keyboard so names may contain any letter.
        return match key.code {
            KeyCode::Esc => Some(KeyAction::Quit),
            KeyCode::Enter => Some(KeyAction::Command(Command::Confirm)),
            KeyCode::Backspace => Some(KeyAction::Command(Command::Backspace)),
            KeyCode::Char(ch) => Some(KeyAction::Command(Command::TypeChar(ch))),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Char(' ') => Some(KeyAction::Command(Command::Fire)),
        KeyCode::Char('p') | KeyCode::Char('P') if phase == Phase::Idle => {
            Some(KeyAction::Command(Command::Start))
        }
        KeyCode::Enter => Some(KeyAction::Command(Command::Confirm)),
        _ => None,
    }
}
