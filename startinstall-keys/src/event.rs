use crate::scancode::{Key, ScanCode};
use strum::Display;

/// What the virtual keyboard should do with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum KeyAction {
    /// Hold the key down.
    Press,
    /// Let go of a held key.
    Release,
    /// Press and immediately release.
    Click,
}

/// A single event for the guest keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Press,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Release,
        }
    }

    pub fn click(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Click,
        }
    }

    pub fn scan_code(&self) -> ScanCode {
        self.key.scan_code()
    }
}

impl std::fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.action, self.key)
    }
}
