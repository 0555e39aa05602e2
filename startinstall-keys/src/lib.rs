//! Keyboard input for virtual machines that only understand scan codes.
//!
//! A string like `"/Volumes/Image Volume/install"` becomes a list of
//! [`KeyEvent`]s using the static tables in [`layout`] and the names in the
//! [`Key`] registry.

pub mod event;
pub mod keystroke;
pub mod layout;
pub mod scancode;

pub use event::{KeyAction, KeyEvent};
pub use keystroke::{keystroke, line, named, shortcut, text, token};
pub use scancode::{Key, ScanCode};
