//! Turns characters and key names into ordered key events.
//!
//! Nothing here performs I/O. Delivery belongs to whoever owns the guest
//! connection, which must send the events in the order they are returned.

use crate::event::KeyEvent;
use crate::layout::{self, SHIFT, Stroke};
use crate::scancode::Key;
use anyhow::{Result, bail};
use tracing::trace;

/// Events that type a single character.
///
/// The character tables are checked first. A character missing from both is
/// tried as a registry name, exact and then upper-cased.
pub fn keystroke(ch: char) -> Result<Vec<KeyEvent>> {
    let events = match layout::lookup(ch) {
        Some(Stroke::Plain(key)) => vec![KeyEvent::click(key)],
        Some(Stroke::Shifted(key)) => vec![
            KeyEvent::press(SHIFT),
            KeyEvent::click(key),
            KeyEvent::release(SHIFT),
        ],
        None => {
            let mut buf = [0u8; 4];
            match Key::from_name(ch.encode_utf8(&mut buf)) {
                Ok(key) => vec![KeyEvent::click(key)],
                Err(_) => bail!("Unable to find keycode for '{}'", ch),
            }
        }
    };

    trace!(ch = ?ch, events = ?events, "Synthesized keystroke");
    Ok(events)
}

/// A single click of a key named in the registry (`"enter"`, `"F5"`).
pub fn named(name: &str) -> Result<Vec<KeyEvent>> {
    Ok(vec![KeyEvent::click(Key::from_name(name)?)])
}

/// Either a single character or a key name.
pub fn token(token: &str) -> Result<Vec<KeyEvent>> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => keystroke(ch),
        (None, _) => bail!("Empty key name"),
        _ => named(token),
    }
}

/// Events that type the given text, character by character.
///
/// Fails without producing anything if any character cannot be typed.
pub fn text(text: &str) -> Result<Vec<KeyEvent>> {
    let mut events = Vec::with_capacity(text.len());
    for ch in text.chars() {
        events.extend(keystroke(ch)?);
    }
    Ok(events)
}

/// Like [`text`] with a final Enter.
pub fn line(line: &str) -> Result<Vec<KeyEvent>> {
    let mut events = text(line)?;
    events.push(KeyEvent::click(Key::Enter));
    Ok(events)
}

/// A two-modifier shortcut such as Cmd+Shift+T. Modifiers are released in
/// the reverse order they were pressed.
pub fn shortcut(outer: Key, inner: Key, key: Key) -> Vec<KeyEvent> {
    vec![
        KeyEvent::press(outer),
        KeyEvent::press(inner),
        KeyEvent::click(key),
        KeyEvent::release(inner),
        KeyEvent::release(outer),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyAction;
    use crate::layout::{SHIFTED, UNSHIFTED};

    #[test]
    fn test_unshifted_characters_click_once() -> Result<()> {
        for (ch, key) in UNSHIFTED {
            assert_eq!(keystroke(*ch)?, vec![KeyEvent::click(*key)], "{:?}", ch);
        }
        Ok(())
    }

    #[test]
    fn test_shifted_characters_wrap_in_shift() -> Result<()> {
        // '*' is typed from the keypad instead
        for (ch, key) in SHIFTED.iter().filter(|(ch, _)| *ch != '*') {
            assert_eq!(
                keystroke(*ch)?,
                vec![
                    KeyEvent::press(Key::ShiftLeft),
                    KeyEvent::click(*key),
                    KeyEvent::release(Key::ShiftLeft),
                ],
                "{:?}",
                ch
            );
        }
        Ok(())
    }

    #[test]
    fn test_unmappable_character_fails() {
        let error = keystroke('é').unwrap_err();
        assert_eq!(error.to_string(), "Unable to find keycode for 'é'");
        assert!(text("café").is_err());
        assert!(line("\n").is_err());
    }

    #[test_log::test]
    fn test_line_appends_enter() -> Result<()> {
        let command = "/Volumes/Image Volume/install";
        let mut expected = Vec::new();
        for ch in command.chars() {
            expected.extend(keystroke(ch)?);
        }
        expected.push(KeyEvent::click(Key::Enter));

        let events = line(command)?;
        assert_eq!(events, expected);
        assert_eq!(events.last(), Some(&KeyEvent::click(Key::Enter)));
        assert_eq!(
            events
                .iter()
                .filter(|event| event.key == Key::Enter)
                .count(),
            1
        );
        Ok(())
    }

    #[test]
    fn test_empty_line_is_just_enter() -> Result<()> {
        assert_eq!(line("")?, vec![KeyEvent::click(Key::Enter)]);
        Ok(())
    }

    #[test]
    fn test_named_keys_ignore_case() -> Result<()> {
        for name in ["enter", "Enter", "ENTER"] {
            assert_eq!(named(name)?, vec![KeyEvent::click(Key::Enter)]);
        }
        assert!(named("not_a_key").is_err());
        Ok(())
    }

    #[test]
    fn test_token_dispatch() -> Result<()> {
        assert_eq!(token("Q")?, keystroke('Q')?);
        assert_eq!(token("escape")?, vec![KeyEvent::click(Key::Escape)]);
        assert!(token("").is_err());
        Ok(())
    }

    #[test]
    fn test_shortcut_order() {
        let events = shortcut(Key::CmdLeft, Key::ShiftLeft, Key::T);
        let actions: Vec<KeyAction> = events.iter().map(|event| event.action).collect();
        let keys: Vec<Key> = events.iter().map(|event| event.key).collect();

        assert_eq!(
            actions,
            vec![
                KeyAction::Press,
                KeyAction::Press,
                KeyAction::Click,
                KeyAction::Release,
                KeyAction::Release,
            ]
        );
        assert_eq!(
            keys,
            vec![
                Key::CmdLeft,
                Key::ShiftLeft,
                Key::T,
                Key::ShiftLeft,
                Key::CmdLeft,
            ]
        );
    }
}
