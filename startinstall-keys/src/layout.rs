//! Character tables for a US keyboard layout.
//!
//! The unshifted table is consulted before the shifted one, so a character
//! listed in both (`*`) types its unshifted key.

use crate::scancode::Key;

/// Characters typed with a single click of their key.
pub static UNSHIFTED: &[(char, Key)] = &[
    ('a', Key::A),
    ('b', Key::B),
    ('c', Key::C),
    ('d', Key::D),
    ('e', Key::E),
    ('f', Key::F),
    ('g', Key::G),
    ('h', Key::H),
    ('i', Key::I),
    ('j', Key::J),
    ('k', Key::K),
    ('l', Key::L),
    ('m', Key::M),
    ('n', Key::N),
    ('o', Key::O),
    ('p', Key::P),
    ('q', Key::Q),
    ('r', Key::R),
    ('s', Key::S),
    ('t', Key::T),
    ('u', Key::U),
    ('v', Key::V),
    ('w', Key::W),
    ('x', Key::X),
    ('y', Key::Y),
    ('z', Key::Z),
    ('0', Key::Digit0),
    ('1', Key::Digit1),
    ('2', Key::Digit2),
    ('3', Key::Digit3),
    ('4', Key::Digit4),
    ('5', Key::Digit5),
    ('6', Key::Digit6),
    ('7', Key::Digit7),
    ('8', Key::Digit8),
    ('9', Key::Digit9),
    ('\\', Key::Backslash),
    ('[', Key::CbraceLeft),
    (']', Key::CbraceRight),
    (';', Key::Colon),
    ('.', Key::Greater),
    (',', Key::Less),
    ('§', Key::LessGreater),
    ('-', Key::Minus),
    ('=', Key::PadEqual),
    ('+', Key::PadPlus),
    ('/', Key::PadSlash),
    ('*', Key::PadStar),
    ('\'', Key::Quote),
    ('`', Key::Tilda),
    (' ', Key::Space),
    ('\t', Key::Tab),
];

/// Characters that need shift held while their key is clicked.
pub static SHIFTED: &[(char, Key)] = &[
    ('A', Key::A),
    ('B', Key::B),
    ('C', Key::C),
    ('D', Key::D),
    ('E', Key::E),
    ('F', Key::F),
    ('G', Key::G),
    ('H', Key::H),
    ('I', Key::I),
    ('J', Key::J),
    ('K', Key::K),
    ('L', Key::L),
    ('M', Key::M),
    ('N', Key::N),
    ('O', Key::O),
    ('P', Key::P),
    ('Q', Key::Q),
    ('R', Key::R),
    ('S', Key::S),
    ('T', Key::T),
    ('U', Key::U),
    ('V', Key::V),
    ('W', Key::W),
    ('X', Key::X),
    ('Y', Key::Y),
    ('Z', Key::Z),
    (')', Key::Digit0),
    ('!', Key::Digit1),
    ('@', Key::Digit2),
    ('#', Key::Digit3),
    ('$', Key::Digit4),
    ('%', Key::Digit5),
    ('^', Key::Digit6),
    ('&', Key::Digit7),
    ('*', Key::Digit8),
    ('(', Key::Digit9),
    ('|', Key::Backslash),
    ('{', Key::CbraceLeft),
    ('}', Key::CbraceRight),
    (':', Key::Colon),
    ('>', Key::Greater),
    ('<', Key::Less),
    ('±', Key::LessGreater),
    ('_', Key::Minus),
    ('"', Key::Quote),
    ('?', Key::Slash),
    ('~', Key::Tilda),
];

/// The modifier held for characters in [`SHIFTED`].
pub const SHIFT: Key = Key::ShiftLeft;

/// How a character is produced on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Plain(Key),
    Shifted(Key),
}

fn find(table: &[(char, Key)], ch: char) -> Option<Key> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == ch)
        .map(|(_, key)| *key)
}

/// Look a character up in the tables, unshifted first.
pub fn lookup(ch: char) -> Option<Stroke> {
    find(UNSHIFTED, ch)
        .map(Stroke::Plain)
        .or_else(|| find(SHIFTED, ch).map(Stroke::Shifted))
}
