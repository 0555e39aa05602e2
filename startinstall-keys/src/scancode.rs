//! The keycode registry: symbolic key names and the scan codes a guest's
//! virtual keyboard receives for them.
//!
//! Scan codes are PC/AT set 1 make codes. Extended keys keep their `0xE0`
//! prefix in the high byte, so the left command key is `0xE05B`.

use anyhow::{Result, anyhow};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A hardware-level identifier for a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanCode(pub u16);

impl ScanCode {
    /// Whether the code belongs to the `0xE0` extended range.
    pub fn is_extended(&self) -> bool {
        self.0 & 0xff00 == 0xe000
    }
}

impl std::fmt::Display for ScanCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_extended() {
            write!(f, "0x{:04x}", self.0)
        } else {
            write!(f, "0x{:02x}", self.0)
        }
    }
}

/// Every key the registry knows by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Key {
    Escape,
    #[strum(to_string = "1")]
    Digit1,
    #[strum(to_string = "2")]
    Digit2,
    #[strum(to_string = "3")]
    Digit3,
    #[strum(to_string = "4")]
    Digit4,
    #[strum(to_string = "5")]
    Digit5,
    #[strum(to_string = "6")]
    Digit6,
    #[strum(to_string = "7")]
    Digit7,
    #[strum(to_string = "8")]
    Digit8,
    #[strum(to_string = "9")]
    Digit9,
    #[strum(to_string = "0")]
    Digit0,
    Minus,
    /// The `=`/`+` key next to backspace.
    Plus,
    Backspace,
    Tab,
    Q,
    W,
    E,
    R,
    T,
    Y,
    U,
    I,
    O,
    P,
    CbraceLeft,
    CbraceRight,
    Enter,
    CtrlLeft,
    A,
    S,
    D,
    F,
    G,
    H,
    J,
    K,
    L,
    Colon,
    Quote,
    Tilda,
    ShiftLeft,
    Backslash,
    Z,
    X,
    C,
    V,
    B,
    N,
    M,
    Less,
    Greater,
    Slash,
    ShiftRight,
    PadStar,
    AltLeft,
    Space,
    CapsLock,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    NumLock,
    ScrollLock,
    #[strum(to_string = "PAD_7")]
    Pad7,
    #[strum(to_string = "PAD_8")]
    Pad8,
    #[strum(to_string = "PAD_9")]
    Pad9,
    PadMinus,
    #[strum(to_string = "PAD_4")]
    Pad4,
    #[strum(to_string = "PAD_5")]
    Pad5,
    #[strum(to_string = "PAD_6")]
    Pad6,
    PadPlus,
    #[strum(to_string = "PAD_1")]
    Pad1,
    #[strum(to_string = "PAD_2")]
    Pad2,
    #[strum(to_string = "PAD_3")]
    Pad3,
    #[strum(to_string = "PAD_0")]
    Pad0,
    PadDelete,
    /// The extra key between left shift and `Z` on ISO keyboards.
    LessGreater,
    F11,
    F12,
    PadEqual,
    PadEnter,
    CtrlRight,
    PadSlash,
    Print,
    AltRight,
    Home,
    Up,
    PageUp,
    Left,
    Right,
    End,
    Down,
    PageDown,
    Insert,
    Delete,
    /// Left command (macOS) or windows key.
    CmdLeft,
    CmdRight,
    Menu,
}

impl Key {
    /// Look up a key by its registry name. An exact match wins; otherwise the
    /// upper-cased name is tried, so `enter` and `Enter` both find `ENTER`.
    pub fn from_name(name: &str) -> Result<Key> {
        name.parse::<Key>()
            .or_else(|_| name.to_uppercase().parse::<Key>())
            .map_err(|_| anyhow!("Unable to find keycode for '{}'", name))
    }

    /// The registry name, as the SDK spells it.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn scan_code(&self) -> ScanCode {
        ScanCode(match self {
            Key::Escape => 0x01,
            Key::Digit1 => 0x02,
            Key::Digit2 => 0x03,
            Key::Digit3 => 0x04,
            Key::Digit4 => 0x05,
            Key::Digit5 => 0x06,
            Key::Digit6 => 0x07,
            Key::Digit7 => 0x08,
            Key::Digit8 => 0x09,
            Key::Digit9 => 0x0a,
            Key::Digit0 => 0x0b,
            Key::Minus => 0x0c,
            Key::Plus => 0x0d,
            Key::Backspace => 0x0e,
            Key::Tab => 0x0f,
            Key::Q => 0x10,
            Key::W => 0x11,
            Key::E => 0x12,
            Key::R => 0x13,
            Key::T => 0x14,
            Key::Y => 0x15,
            Key::U => 0x16,
            Key::I => 0x17,
            Key::O => 0x18,
            Key::P => 0x19,
            Key::CbraceLeft => 0x1a,
            Key::CbraceRight => 0x1b,
            Key::Enter => 0x1c,
            Key::CtrlLeft => 0x1d,
            Key::A => 0x1e,
            Key::S => 0x1f,
            Key::D => 0x20,
            Key::F => 0x21,
            Key::G => 0x22,
            Key::H => 0x23,
            Key::J => 0x24,
            Key::K => 0x25,
            Key::L => 0x26,
            Key::Colon => 0x27,
            Key::Quote => 0x28,
            Key::Tilda => 0x29,
            Key::ShiftLeft => 0x2a,
            Key::Backslash => 0x2b,
            Key::Z => 0x2c,
            Key::X => 0x2d,
            Key::C => 0x2e,
            Key::V => 0x2f,
            Key::B => 0x30,
            Key::N => 0x31,
            Key::M => 0x32,
            Key::Less => 0x33,
            Key::Greater => 0x34,
            Key::Slash => 0x35,
            Key::ShiftRight => 0x36,
            Key::PadStar => 0x37,
            Key::AltLeft => 0x38,
            Key::Space => 0x39,
            Key::CapsLock => 0x3a,
            Key::F1 => 0x3b,
            Key::F2 => 0x3c,
            Key::F3 => 0x3d,
            Key::F4 => 0x3e,
            Key::F5 => 0x3f,
            Key::F6 => 0x40,
            Key::F7 => 0x41,
            Key::F8 => 0x42,
            Key::F9 => 0x43,
            Key::F10 => 0x44,
            Key::NumLock => 0x45,
            Key::ScrollLock => 0x46,
            Key::Pad7 => 0x47,
            Key::Pad8 => 0x48,
            Key::Pad9 => 0x49,
            Key::PadMinus => 0x4a,
            Key::Pad4 => 0x4b,
            Key::Pad5 => 0x4c,
            Key::Pad6 => 0x4d,
            Key::PadPlus => 0x4e,
            Key::Pad1 => 0x4f,
            Key::Pad2 => 0x50,
            Key::Pad3 => 0x51,
            Key::Pad0 => 0x52,
            Key::PadDelete => 0x53,
            Key::LessGreater => 0x56,
            Key::F11 => 0x57,
            Key::F12 => 0x58,
            Key::PadEqual => 0x59,
            Key::PadEnter => 0xe01c,
            Key::CtrlRight => 0xe01d,
            Key::PadSlash => 0xe035,
            Key::Print => 0xe037,
            Key::AltRight => 0xe038,
            Key::Home => 0xe047,
            Key::Up => 0xe048,
            Key::PageUp => 0xe049,
            Key::Left => 0xe04b,
            Key::Right => 0xe04d,
            Key::End => 0xe04f,
            Key::Down => 0xe050,
            Key::PageDown => 0xe051,
            Key::Insert => 0xe052,
            Key::Delete => 0xe053,
            Key::CmdLeft => 0xe05b,
            Key::CmdRight => 0xe05c,
            Key::Menu => 0xe05d,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_registry_names() {
        assert_eq!(Key::CbraceLeft.name(), "CBRACE_LEFT");
        assert_eq!(Key::ShiftLeft.to_string(), "SHIFT_LEFT");
        assert_eq!(Key::Digit0.name(), "0");
        assert_eq!(Key::Pad7.name(), "PAD_7");
        assert_eq!(Key::F11.name(), "F11");
        assert_eq!(Key::LessGreater.name(), "LESS_GREATER");
    }

    #[test]
    fn test_from_name_falls_back_to_upper_case() -> Result<()> {
        assert_eq!(Key::from_name("ENTER")?, Key::Enter);
        assert_eq!(Key::from_name("enter")?, Key::Enter);
        assert_eq!(Key::from_name("Cmd_Left")?, Key::CmdLeft);
        assert_eq!(Key::from_name("7")?, Key::Digit7);
        assert!(Key::from_name("hyper").is_err());
        Ok(())
    }

    #[test]
    fn test_every_name_parses_back() -> Result<()> {
        for key in Key::iter() {
            assert_eq!(Key::from_name(key.name())?, key);
        }
        Ok(())
    }

    #[test]
    fn test_scan_codes_are_unique() {
        let codes: HashSet<ScanCode> = Key::iter().map(|key| key.scan_code()).collect();
        assert_eq!(codes.len(), Key::iter().count());
    }

    #[test]
    fn test_extended_scan_codes() {
        assert!(Key::CmdLeft.scan_code().is_extended());
        assert!(!Key::ShiftLeft.scan_code().is_extended());
        assert_eq!(Key::CmdLeft.scan_code().to_string(), "0xe05b");
        assert_eq!(Key::Enter.scan_code().to_string(), "0x1c");
    }
}
