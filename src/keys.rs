// src/keys.rs

//! Normalized key and mouse button codes carried by input events.
//!
//! Key codes are plain `i32`s: printable keys use their character code,
//! special keys live above `0x10000` and function keys above `0x20000`.
//! A negative code denotes a release of the same key. [`KeySymbol`] offers a
//! typed view of a code for callers that prefer matching on an enum.

use serde::{Deserialize, Serialize};

pub const KEY_TAB: i32 = '\t' as i32;
pub const KEY_BACKSPACE: i32 = 0x08;
pub const KEY_ENTER: i32 = '\r' as i32;
pub const KEY_ESCAPE: i32 = 0x1B;
pub const KEY_SPACE: i32 = ' ' as i32;

pub const KEY_UP: i32 = 0x10000;
pub const KEY_DOWN: i32 = KEY_UP + 1;
pub const KEY_RIGHT: i32 = KEY_UP + 2;
pub const KEY_LEFT: i32 = KEY_UP + 3;
pub const KEY_INSERT: i32 = KEY_UP + 4;
pub const KEY_DELETE: i32 = KEY_UP + 5;
pub const KEY_HOME: i32 = KEY_UP + 6;
pub const KEY_END: i32 = KEY_UP + 7;
pub const KEY_PGUP: i32 = KEY_UP + 8;
pub const KEY_PGDN: i32 = KEY_UP + 9;
pub const KEY_LSHIFT: i32 = KEY_UP + 10;
pub const KEY_RSHIFT: i32 = KEY_UP + 11;
pub const KEY_LCTRL: i32 = KEY_UP + 12;
pub const KEY_RCTRL: i32 = KEY_UP + 13;
pub const KEY_LALT: i32 = KEY_UP + 14;
pub const KEY_RALT: i32 = KEY_UP + 15;
pub const KEY_LWIN: i32 = KEY_UP + 16;
pub const KEY_RWIN: i32 = KEY_UP + 17;
pub const KEY_MENU: i32 = KEY_UP + 18;
pub const KEY_NUML: i32 = KEY_UP + 19;
pub const KEY_CAPSL: i32 = KEY_UP + 20;
pub const KEY_SCRL: i32 = KEY_UP + 21;

/// Base of the function key range; `KEY_F0 + n` is function key `n`.
pub const KEY_F0: i32 = 0x20000;
pub const KEY_F1: i32 = KEY_F0 + 1;
pub const KEY_F12: i32 = KEY_F0 + 12;
pub const KEY_F15: i32 = KEY_F0 + 15;

pub const BTN_LEFT: i32 = 1;
pub const BTN_MIDDLE: i32 = 2;
pub const BTN_RIGHT: i32 = 3;
pub const BTN_WHEELUP: i32 = 4;
pub const BTN_WHEELDOWN: i32 = 5;

/// Typed view of a normalized key code (press or release).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeySymbol {
    /// A key that produces a character.
    Char(char),
    /// Function key `F<n>`, `n` in 0..=15.
    F(u8),

    Up,
    Down,
    Right,
    Left,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    Menu,
    NumLock,
    CapsLock,
    ScrollLock,

    Enter,
    Backspace,
    Tab,
    Escape,

    #[default]
    Unknown,
}

impl KeySymbol {
    /// Interprets a key code; the sign (press/release) is ignored.
    pub fn from_code(code: i32) -> Self {
        let code = code.wrapping_abs();
        match code {
            KEY_TAB => KeySymbol::Tab,
            KEY_BACKSPACE => KeySymbol::Backspace,
            KEY_ENTER => KeySymbol::Enter,
            KEY_ESCAPE => KeySymbol::Escape,
            KEY_UP => KeySymbol::Up,
            KEY_DOWN => KeySymbol::Down,
            KEY_RIGHT => KeySymbol::Right,
            KEY_LEFT => KeySymbol::Left,
            KEY_INSERT => KeySymbol::Insert,
            KEY_DELETE => KeySymbol::Delete,
            KEY_HOME => KeySymbol::Home,
            KEY_END => KeySymbol::End,
            KEY_PGUP => KeySymbol::PageUp,
            KEY_PGDN => KeySymbol::PageDown,
            KEY_LSHIFT => KeySymbol::LeftShift,
            KEY_RSHIFT => KeySymbol::RightShift,
            KEY_LCTRL => KeySymbol::LeftControl,
            KEY_RCTRL => KeySymbol::RightControl,
            KEY_LALT => KeySymbol::LeftAlt,
            KEY_RALT => KeySymbol::RightAlt,
            KEY_LWIN => KeySymbol::LeftSuper,
            KEY_RWIN => KeySymbol::RightSuper,
            KEY_MENU => KeySymbol::Menu,
            KEY_NUML => KeySymbol::NumLock,
            KEY_CAPSL => KeySymbol::CapsLock,
            KEY_SCRL => KeySymbol::ScrollLock,
            c if (KEY_F0..=KEY_F15).contains(&c) => KeySymbol::F((c - KEY_F0) as u8),
            c if c > 0 && c < KEY_UP => char::from_u32(c as u32)
                .map(KeySymbol::Char)
                .unwrap_or(KeySymbol::Unknown),
            _ => KeySymbol::Unknown,
        }
    }

    /// Returns true if the key symbol represents a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            KeySymbol::LeftShift
                | KeySymbol::RightShift
                | KeySymbol::LeftControl
                | KeySymbol::RightControl
                | KeySymbol::LeftAlt
                | KeySymbol::RightAlt
                | KeySymbol::LeftSuper
                | KeySymbol::RightSuper
                | KeySymbol::CapsLock
                | KeySymbol::NumLock
        )
    }
}

/// Represents mouse buttons, including the synthesized wheel buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    Other(u8),
}

impl MouseButton {
    /// Interprets a button code; the sign (press/release) is ignored.
    /// Returns `None` for code 0 (motion events carry no button).
    pub fn from_code(code: i32) -> Option<Self> {
        match code.wrapping_abs() {
            0 => None,
            BTN_LEFT => Some(MouseButton::Left),
            BTN_MIDDLE => Some(MouseButton::Middle),
            BTN_RIGHT => Some(MouseButton::Right),
            BTN_WHEELUP => Some(MouseButton::WheelUp),
            BTN_WHEELDOWN => Some(MouseButton::WheelDown),
            other => Some(MouseButton::Other(other.min(u8::MAX as i32) as u8)),
        }
    }
}
