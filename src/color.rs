// src/color.rs

//! Defines the drawing color (`Color`), its packed 24-bit form, and a small
//! palette of named colors.

use serde::{Deserialize, Serialize};

/// Packed 24-bit RGB pixel value, laid out as `0x00RRGGBB`.
pub type PackedRgb = u32;

/// Standard named colors (indices 0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NamedColor {
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7, // Also known as Grey
    BrightBlack = 8,
    BrightRed = 9,
    BrightGreen = 10,
    BrightYellow = 11,
    BrightBlue = 12,
    BrightMagenta = 13,
    BrightCyan = 14,
    BrightWhite = 15,
}

impl NamedColor {
    /// Converts an index (0-15) to a `NamedColor`, or `None` if out of range.
    pub fn from_index(idx: u8) -> Option<Self> {
        use NamedColor::*;
        const ALL: [NamedColor; 16] = [
            Black,
            Red,
            Green,
            Yellow,
            Blue,
            Magenta,
            Cyan,
            White,
            BrightBlack,
            BrightRed,
            BrightGreen,
            BrightYellow,
            BrightBlue,
            BrightMagenta,
            BrightCyan,
            BrightWhite,
        ];
        ALL.get(idx as usize).copied()
    }

    /// Returns the RGB value of this named color.
    pub fn to_color(self) -> Color {
        match self {
            NamedColor::Black => Color::new(0, 0, 0),
            NamedColor::Red => Color::new(205, 0, 0),
            NamedColor::Green => Color::new(0, 205, 0),
            NamedColor::Yellow => Color::new(205, 205, 0),
            NamedColor::Blue => Color::new(0, 0, 238),
            NamedColor::Magenta => Color::new(205, 0, 205),
            NamedColor::Cyan => Color::new(0, 205, 205),
            NamedColor::White => Color::new(229, 229, 229),
            NamedColor::BrightBlack => Color::new(127, 127, 127),
            NamedColor::BrightRed => Color::new(255, 0, 0),
            NamedColor::BrightGreen => Color::new(0, 255, 0),
            NamedColor::BrightYellow => Color::new(255, 255, 0),
            NamedColor::BrightBlue => Color::new(92, 92, 255),
            NamedColor::BrightMagenta => Color::new(255, 0, 255),
            NamedColor::BrightCyan => Color::new(0, 255, 255),
            NamedColor::BrightWhite => Color::new(255, 255, 255),
        }
    }
}

/// An RGB drawing color, each component from 0 to 255.
///
/// The default color is white, matching the initial draw color of a fresh
/// canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs the components into a `0x00RRGGBB` pixel value.
    #[inline]
    pub const fn packed(self) -> PackedRgb {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpacks a `0x00RRGGBB` pixel value. The top byte is ignored.
    #[inline]
    pub const fn from_packed(px: PackedRgb) -> Self {
        Self {
            r: (px >> 16) as u8,
            g: (px >> 8) as u8,
            b: px as u8,
        }
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        named.to_color()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::new(r, g, b)
    }
}

/// Blends `src` over `dst` with 8-bit coverage `alpha`.
///
/// Uses the fast `(x + 1 + (x >> 8)) >> 8` approximation of `x / 255`.
#[inline]
pub fn blend(src: PackedRgb, dst: PackedRgb, alpha: u8) -> PackedRgb {
    match alpha {
        0 => dst,
        255 => src,
        a => {
            let a = a as u32;
            let channel = |shift: u32| {
                let s = (src >> shift) & 0xFF;
                let d = (dst >> shift) & 0xFF;
                let v = s * a + d * (255 - a);
                ((v + 1 + (v >> 8)) >> 8) & 0xFF
            };
            (channel(16) << 16) | (channel(8) << 8) | channel(0)
        }
    }
}
