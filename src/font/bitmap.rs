// src/font/bitmap.rs

//! The embedded 8x8 bitmap font.
//!
//! Each glyph is eight rows of one byte; bit `n` of a row is column `n`
//! (least significant bit is the leftmost pixel). The bottom row is the
//! descent row, used by descenders such as `g` and `,`. Codes outside
//! printable ASCII render blank but still advance the cursor.

use super::Typeface;
use crate::color::Color;
use crate::surface::{Point, Surface};
use log::trace;

pub const GLYPH_WIDTH: i32 = 8;
pub const GLYPH_HEIGHT: i32 = 8;
/// Rows of each glyph below the baseline.
pub const GLYPH_DESCENT: i32 = 1;

const BLANK: [u8; 8] = [0; 8];

/// Glyphs for U+0020 through U+007E.
static PRINTABLE: [[u8; 8]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x0C, 0x1E, 0x1E, 0x0C, 0x0C, 0x00, 0x0C, 0x00], // !
    [0x36, 0x36, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // "
    [0x36, 0x36, 0x7F, 0x36, 0x7F, 0x36, 0x36, 0x00], // #
    [0x0C, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x0C, 0x00], // $
    [0x00, 0x63, 0x33, 0x18, 0x0C, 0x66, 0x63, 0x00], // %
    [0x1C, 0x36, 0x1C, 0x6E, 0x3B, 0x33, 0x6E, 0x00], // &
    [0x06, 0x06, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00], // '
    [0x18, 0x0C, 0x06, 0x06, 0x06, 0x0C, 0x18, 0x00], // (
    [0x06, 0x0C, 0x18, 0x18, 0x18, 0x0C, 0x06, 0x00], // )
    [0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00], // *
    [0x00, 0x0C, 0x0C, 0x3F, 0x0C, 0x0C, 0x00, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ,
    [0x00, 0x00, 0x00, 0x3F, 0x00, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00], // .
    [0x60, 0x30, 0x18, 0x0C, 0x06, 0x03, 0x01, 0x00], // /
    [0x3E, 0x63, 0x73, 0x7B, 0x6F, 0x67, 0x3E, 0x00], // 0
    [0x0C, 0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x3F, 0x00], // 1
    [0x1E, 0x33, 0x30, 0x1C, 0x06, 0x33, 0x3F, 0x00], // 2
    [0x1E, 0x33, 0x30, 0x1C, 0x30, 0x33, 0x1E, 0x00], // 3
    [0x38, 0x3C, 0x36, 0x33, 0x7F, 0x30, 0x78, 0x00], // 4
    [0x3F, 0x03, 0x1F, 0x30, 0x30, 0x33, 0x1E, 0x00], // 5
    [0x1C, 0x06, 0x03, 0x1F, 0x33, 0x33, 0x1E, 0x00], // 6
    [0x3F, 0x33, 0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x00], // 7
    [0x1E, 0x33, 0x33, 0x1E, 0x33, 0x33, 0x1E, 0x00], // 8
    [0x1E, 0x33, 0x33, 0x3E, 0x30, 0x18, 0x0E, 0x00], // 9
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x00], // :
    [0x00, 0x0C, 0x0C, 0x00, 0x00, 0x0C, 0x0C, 0x06], // ;
    [0x18, 0x0C, 0x06, 0x03, 0x06, 0x0C, 0x18, 0x00], // <
    [0x00, 0x00, 0x3F, 0x00, 0x00, 0x3F, 0x00, 0x00], // =
    [0x06, 0x0C, 0x18, 0x30, 0x18, 0x0C, 0x06, 0x00], // >
    [0x1E, 0x33, 0x30, 0x18, 0x0C, 0x00, 0x0C, 0x00], // ?
    [0x3E, 0x63, 0x7B, 0x7B, 0x7B, 0x03, 0x1E, 0x00], // @
    [0x0C, 0x1E, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x00], // A
    [0x3F, 0x66, 0x66, 0x3E, 0x66, 0x66, 0x3F, 0x00], // B
    [0x3C, 0x66, 0x03, 0x03, 0x03, 0x66, 0x3C, 0x00], // C
    [0x1F, 0x36, 0x66, 0x66, 0x66, 0x36, 0x1F, 0x00], // D
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x46, 0x7F, 0x00], // E
    [0x7F, 0x46, 0x16, 0x1E, 0x16, 0x06, 0x0F, 0x00], // F
    [0x3C, 0x66, 0x03, 0x03, 0x73, 0x66, 0x7C, 0x00], // G
    [0x33, 0x33, 0x33, 0x3F, 0x33, 0x33, 0x33, 0x00], // H
    [0x1E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // I
    [0x78, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E, 0x00], // J
    [0x67, 0x66, 0x36, 0x1E, 0x36, 0x66, 0x67, 0x00], // K
    [0x0F, 0x06, 0x06, 0x06, 0x46, 0x66, 0x7F, 0x00], // L
    [0x63, 0x77, 0x7F, 0x7F, 0x6B, 0x63, 0x63, 0x00], // M
    [0x63, 0x67, 0x6F, 0x7B, 0x73, 0x63, 0x63, 0x00], // N
    [0x1C, 0x36, 0x63, 0x63, 0x63, 0x36, 0x1C, 0x00], // O
    [0x3F, 0x66, 0x66, 0x3E, 0x06, 0x06, 0x0F, 0x00], // P
    [0x1E, 0x33, 0x33, 0x33, 0x3B, 0x1E, 0x38, 0x00], // Q
    [0x3F, 0x66, 0x66, 0x3E, 0x36, 0x66, 0x67, 0x00], // R
    [0x1E, 0x33, 0x07, 0x0E, 0x38, 0x33, 0x1E, 0x00], // S
    [0x3F, 0x2D, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // T
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x33, 0x3F, 0x00], // U
    [0x33, 0x33, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // V
    [0x63, 0x63, 0x63, 0x6B, 0x7F, 0x77, 0x63, 0x00], // W
    [0x63, 0x63, 0x36, 0x1C, 0x1C, 0x36, 0x63, 0x00], // X
    [0x33, 0x33, 0x33, 0x1E, 0x0C, 0x0C, 0x1E, 0x00], // Y
    [0x7F, 0x63, 0x31, 0x18, 0x4C, 0x66, 0x7F, 0x00], // Z
    [0x1E, 0x06, 0x06, 0x06, 0x06, 0x06, 0x1E, 0x00], // [
    [0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x40, 0x00], // backslash
    [0x1E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x1E, 0x00], // ]
    [0x08, 0x1C, 0x36, 0x63, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF], // _
    [0x0C, 0x0C, 0x18, 0x00, 0x00, 0x00, 0x00, 0x00], // `
    [0x00, 0x00, 0x1E, 0x30, 0x3E, 0x33, 0x6E, 0x00], // a
    [0x07, 0x06, 0x06, 0x3E, 0x66, 0x66, 0x3B, 0x00], // b
    [0x00, 0x00, 0x1E, 0x33, 0x03, 0x33, 0x1E, 0x00], // c
    [0x38, 0x30, 0x30, 0x3E, 0x33, 0x33, 0x6E, 0x00], // d
    [0x00, 0x00, 0x1E, 0x33, 0x3F, 0x03, 0x1E, 0x00], // e
    [0x1C, 0x36, 0x06, 0x0F, 0x06, 0x06, 0x0F, 0x00], // f
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x1F], // g
    [0x07, 0x06, 0x36, 0x6E, 0x66, 0x66, 0x67, 0x00], // h
    [0x0C, 0x00, 0x0E, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // i
    [0x30, 0x00, 0x30, 0x30, 0x30, 0x33, 0x33, 0x1E], // j
    [0x07, 0x06, 0x66, 0x36, 0x1E, 0x36, 0x67, 0x00], // k
    [0x0E, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x1E, 0x00], // l
    [0x00, 0x00, 0x33, 0x7F, 0x7F, 0x6B, 0x63, 0x00], // m
    [0x00, 0x00, 0x1F, 0x33, 0x33, 0x33, 0x33, 0x00], // n
    [0x00, 0x00, 0x1E, 0x33, 0x33, 0x33, 0x1E, 0x00], // o
    [0x00, 0x00, 0x3B, 0x66, 0x66, 0x3E, 0x06, 0x0F], // p
    [0x00, 0x00, 0x6E, 0x33, 0x33, 0x3E, 0x30, 0x78], // q
    [0x00, 0x00, 0x3B, 0x6E, 0x66, 0x06, 0x0F, 0x00], // r
    [0x00, 0x00, 0x3E, 0x03, 0x1E, 0x30, 0x1F, 0x00], // s
    [0x08, 0x0C, 0x3E, 0x0C, 0x0C, 0x2C, 0x18, 0x00], // t
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x33, 0x6E, 0x00], // u
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x1E, 0x0C, 0x00], // v
    [0x00, 0x00, 0x63, 0x6B, 0x7F, 0x7F, 0x36, 0x00], // w
    [0x00, 0x00, 0x63, 0x36, 0x1C, 0x36, 0x63, 0x00], // x
    [0x00, 0x00, 0x33, 0x33, 0x33, 0x3E, 0x30, 0x1F], // y
    [0x00, 0x00, 0x3F, 0x19, 0x0C, 0x26, 0x3F, 0x00], // z
    [0x38, 0x0C, 0x0C, 0x07, 0x0C, 0x0C, 0x38, 0x00], // {
    [0x18, 0x18, 0x18, 0x00, 0x18, 0x18, 0x18, 0x00], // |
    [0x07, 0x0C, 0x0C, 0x38, 0x0C, 0x0C, 0x07, 0x00], // }
    [0x6E, 0x3B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ~
];

/// Glyph rows for a byte of text.
pub fn glyph(code: u8) -> &'static [u8; 8] {
    match code {
        0x20..=0x7E => &PRINTABLE[(code - 0x20) as usize],
        _ => &BLANK,
    }
}

/// The embedded bitmap font. Text is consumed byte by byte, so a multi-byte
/// UTF-8 character advances by one glyph per byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl Typeface for BitmapFont {
    fn ascent(&self) -> i32 {
        GLYPH_HEIGHT - GLYPH_DESCENT
    }

    fn descent(&self) -> i32 {
        GLYPH_DESCENT
    }

    fn text_width(&self, text: &str) -> i32 {
        (text.len() as i32).saturating_mul(GLYPH_WIDTH)
    }

    fn draw(&self, surface: &mut Surface, cursor: &mut Point, text: &str, color: Color) {
        let ascent = self.ascent();
        let descent = self.descent();
        if cursor.y - ascent < 0 || cursor.y + descent >= surface.height() {
            trace!("bitmap text at {:?} does not fit vertically, skipped", cursor);
            return;
        }

        let px = color.packed();
        let baseline = cursor.y;
        for code in text.bytes() {
            cursor.y -= ascent;
            for row in glyph(code) {
                for col in 0..GLYPH_WIDTH {
                    if row & (1 << col) != 0 {
                        surface.set(cursor.x, cursor.y, px);
                    }
                    cursor.x += 1;
                    if cursor.x >= surface.width() {
                        cursor.y = baseline;
                        return;
                    }
                }
                cursor.x -= GLYPH_WIDTH;
                cursor.y += 1;
            }
            cursor.x += GLYPH_WIDTH;
            cursor.y -= descent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_printable_codes_are_blank() {
        assert_eq!(glyph(0x00), &BLANK);
        assert_eq!(glyph(0x7F), &BLANK);
        assert_eq!(glyph(0xC3), &BLANK);
        assert_ne!(glyph(b'A'), &BLANK);
    }

    #[test]
    fn width_is_fixed_per_byte() {
        assert_eq!(BitmapFont.text_width(""), 0);
        assert_eq!(BitmapFont.text_width("abc"), 3 * GLYPH_WIDTH);
    }

    #[test]
    fn draws_glyph_bits_relative_to_baseline() {
        let mut s = Surface::new(16, 16).unwrap();
        let mut cursor = Point::new(0, 10);
        BitmapFont.draw(&mut s, &mut cursor, "_", Color::WHITE);
        // '_' is a full bottom (descent) row.
        for x in 0..8 {
            assert_eq!(s.get(x, 10), Some(0xFFFFFF), "x={x}");
        }
        assert_eq!(s.get(0, 9), Some(0));
        assert_eq!(cursor, Point::new(8, 10));
    }

    #[test]
    fn leftmost_pixel_is_least_significant_bit() {
        let mut s = Surface::new(16, 16).unwrap();
        let mut cursor = Point::new(0, 10);
        // '/' first row is 0x60: columns 5 and 6.
        BitmapFont.draw(&mut s, &mut cursor, "/", Color::WHITE);
        let top = 10 - BitmapFont.ascent();
        assert_eq!(s.get(5, top), Some(0xFFFFFF));
        assert_eq!(s.get(6, top), Some(0xFFFFFF));
        assert_eq!(s.get(1, top), Some(0));
    }

    #[test]
    fn text_that_does_not_fit_vertically_is_skipped() {
        let mut s = Surface::new(16, 16).unwrap();
        let mut cursor = Point::new(0, 3);
        BitmapFont.draw(&mut s, &mut cursor, "A", Color::WHITE);
        assert!(s.pixels().iter().all(|&p| p == 0));
        assert_eq!(cursor, Point::new(0, 3));

        let mut cursor = Point::new(0, 15);
        BitmapFont.draw(&mut s, &mut cursor, "A", Color::WHITE);
        assert!(s.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn running_off_the_right_edge_aborts() {
        let mut s = Surface::new(12, 16).unwrap();
        let mut cursor = Point::new(0, 10);
        BitmapFont.draw(&mut s, &mut cursor, "HH", Color::WHITE);
        assert_eq!(cursor, Point::new(12, 10));
        // First glyph complete, second glyph only partially drawn (first row).
        assert_eq!(s.get(0, 10 - 7 + 6), Some(0xFFFFFF));
        assert_eq!(s.get(8, 10 - 7 + 1), Some(0));
    }
}
