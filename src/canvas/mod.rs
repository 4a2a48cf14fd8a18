// src/canvas/mod.rs

//! The stateful drawing canvas.
//!
//! A [`Canvas`] owns a pixel buffer plus the drawing state that the
//! primitives read and advance: the cursor, the current color, the
//! transparency flag and the font. Every drawing method returns `&mut Self`
//! so calls compose in order:
//!
//! ```
//! use core_canvas::canvas::Canvas;
//! use core_canvas::color::Color;
//!
//! let mut canvas = Canvas::with_size(32, 32);
//! canvas
//!     .move_to(0, 0)
//!     .set_color(Color::new(0, 255, 0))
//!     .fill_box(4, 4)
//!     .line_to(31, 31);
//! assert_eq!(canvas.pixel(3, 3), Some(0x00FF00));
//! assert_eq!(canvas.cursor().x, 31);
//! ```
//!
//! Drawing never fails. Moves to positions outside the buffer are ignored,
//! lines stop at the buffer edge, fills and text are clipped, and a canvas
//! without a buffer (never opened, or whose `open` failed) ignores all
//! drawing.

pub mod line;
pub mod stamp;

#[cfg(test)]
mod tests;

pub use line::LineStepper;
pub use stamp::Stamp;

use crate::color::{Color, PackedRgb};
use crate::font::{CanvasFont, FontSpec, Typeface};
use crate::surface::{Point, Rect, Surface};
use log::{debug, warn};
use std::path::Path;

/// Color key applied to transparent stamp sources: pure black.
const TRANSPARENT_KEY: PackedRgb = 0x000000;

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    surface: Option<Surface>,
    cursor: Point,
    color: Color,
    transparent: bool,
    font: CanvasFont,
}

impl Canvas {
    /// Creates a canvas without a buffer; call [`Canvas::open`] before
    /// drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a canvas and opens a `width` x `height` buffer. Check
    /// [`Canvas::is_open`] if the size may be invalid.
    pub fn with_size(width: i32, height: i32) -> Self {
        let mut canvas = Self::new();
        canvas.open(width, height);
        canvas
    }

    /// Allocates a new black buffer, discarding the old one, and moves the
    /// cursor to the center. Returns whether the buffer was allocated.
    pub fn open(&mut self, width: i32, height: i32) -> bool {
        self.surface = None;
        self.cursor = Point::new(width / 2, height / 2);
        match Surface::new(width, height) {
            Ok(surface) => {
                self.surface = Some(surface);
                true
            }
            Err(e) => {
                warn!("Failed to open canvas: {:#}", e);
                false
            }
        }
    }

    /// Releases the buffer. Drawing state (cursor, color, font) is kept.
    pub fn close(&mut self) {
        if self.surface.take().is_some() {
            debug!("Canvas buffer released");
        }
    }

    pub fn is_open(&self) -> bool {
        self.surface.is_some()
    }

    /// Buffer width, 0 without a buffer.
    pub fn width(&self) -> i32 {
        self.surface.as_ref().map_or(0, Surface::width)
    }

    /// Buffer height, 0 without a buffer.
    pub fn height(&self) -> i32 {
        self.surface.as_ref().map_or(0, Surface::height)
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// The packed color at (`x`, `y`), or `None` outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> Option<PackedRgb> {
        self.surface.as_ref()?.get(x, y)
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn color(&self) -> Color {
        self.color
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.surface.as_ref().is_some_and(|s| s.in_bounds(x, y))
    }

    /// Moves the cursor to (`x`, `y`) if that lies inside the buffer.
    pub fn move_to(&mut self, x: i32, y: i32) -> &mut Self {
        if self.in_bounds(x, y) {
            self.cursor = Point::new(x, y);
        }
        self
    }

    /// Moves the cursor by (`dx`, `dy`) if the target lies inside the
    /// buffer.
    pub fn move_by(&mut self, dx: i32, dy: i32) -> &mut Self {
        let x = self.cursor.x.saturating_add(dx);
        let y = self.cursor.y.saturating_add(dy);
        self.move_to(x, y)
    }

    pub fn set_color(&mut self, color: impl Into<Color>) -> &mut Self {
        self.color = color.into();
        self
    }

    /// Plots the current color at the cursor.
    pub fn dot(&mut self) -> &mut Self {
        let (Point { x, y }, px) = (self.cursor, self.color.packed());
        if let Some(surface) = self.surface.as_mut() {
            surface.set(x, y, px);
        }
        self
    }

    /// Draws a line from the cursor to the cursor plus (`dx`, `dy`).
    ///
    /// The start pixel is always plotted. The cursor follows the line and
    /// stops on the last pixel inside the buffer if the line leaves it.
    pub fn line_by(&mut self, dx: i32, dy: i32) -> &mut Self {
        if self.surface.is_none() {
            return self;
        }
        self.dot();
        for p in LineStepper::new(self.cursor, dx, dy) {
            if !self.in_bounds(p.x, p.y) {
                break;
            }
            self.cursor = p;
            self.dot();
        }
        self
    }

    /// Draws a line from the cursor to (`x`, `y`).
    pub fn line_to(&mut self, x: i32, y: i32) -> &mut Self {
        let dx = x.saturating_sub(self.cursor.x);
        let dy = y.saturating_sub(self.cursor.y);
        self.line_by(dx, dy)
    }

    /// Fills a `w` x `h` box whose corner is the cursor. Negative extents
    /// grow the box left of or above the cursor. The cursor does not move.
    pub fn fill_box(&mut self, w: i32, h: i32) -> &mut Self {
        let rect = Rect::new(self.cursor.x, self.cursor.y, w, h).normalized();
        let px = self.color.packed();
        if let Some(surface) = self.surface.as_mut() {
            surface.fill_rect(rect, px);
        }
        self
    }

    /// Fills the box spanned by the cursor and (`x`, `y`), the latter
    /// exclusive.
    pub fn fill_box_to(&mut self, x: i32, y: i32) -> &mut Self {
        let w = x.saturating_sub(self.cursor.x);
        let h = y.saturating_sub(self.cursor.y);
        self.fill_box(w, h)
    }

    /// Draws `text` with its baseline on the cursor row and advances the
    /// cursor past it.
    ///
    /// Without a vector font, each byte is one glyph of the embedded 8x8
    /// font: text that would cross the top or bottom edge is not drawn at
    /// all, and drawing stops where a glyph reaches the right edge.
    pub fn text(&mut self, text: &str) -> &mut Self {
        let color = self.color;
        if let Some(surface) = self.surface.as_mut() {
            self.font.draw(surface, &mut self.cursor, text, color);
        }
        self
    }

    pub fn text_char(&mut self, ch: char) -> &mut Self {
        let mut buf = [0u8; 4];
        self.text(ch.encode_utf8(&mut buf))
    }

    /// Copies (part of) `source`'s buffer onto this canvas.
    ///
    /// When `source` is transparent, its pure-black pixels are skipped.
    pub fn stamp(&mut self, source: &Canvas, stamp: Stamp) -> &mut Self {
        let (Some(dst), Some(src)) = (self.surface.as_mut(), source.surface.as_ref()) else {
            return self;
        };
        let key = source.transparent.then_some(TRANSPARENT_KEY);
        dst.blit(src, stamp.source_rect(src.bounds()), stamp.dest, key);
        self
    }

    /// Stamps a region of this canvas onto itself. The region is copied out
    /// before drawing, so overlapping source and destination are fine.
    pub fn stamp_within(&mut self, stamp: Stamp) -> &mut Self {
        let Some(snapshot) = self.surface.clone() else {
            return self;
        };
        let key = self.transparent.then_some(TRANSPARENT_KEY);
        if let Some(dst) = self.surface.as_mut() {
            dst.blit(&snapshot, stamp.source_rect(snapshot.bounds()), stamp.dest, key);
        }
        self
    }

    /// Marks this canvas as a transparent stamp source: black pixels are
    /// keyed out when it is stamped elsewhere.
    pub fn set_transparent(&mut self, transparent: bool) -> &mut Self {
        self.transparent = transparent;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Replaces the current font. If the requested font cannot be loaded,
    /// the canvas falls back to the embedded bitmap font; check
    /// [`Canvas::has_font`] to find out.
    pub fn load_font(&mut self, spec: FontSpec) -> &mut Self {
        self.font = CanvasFont::Bitmap;
        self.font = CanvasFont::load(&spec);
        self
    }

    /// Whether a vector font is loaded.
    pub fn has_font(&self) -> bool {
        self.font.is_vector()
    }

    /// Switches the loaded vector font between smooth and hard-edged
    /// rendering. No effect on the bitmap font.
    pub fn set_antialias(&mut self, antialias: bool) -> &mut Self {
        if let CanvasFont::Vector(font) = &mut self.font {
            font.set_antialias(antialias);
        }
        self
    }

    /// Pixels above the baseline for the current font.
    pub fn ascent(&self) -> i32 {
        self.font.ascent()
    }

    /// Pixels below the baseline for the current font.
    pub fn descent(&self) -> i32 {
        self.font.descent()
    }

    pub fn text_width(&self, text: &str) -> i32 {
        self.font.text_width(text)
    }

    /// Writes the buffer as an uncompressed BMP file.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Some(surface) = self.surface.as_ref() else {
            warn!("Cannot save {}: canvas has no buffer", path.display());
            return false;
        };
        match surface.save_bmp(path) {
            Ok(()) => {
                debug!("Canvas saved to {}", path.display());
                true
            }
            Err(e) => {
                warn!("{:#}", e);
                false
            }
        }
    }
}
