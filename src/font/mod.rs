// src/font/mod.rs

//! Text rendering for the canvas.
//!
//! A canvas renders text through exactly one of two typefaces:
//!
//! - [`BitmapFont`]: the embedded fixed-size glyph table, used whenever no
//!   vector font is loaded;
//! - [`VectorFont`]: an outline font loaded from a TrueType/OpenType file.
//!
//! Both implement [`Typeface`], and [`CanvasFont`] selects between them at
//! load time. In both cases the cursor y is the text baseline.

pub mod bitmap;
pub mod outline;
pub mod vector;

pub use bitmap::BitmapFont;
pub use vector::{FontError, VectorFont};

use crate::color::Color;
use crate::config::CONFIG;
use crate::surface::{Point, Surface};
use log::{info, warn};

/// The capability set shared by both font variants.
pub trait Typeface {
    /// Pixels above the baseline.
    fn ascent(&self) -> i32;
    /// Pixels below the baseline (non-negative).
    fn descent(&self) -> i32;
    /// Pixel width `text` occupies when drawn.
    fn text_width(&self, text: &str) -> i32;
    /// Draws `text` with its baseline at `cursor.y`, starting at `cursor.x`,
    /// and advances the cursor past the drawn text.
    fn draw(&self, surface: &mut Surface, cursor: &mut Point, text: &str, color: Color);
}

/// Vector fonts are never loaded below this point size.
pub const MIN_FONT_SIZE: u32 = 16;

/// The smallest size a vector font is loaded at: the configured minimum,
/// but never less than [`MIN_FONT_SIZE`].
pub fn min_font_size() -> u32 {
    CONFIG.fonts.min_size.max(MIN_FONT_SIZE)
}

/// A font request: file name (or path), point size and antialiasing.
///
/// The size is raised to [`min_font_size`] on construction and again when
/// the font is loaded, so a request built as a struct literal is held to
/// the same floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub name: String,
    pub size: u32,
    pub antialias: bool,
}

impl FontSpec {
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size: size.max(min_font_size()),
            antialias: CONFIG.fonts.antialias,
        }
    }

    /// The size the font is actually loaded at.
    pub fn effective_size(&self) -> u32 {
        self.size.max(min_font_size())
    }

    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }
}

/// The font state of a canvas.
#[derive(Debug, Clone, Default)]
pub enum CanvasFont {
    /// No vector font loaded; text uses the embedded bitmap font.
    #[default]
    Bitmap,
    Vector(VectorFont),
}

impl CanvasFont {
    /// Loads the requested vector font, falling back to the bitmap font if
    /// it cannot be loaded.
    pub fn load(spec: &FontSpec) -> Self {
        match VectorFont::load(spec) {
            Ok(font) => {
                info!(
                    "Loaded font '{}' at {}pt (ascent {}, descent {})",
                    spec.name,
                    font.size(),
                    font.ascent(),
                    font.descent()
                );
                CanvasFont::Vector(font)
            }
            Err(e) => {
                warn!(
                    "Failed to load font '{}': {}; falling back to bitmap font",
                    spec.name, e
                );
                CanvasFont::Bitmap
            }
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, CanvasFont::Vector(_))
    }

    fn typeface(&self) -> &dyn Typeface {
        match self {
            CanvasFont::Bitmap => &BitmapFont,
            CanvasFont::Vector(font) => font,
        }
    }
}

impl Typeface for CanvasFont {
    fn ascent(&self) -> i32 {
        self.typeface().ascent()
    }

    fn descent(&self) -> i32 {
        self.typeface().descent()
    }

    fn text_width(&self, text: &str) -> i32 {
        self.typeface().text_width(text)
    }

    fn draw(&self, surface: &mut Surface, cursor: &mut Point, text: &str, color: Color) {
        self.typeface().draw(surface, cursor, text, color)
    }
}
