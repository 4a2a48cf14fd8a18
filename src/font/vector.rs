// src/font/vector.rs

//! Vector fonts loaded from TrueType/OpenType files.

use super::outline::{self, Coverage, Edge, OutlineFlattener};
use super::{FontSpec, Typeface};
use crate::color::Color;
use crate::config::CONFIG;
use crate::surface::{AlphaMask, Point, Surface};
use log::{debug, trace};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use ttf_parser::{Face, FaceParsingError, GlyphId};

#[derive(Error, Debug)]
pub enum FontError {
    #[error("font file '{0}' not found")]
    NotFound(String),
    #[error("failed to read font file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font: {0}")]
    Parse(#[from] FaceParsingError),
    #[error("font has an invalid units-per-em value")]
    InvalidMetrics,
}

/// A loaded vector font at a fixed pixel size.
///
/// The font file contents are immutable and reference counted, so clones
/// share them and each clone stays valid independently of the others.
#[derive(Clone)]
pub struct VectorFont {
    data: Arc<[u8]>,
    size: u32,
    antialias: bool,
    scale: f32,
    ascent: i32,
    descent: i32,
}

impl fmt::Debug for VectorFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorFont")
            .field("bytes", &self.data.len())
            .field("size", &self.size)
            .field("antialias", &self.antialias)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish()
    }
}

impl VectorFont {
    /// Loads `spec.name`, searching the configured font directories when the
    /// name is not a path to an existing file.
    pub fn load(spec: &FontSpec) -> Result<Self, FontError> {
        Self::load_from(spec, &CONFIG.fonts.search_dirs)
    }

    /// Like [`VectorFont::load`] with explicit search directories. The size
    /// is raised to the minimum font size.
    pub fn load_from(spec: &FontSpec, search_dirs: &[PathBuf]) -> Result<Self, FontError> {
        let path = resolve(&spec.name, search_dirs)
            .ok_or_else(|| FontError::NotFound(spec.name.clone()))?;
        let data = std::fs::read(&path).map_err(|source| FontError::Io {
            path: path.clone(),
            source,
        })?;
        debug!("Read {} bytes of font data from {}", data.len(), path.display());
        Self::from_bytes(data, spec.effective_size(), spec.antialias)
    }

    /// Parses font file contents; `size` is the pixel size of one em.
    pub fn from_bytes(data: Vec<u8>, size: u32, antialias: bool) -> Result<Self, FontError> {
        let face = Face::parse(&data, 0)?;
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(FontError::InvalidMetrics);
        }
        let scale = size as f32 / units_per_em as f32;
        let ascent = (face.ascender() as f32 * scale).ceil() as i32;
        let descent = (-(face.descender() as f32) * scale).ceil().max(0.0) as i32;
        Ok(Self {
            data: Arc::from(data),
            size,
            antialias,
            scale,
            ascent,
            descent,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    pub fn set_antialias(&mut self, antialias: bool) {
        self.antialias = antialias;
    }

    fn face(&self) -> Option<Face<'_>> {
        // Parsing was validated at load time; this only re-borrows the tables.
        Face::parse(&self.data, 0).ok()
    }

    /// Places the glyphs of `text` on a line starting at pen x 0.
    fn layout(&self, face: &Face<'_>, text: &str) -> Layout {
        let mut layout = Layout {
            glyphs: Vec::with_capacity(text.len()),
            advance: 0.0,
            ink_left: 0.0,
            ink_right: 0.0,
        };
        let mut pen = 0.0f32;
        for ch in text.chars() {
            let id = face.glyph_index(ch).unwrap_or(GlyphId(0));
            let ink = face.glyph_bounding_box(id).map(|bbox| {
                (
                    pen + bbox.x_min as f32 * self.scale,
                    pen + bbox.x_max as f32 * self.scale,
                )
            });
            if let Some((left, right)) = ink {
                layout.ink_left = layout.ink_left.min(left);
                layout.ink_right = layout.ink_right.max(right);
            }
            layout.glyphs.push(PlacedGlyph { id, pen, ink });
            pen += face.glyph_hor_advance(id).unwrap_or(0) as f32 * self.scale;
        }
        layout.advance = pen;
        layout.ink_right = layout.ink_right.max(pen);
        layout
    }

    /// Renders `text` into a coverage mask one text line high
    /// (`ascent + descent`), with the baseline at row `ascent`.
    pub fn render(&self, text: &str) -> RenderedText {
        self.render_within(text, None)
    }

    /// Like [`VectorFont::render`], but the mask stops `limit` pixels right
    /// of the pen start. Glyphs entirely past the limit are not rasterized.
    pub fn render_within(&self, text: &str, limit: Option<i32>) -> RenderedText {
        let Some(face) = self.face() else {
            return RenderedText {
                mask: AlphaMask::new(0, 0),
                left: 0,
                advance: 0,
            };
        };
        let layout = self.layout(&face, text);
        let left = layout.ink_left.floor().min(0.0) as i32;
        let mut right = layout.ink_right.ceil() as i32;
        if let Some(limit) = limit {
            right = right.min(limit.max(left));
        }
        let width = right - left;
        let height = self.ascent + self.descent;

        let mut edges: Vec<Edge> = Vec::new();
        for glyph in &layout.glyphs {
            match glyph.ink {
                Some((ink_left, _)) if ink_left < right as f32 => {}
                _ => continue,
            }
            let mut flattener = OutlineFlattener::new(
                &mut edges,
                self.scale,
                glyph.pen - left as f32,
                self.ascent as f32,
            );
            face.outline_glyph(glyph.id, &mut flattener);
        }
        let mode = if self.antialias {
            Coverage::Smooth
        } else {
            Coverage::Hard
        };
        trace!(
            "Rendering {:?}: {} edges into {}x{} at {} ({:?})",
            text,
            edges.len(),
            width,
            height,
            left,
            mode
        );
        RenderedText {
            mask: outline::rasterize(&edges, width, height, mode),
            left,
            advance: layout.advance.ceil() as i32,
        }
    }
}

/// A line of text rendered by [`VectorFont::render`].
#[derive(Debug, Clone)]
pub struct RenderedText {
    pub mask: AlphaMask,
    /// Column of the mask's left edge relative to the pen start; negative
    /// when ink overhangs to the left of the first glyph.
    pub left: i32,
    /// Pixels the pen moves past the text.
    pub advance: i32,
}

struct PlacedGlyph {
    id: GlyphId,
    pen: f32,
    /// Horizontal ink extent, or `None` for glyphs without an outline.
    ink: Option<(f32, f32)>,
}

struct Layout {
    glyphs: Vec<PlacedGlyph>,
    advance: f32,
    ink_left: f32,
    ink_right: f32,
}

impl Typeface for VectorFont {
    fn ascent(&self) -> i32 {
        self.ascent
    }

    fn descent(&self) -> i32 {
        self.descent
    }

    fn text_width(&self, text: &str) -> i32 {
        match self.face() {
            Some(face) => self.layout(&face, text).advance.ceil() as i32,
            None => 0,
        }
    }

    fn draw(&self, surface: &mut Surface, cursor: &mut Point, text: &str, color: Color) {
        if text.is_empty() {
            return;
        }
        let limit = surface.width().saturating_sub(cursor.x);
        let rendered = self.render_within(text, Some(limit));
        surface.composite_mask(
            &rendered.mask,
            Point::new(cursor.x + rendered.left, cursor.y - self.ascent),
            color,
        );
        cursor.x += rendered.advance;
    }
}

/// Finds the font file for `name`: the name itself if it is a file,
/// otherwise the first match in `search_dirs` (searched one level deep).
fn resolve(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }
    let file_name = direct.file_name()?;
    for dir in search_dirs {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let nested = entry.path().join(file_name);
            if nested.is_file() {
                return Some(nested);
            }
        }
    }
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use test_log::test;

    /// Locates a TrueType font installed on the machine, if any.
    pub(crate) fn system_font() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/Library/Fonts/Arial.ttf",
        ];
        CANDIDATES.iter().map(PathBuf::from).find(|p| p.is_file())
    }

    #[test]
    fn rejects_data_that_is_not_a_font() {
        let err = VectorFont::from_bytes(b"not a font".to_vec(), 16, true).unwrap_err();
        assert!(matches!(err, FontError::Parse(_)));
    }

    #[test]
    fn missing_file_is_not_found() {
        let spec = FontSpec::new("no-such-font.ttf", 16);
        let err = VectorFont::load_from(&spec, &[]).unwrap_err();
        assert!(matches!(err, FontError::NotFound(_)));
    }

    #[test]
    fn resolves_names_through_search_dirs() {
        let Some(path) = system_font() else {
            log::info!("no system font installed, skipping");
            return;
        };
        let dir = path.parent().unwrap().to_path_buf();
        let name = path.file_name().unwrap().to_str().unwrap();
        let spec = FontSpec::new(name, 20);
        let font = VectorFont::load_from(&spec, &[dir]).expect("font should resolve");
        assert_eq!(font.size(), 20);
    }

    #[test]
    fn undersized_literal_request_loads_at_minimum() {
        let Some(path) = system_font() else {
            log::info!("no system font installed, skipping");
            return;
        };
        let name = path.to_string_lossy().into_owned();
        let tiny = FontSpec {
            name: name.clone(),
            size: 4,
            antialias: true,
        };
        let small = VectorFont::load_from(&tiny, &[]).unwrap();
        let floor = VectorFont::load_from(&FontSpec::new(name, 16), &[]).unwrap();
        assert_eq!(small.size(), 16);
        assert_eq!(small.ascent(), floor.ascent());
        assert_eq!(small.text_width("Hello"), floor.text_width("Hello"));
    }

    #[test]
    fn metrics_scale_with_size() {
        let Some(path) = system_font() else {
            log::info!("no system font installed, skipping");
            return;
        };
        let data = std::fs::read(&path).unwrap();
        let small = VectorFont::from_bytes(data.clone(), 16, true).unwrap();
        let large = VectorFont::from_bytes(data, 32, true).unwrap();
        assert!(small.ascent() > 0 && small.descent() > 0);
        assert!(large.ascent() > small.ascent());
        assert!(large.text_width("Hello") > small.text_width("Hello"));
        assert_eq!(small.text_width(""), 0);
    }

    #[test]
    fn render_produces_line_sized_mask_with_ink() {
        let Some(path) = system_font() else {
            log::info!("no system font installed, skipping");
            return;
        };
        let data = std::fs::read(&path).unwrap();
        for antialias in [true, false] {
            let font = VectorFont::from_bytes(data.clone(), 24, antialias).unwrap();
            let rendered = font.render("Hg");
            let mask = &rendered.mask;
            assert_eq!(rendered.advance, font.text_width("Hg"));
            assert!(rendered.left <= 0);
            assert!(mask.width >= rendered.advance - rendered.left);
            assert_eq!(mask.height, font.ascent() + font.descent());
            assert!(mask.data.iter().any(|&a| a == 255));
            if !antialias {
                assert!(mask.data.iter().all(|&a| a == 0 || a == 255));
            }
        }
    }

    #[test]
    fn ink_left_of_the_pen_is_drawn() {
        let Some(path) = system_font() else {
            log::info!("no system font installed, skipping");
            return;
        };
        let data = std::fs::read(&path).unwrap();
        let face = Face::parse(&data, 0).unwrap();
        let Some(x_min) = face
            .glyph_index('j')
            .and_then(|id| face.glyph_bounding_box(id))
            .map(|bbox| bbox.x_min)
        else {
            return;
        };
        let font = VectorFont::from_bytes(data.clone(), 40, false).unwrap();
        let overhang = (x_min as f32 * font.scale).floor() as i32;
        if overhang >= 0 {
            log::info!("'j' has no left overhang in this font, skipping");
            return;
        }

        let mut surface = Surface::new(100, 80).unwrap();
        let mut cursor = Point::new(20, 50);
        font.draw(&mut surface, &mut cursor, "j", Color::new(255, 255, 255));
        assert_eq!(cursor.x, 20 + font.text_width("j"));
        let leftmost = (0..surface.width())
            .find(|&x| (0..surface.height()).any(|y| surface.get(x, y) != Some(0)))
            .unwrap();
        assert!(leftmost < 20, "leftmost ink at {}", leftmost);
    }

    #[test]
    fn mask_is_limited_to_the_visible_width() {
        let Some(path) = system_font() else {
            log::info!("no system font installed, skipping");
            return;
        };
        let data = std::fs::read(&path).unwrap();
        let font = VectorFont::from_bytes(data, 16, true).unwrap();
        let text = "wide ".repeat(2_000);

        let rendered = font.render_within(&text, Some(50));
        assert!(rendered.mask.width <= 50 - rendered.left);
        assert_eq!(rendered.advance, font.text_width(&text));
        assert!(rendered.mask.data.iter().any(|&a| a > 0));

        let mut surface = Surface::new(30, 30).unwrap();
        let mut cursor = Point::new(40, 20);
        font.draw(&mut surface, &mut cursor, "offscreen", Color::new(255, 255, 255));
        assert_eq!(cursor.x, 40 + font.text_width("offscreen"));
        assert!(surface.pixels().iter().all(|&p| p == 0));
    }
}
