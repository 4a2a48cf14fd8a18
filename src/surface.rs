// src/surface.rs

//! Owned pixel buffers and the raw pixel operations the canvas is built on.
//!
//! A `Surface` is a fixed-size, row-major grid of packed `0x00RRGGBB` pixels.
//! Every operation here clips against the surface bounds, so callers may pass
//! rectangles and points that lie partly (or entirely) outside the buffer.

use crate::color::{blend, Color, PackedRgb};
use anyhow::{bail, Context, Result};
use log::{debug, trace};
use std::path::Path;

/// An integer pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle. Width and height may be negative on input;
/// see [`Rect::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Returns the same area with non-negative extents: a negative width
    /// spans to the left of `x`, a negative height spans above `y`.
    pub fn normalized(self) -> Rect {
        let (x, w) = if self.w < 0 {
            (self.x.saturating_add(self.w), self.w.saturating_neg())
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0 {
            (self.y.saturating_add(self.h), self.h.saturating_neg())
        } else {
            (self.y, self.h)
        };
        Rect { x, y, w, h }
    }

    /// Intersection of two rectangles, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x as i64 + self.w as i64).min(other.x as i64 + other.w as i64);
        let y1 = (self.y as i64 + self.h as i64).min(other.y as i64 + other.h as i64);
        if x1 <= x0 as i64 || y1 <= y0 as i64 {
            return None;
        }
        Some(Rect {
            x: x0,
            y: y0,
            w: (x1 - x0 as i64) as i32,
            h: (y1 - y0 as i64) as i32,
        })
    }
}

/// An 8-bit coverage mask, produced by text rendering and composited onto a
/// surface in a single color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    pub width: i32,
    pub height: i32,
    /// Row-major coverage, `width * height` entries, 0 = transparent.
    pub data: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width: width.max(0),
            height: height.max(0),
            data: vec![0; len],
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y * self.width + x) as usize]
    }
}

/// A raw packed-RGB pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: i32,
    height: i32,
    pixels: Vec<PackedRgb>,
}

impl Surface {
    /// Allocates a black surface of the given size.
    ///
    /// Fails for non-positive dimensions and when the buffer cannot be
    /// allocated; it never aborts the process on allocation failure.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            bail!("invalid surface size {}x{}", width, height);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .with_context(|| format!("surface size {}x{} overflows", width, height))?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .with_context(|| format!("failed to allocate {}x{} surface", width, height))?;
        pixels.resize(len, 0);
        debug!("Allocated {}x{} surface", width, height);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Row-major pixel data.
    pub fn pixels(&self) -> &[PackedRgb] {
        &self.pixels
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        !(x < 0 || y < 0 || x >= self.width || y >= self.height)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    pub fn get(&self, x: i32, y: i32) -> Option<PackedRgb> {
        if self.in_bounds(x, y) {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Writes one pixel; out-of-bounds writes are skipped.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, px: PackedRgb) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = px;
        }
    }

    /// Fills the part of `rect` that lies on the surface. Rectangles with a
    /// non-positive extent fill nothing.
    pub fn fill_rect(&mut self, rect: Rect, px: PackedRgb) {
        let Some(clip) = rect.intersect(&self.bounds()) else {
            trace!("fill_rect {:?} is empty after clipping", rect);
            return;
        };
        for y in clip.y..clip.y + clip.h {
            let start = self.index(clip.x, y);
            self.pixels[start..start + clip.w as usize].fill(px);
        }
    }

    /// Fills the whole surface.
    pub fn clear(&mut self, px: PackedRgb) {
        self.pixels.fill(px);
    }

    /// Copies `src_rect` of `src` so that its top-left lands on `dst`.
    ///
    /// The source rectangle is clipped to the source surface and the result
    /// to this surface. Source pixels equal to `color_key` are skipped,
    /// leaving the destination unchanged there.
    pub fn blit(
        &mut self,
        src: &Surface,
        src_rect: Rect,
        dst: Point,
        color_key: Option<PackedRgb>,
    ) {
        let Some(sr) = src_rect.intersect(&src.bounds()) else {
            return;
        };
        let dx = dst.x.saturating_add(sr.x - src_rect.x);
        let dy = dst.y.saturating_add(sr.y - src_rect.y);
        let Some(dr) = Rect::new(dx, dy, sr.w, sr.h).intersect(&self.bounds()) else {
            return;
        };
        let sx0 = sr.x + (dr.x - dx);
        let sy0 = sr.y + (dr.y - dy);
        trace!("blit {:?} -> {:?} (key {:?})", sr, dr, color_key);

        for row in 0..dr.h {
            let s = src.index(sx0, sy0 + row);
            let d = self.index(dr.x, dr.y + row);
            let src_row = &src.pixels[s..s + dr.w as usize];
            let dst_row = &mut self.pixels[d..d + dr.w as usize];
            match color_key {
                None => dst_row.copy_from_slice(src_row),
                Some(key) => {
                    for (d, &s) in dst_row.iter_mut().zip(src_row) {
                        if s != key {
                            *d = s;
                        }
                    }
                }
            }
        }
    }

    /// Blends `color` through `mask`, placing the mask's top-left at `at`.
    pub fn composite_mask(&mut self, mask: &AlphaMask, at: Point, color: Color) {
        let src = color.packed();
        for my in 0..mask.height {
            let y = at.y + my;
            if y < 0 || y >= self.height {
                continue;
            }
            for mx in 0..mask.width {
                let x = at.x + mx;
                if x < 0 || x >= self.width {
                    continue;
                }
                let a = mask.data[(my * mask.width + mx) as usize];
                if a != 0 {
                    let idx = self.index(x, y);
                    self.pixels[idx] = blend(src, self.pixels[idx], a);
                }
            }
        }
    }

    /// Writes the surface as an uncompressed 24-bit BMP file.
    pub fn save_bmp(&self, path: &Path) -> Result<()> {
        let image = image::RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let c = Color::from_packed(self.pixels[self.index(x as i32, y as i32)]);
            image::Rgb([c.r, c.g, c.b])
        });
        image
            .save_with_format(path, image::ImageFormat::Bmp)
            .with_context(|| format!("failed to write bitmap to {}", path.display()))?;
        debug!(
            "Saved {}x{} surface to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}
