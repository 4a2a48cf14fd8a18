// src/font/outline.rs

//! Glyph outline flattening and scanline coverage rasterization.
//!
//! Outlines arrive from `ttf-parser` in font units with y pointing up. The
//! [`OutlineFlattener`] scales them to pixels, flips y so it grows downward
//! from the top of the text line, and flattens curves into line edges.
//! [`rasterize`] then fills the edges with the nonzero winding rule.

use crate::surface::AlphaMask;
use ttf_parser::OutlineBuilder;

type Point = [f32; 2];

/// Recursion depth for curve subdivision (2^depth line segments per curve).
const CURVE_DEPTH: u32 = 3;
/// Sub-scanlines per pixel row in smooth mode.
const SMOOTH_SAMPLES: usize = 4;

/// A non-horizontal line edge, stored top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    /// +1 if the original segment pointed down, -1 if it pointed up.
    pub winding: i32,
}

impl Edge {
    fn new(p0: Point, p1: Point) -> Option<Edge> {
        if p0[1] == p1[1] {
            return None;
        }
        Some(if p0[1] < p1[1] {
            Edge {
                x0: p0[0],
                y0: p0[1],
                x1: p1[0],
                y1: p1[1],
                winding: 1,
            }
        } else {
            Edge {
                x0: p1[0],
                y0: p1[1],
                x1: p0[0],
                y1: p0[1],
                winding: -1,
            }
        })
    }

    #[inline]
    fn x_at(&self, y: f32) -> f32 {
        self.x0 + (y - self.y0) * (self.x1 - self.x0) / (self.y1 - self.y0)
    }
}

/// How coverage is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Fractional coverage, for blended (antialiased) text.
    Smooth,
    /// Each pixel is fully on or off depending on its center.
    Hard,
}

/// Collects the edges of one or more glyph outlines.
pub struct OutlineFlattener<'a> {
    edges: &'a mut Vec<Edge>,
    scale: f32,
    origin_x: f32,
    baseline: f32,
    current: Point,
    start: Point,
}

fn lerp(p0: Point, p1: Point, t: f32) -> Point {
    [p0[0] * (1.0 - t) + p1[0] * t, p0[1] * (1.0 - t) + p1[1] * t]
}

impl<'a> OutlineFlattener<'a> {
    /// `origin_x` is the pen position of the glyph and `baseline` the
    /// baseline row, both in pixels from the top-left of the text line.
    pub fn new(edges: &'a mut Vec<Edge>, scale: f32, origin_x: f32, baseline: f32) -> Self {
        Self {
            edges,
            scale,
            origin_x,
            baseline,
            current: [0.0, 0.0],
            start: [0.0, 0.0],
        }
    }

    fn map(&self, x: f32, y: f32) -> Point {
        [self.origin_x + x * self.scale, self.baseline - y * self.scale]
    }

    fn push_line(&mut self, p0: Point, p1: Point) {
        if let Some(edge) = Edge::new(p0, p1) {
            self.edges.push(edge);
        }
    }

    fn subdivide_quad(&mut self, p0: Point, p1: Point, p2: Point, depth: u32) {
        if depth >= CURVE_DEPTH {
            self.push_line(p0, p2);
            return;
        }
        let p01 = lerp(p0, p1, 0.5);
        let p12 = lerp(p1, p2, 0.5);
        let mid = lerp(p01, p12, 0.5);
        self.subdivide_quad(p0, p01, mid, depth + 1);
        self.subdivide_quad(mid, p12, p2, depth + 1);
    }

    fn subdivide_cubic(&mut self, p0: Point, p1: Point, p2: Point, p3: Point, depth: u32) {
        if depth >= CURVE_DEPTH {
            self.push_line(p0, p3);
            return;
        }
        let p01 = lerp(p0, p1, 0.5);
        let p12 = lerp(p1, p2, 0.5);
        let p23 = lerp(p2, p3, 0.5);
        let p012 = lerp(p01, p12, 0.5);
        let p123 = lerp(p12, p23, 0.5);
        let mid = lerp(p012, p123, 0.5);
        self.subdivide_cubic(p0, p01, p012, mid, depth + 1);
        self.subdivide_cubic(mid, p123, p23, p3, depth + 1);
    }
}

impl OutlineBuilder for OutlineFlattener<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.current = self.map(x, y);
        self.start = self.current;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p1 = self.map(x, y);
        self.push_line(self.current, p1);
        self.current = p1;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p1 = self.map(x1, y1);
        let p2 = self.map(x, y);
        self.subdivide_quad(self.current, p1, p2, 0);
        self.current = p2;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p1 = self.map(x1, y1);
        let p2 = self.map(x2, y2);
        let p3 = self.map(x, y);
        self.subdivide_cubic(self.current, p1, p2, p3, 0);
        self.current = p3;
    }

    fn close(&mut self) {
        if self.current != self.start {
            self.push_line(self.current, self.start);
            self.current = self.start;
        }
    }
}

/// Fills `edges` into a `width` x `height` coverage mask.
pub fn rasterize(edges: &[Edge], width: i32, height: i32, mode: Coverage) -> AlphaMask {
    let mut mask = AlphaMask::new(width, height);
    if mask.width == 0 || mask.height == 0 {
        return mask;
    }
    let w = mask.width as usize;
    let samples = match mode {
        Coverage::Smooth => SMOOTH_SAMPLES,
        Coverage::Hard => 1,
    };

    let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(16);
    let mut accum = vec![0f32; w];

    for row in 0..mask.height as usize {
        accum.iter_mut().for_each(|a| *a = 0.0);
        for s in 0..samples {
            let sy = row as f32 + (s as f32 + 0.5) / samples as f32;
            crossings.clear();
            crossings.extend(
                edges
                    .iter()
                    .filter(|e| sy >= e.y0 && sy < e.y1)
                    .map(|e| (e.x_at(sy), e.winding)),
            );
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let (a, b) = (pair[0].0.max(0.0), pair[1].0.min(w as f32));
                if b <= a {
                    continue;
                }
                match mode {
                    Coverage::Smooth => add_span(&mut accum, a, b),
                    Coverage::Hard => {
                        // Pixels whose centers lie in [a, b).
                        let first = (a - 0.5).ceil().max(0.0) as usize;
                        let last = ((b - 0.5).ceil() as usize).min(w);
                        for px in accum.iter_mut().take(last).skip(first) {
                            *px = 1.0;
                        }
                    }
                }
            }
        }

        let out = &mut mask.data[row * w..(row + 1) * w];
        for (dst, &a) in out.iter_mut().zip(&accum) {
            *dst = ((a / samples as f32) * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }
    mask
}

/// Adds the horizontal overlap of `[a, b)` with each pixel to `accum`.
fn add_span(accum: &mut [f32], a: f32, b: f32) {
    let first = a.floor() as usize;
    let last = (b.ceil() as usize).min(accum.len());
    for px in first..last {
        let lo = a.max(px as f32);
        let hi = b.min(px as f32 + 1.0);
        if hi > lo {
            accum[px] += hi - lo;
        }
    }
}
