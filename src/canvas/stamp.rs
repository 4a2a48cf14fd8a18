// src/canvas/stamp.rs

use crate::surface::{Point, Rect};

/// Describes one stamp: which part of the source canvas to copy, and where
/// its top-left corner lands on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp {
    /// Source region; `None` copies the whole source buffer.
    pub source: Option<Rect>,
    pub dest: Point,
}

impl Stamp {
    /// The whole source, placed at (`x`, `y`).
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            source: None,
            dest: Point::new(x, y),
        }
    }

    /// Restricts the stamp to the `w` x `h` region of the source at
    /// (`x`, `y`).
    pub fn region(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.source = Some(Rect::new(x, y, w, h));
        self
    }

    pub(crate) fn source_rect(&self, source_bounds: Rect) -> Rect {
        self.source.unwrap_or(source_bounds)
    }
}
