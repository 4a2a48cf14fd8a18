// src/canvas/line.rs

//! Integer line stepping.
//!
//! The dominant axis advances by one pixel per step. The minor axis keeps a
//! carry that grows by the minor extent each step; once the carry reaches the
//! step count, the minor axis advances one pixel and the carry drops by the
//! step count.

use crate::surface::Point;

/// Yields the points of a line after its start point, in drawing order.
#[derive(Debug, Clone)]
pub struct LineStepper {
    pos: Point,
    dir_x: i32,
    dir_y: i32,
    x_major: bool,
    steps: i64,
    shifts: i64,
    carry: i64,
    remaining: i64,
}

impl LineStepper {
    /// Steps from `start` by the relative offset (`dx`, `dy`).
    pub fn new(start: Point, dx: i32, dy: i32) -> Self {
        let (adx, ady) = ((dx as i64).abs(), (dy as i64).abs());
        let x_major = adx >= ady;
        let (steps, shifts) = if x_major { (adx, ady) } else { (ady, adx) };
        Self {
            pos: start,
            dir_x: if dx > 0 { 1 } else { -1 },
            dir_y: if dy > 0 { 1 } else { -1 },
            x_major,
            steps,
            shifts,
            carry: 0,
            remaining: steps,
        }
    }
}

impl Iterator for LineStepper {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        self.carry += self.shifts;
        let shift = self.carry >= self.steps;
        if shift {
            self.carry -= self.steps;
        }

        let (mut x, mut y) = (self.pos.x, self.pos.y);
        if self.x_major {
            x = x.saturating_add(self.dir_x);
            if shift {
                y = y.saturating_add(self.dir_y);
            }
        } else {
            y = y.saturating_add(self.dir_y);
            if shift {
                x = x.saturating_add(self.dir_x);
            }
        }
        self.pos = Point::new(x, y);
        Some(self.pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(dx: i32, dy: i32) -> Vec<(i32, i32)> {
        LineStepper::new(Point::new(0, 0), dx, dy)
            .map(|p| (p.x, p.y))
            .collect()
    }

    #[test]
    fn shallow_line_carries_into_y() {
        assert_eq!(trace(4, 2), vec![(1, 0), (2, 1), (3, 1), (4, 2)]);
    }

    #[test]
    fn steep_line_carries_into_x() {
        assert_eq!(trace(1, 3), vec![(0, 1), (0, 2), (1, 3)]);
    }

    #[test]
    fn negative_directions() {
        assert_eq!(trace(-3, -3), vec![(-1, -1), (-2, -2), (-3, -3)]);
        assert_eq!(trace(-2, 1), vec![(-1, 0), (-2, 1)]);
    }

    #[test]
    fn axis_aligned_and_empty() {
        assert_eq!(trace(0, 2), vec![(0, 1), (0, 2)]);
        assert_eq!(trace(3, 0), vec![(1, 0), (2, 0), (3, 0)]);
        assert!(trace(0, 0).is_empty());
    }

    #[test]
    fn always_ends_on_target() {
        for dx in -7..=7 {
            for dy in -7..=7 {
                let points = trace(dx, dy);
                assert_eq!(points.len() as i32, dx.abs().max(dy.abs()));
                if let Some(&last) = points.last() {
                    assert_eq!(last, (dx, dy), "line to ({}, {})", dx, dy);
                }
            }
        }
    }
}
