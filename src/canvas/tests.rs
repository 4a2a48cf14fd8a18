// src/canvas/tests.rs

use super::*;
use crate::font::bitmap::{GLYPH_HEIGHT, GLYPH_WIDTH};
use test_log::test;

const WHITE: PackedRgb = 0xFFFFFF;

fn lit(canvas: &Canvas) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            if canvas.pixel(x, y) != Some(0) {
                points.push((x, y));
            }
        }
    }
    points
}

#[test]
fn open_centers_cursor_and_clears() {
    let mut canvas = Canvas::new();
    assert!(!canvas.is_open());
    assert!(canvas.open(10, 6));
    assert_eq!(canvas.cursor(), Point::new(5, 3));
    assert_eq!((canvas.width(), canvas.height()), (10, 6));
    assert!(lit(&canvas).is_empty());
}

#[test]
fn reopen_replaces_buffer() {
    let mut canvas = Canvas::with_size(4, 4);
    canvas.dot();
    assert!(canvas.open(8, 2));
    assert_eq!(canvas.width(), 8);
    assert!(lit(&canvas).is_empty());
}

#[test]
fn failed_open_leaves_no_buffer_and_drawing_is_noop() {
    let mut canvas = Canvas::with_size(4, 4);
    assert!(!canvas.open(0, 5));
    assert!(!canvas.is_open());
    canvas
        .dot()
        .line_by(3, 3)
        .fill_box(2, 2)
        .text("x")
        .move_to(1, 1);
    assert_eq!(canvas.width(), 0);
    assert_eq!(canvas.pixel(0, 0), None);
    assert!(!canvas.save("/nonexistent/never-written.bmp"));
}

#[test]
fn default_color_is_white() {
    let mut canvas = Canvas::with_size(3, 3);
    canvas.dot();
    assert_eq!(canvas.pixel(1, 1), Some(WHITE));
}

#[test]
fn moves_outside_buffer_are_ignored() {
    let mut canvas = Canvas::with_size(10, 10);
    canvas.move_to(2, 3);
    canvas.move_to(10, 3).move_to(-1, 0);
    assert_eq!(canvas.cursor(), Point::new(2, 3));
    canvas.move_by(-3, 0);
    assert_eq!(canvas.cursor(), Point::new(2, 3));
    canvas.move_by(4, 1);
    assert_eq!(canvas.cursor(), Point::new(6, 4));
}

#[test]
fn line_plots_dominant_axis_carry_sequence() {
    let mut canvas = Canvas::with_size(10, 10);
    canvas.move_to(0, 0).line_to(4, 2);
    assert_eq!(lit(&canvas), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
    assert_eq!(canvas.cursor(), Point::new(4, 2));
}

#[test]
fn line_is_deterministic() {
    for (dx, dy) in [(7, -3), (-2, 6), (5, 5), (0, -4)] {
        let mut a = Canvas::with_size(20, 20);
        let mut b = Canvas::with_size(20, 20);
        a.line_by(dx, dy);
        b.line_by(dx, dy);
        assert_eq!(a.surface(), b.surface());
        assert_eq!(a.cursor(), b.cursor());
    }
}

#[test]
fn line_off_the_edge_truncates() {
    let mut canvas = Canvas::with_size(10, 10);
    canvas.move_to(5, 5).line_to(20, 5);
    assert_eq!(lit(&canvas), vec![(5, 5), (6, 5), (7, 5), (8, 5), (9, 5)]);
    assert_eq!(canvas.cursor(), Point::new(9, 5));
}

#[test]
fn zero_length_line_plots_start() {
    let mut canvas = Canvas::with_size(4, 4);
    canvas.move_to(1, 2).line_by(0, 0);
    assert_eq!(lit(&canvas), vec![(1, 2)]);
}

#[test]
fn fill_box_uses_cursor_as_corner() {
    let mut canvas = Canvas::with_size(6, 6);
    canvas.move_to(1, 1).set_color(Color::new(0, 0, 255)).fill_box(2, 3);
    assert_eq!(canvas.pixel(1, 1), Some(0x0000FF));
    assert_eq!(canvas.pixel(2, 3), Some(0x0000FF));
    assert_eq!(canvas.pixel(3, 1), Some(0));
    assert_eq!(canvas.pixel(1, 4), Some(0));
    assert_eq!(canvas.cursor(), Point::new(1, 1));
}

#[test]
fn fill_box_normalizes_negative_extents() {
    let mut a = Canvas::with_size(6, 6);
    a.move_to(4, 4).fill_box(-2, -3);
    let mut b = Canvas::with_size(6, 6);
    b.move_to(2, 1).fill_box(2, 3);
    assert_eq!(a.surface(), b.surface());
}

#[test]
fn fill_box_to_excludes_far_corner() {
    let mut canvas = Canvas::with_size(6, 6);
    canvas.move_to(1, 1).fill_box_to(3, 3);
    assert_eq!(lit(&canvas), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
}

#[test]
fn bitmap_text_metrics() {
    let canvas = Canvas::with_size(8, 8);
    assert!(!canvas.has_font());
    for s in ["", "a", "Hello, world", "~~~"] {
        assert_eq!(canvas.text_width(s), GLYPH_WIDTH * s.len() as i32);
    }
    assert_eq!(canvas.ascent() + canvas.descent(), GLYPH_HEIGHT);
}

#[test]
fn bitmap_text_advances_cursor() {
    let mut canvas = Canvas::with_size(64, 16);
    canvas.move_to(0, 10).text("ab").text_char('c');
    assert_eq!(canvas.cursor(), Point::new(24, 10));
    assert!(lit(&canvas)
        .iter()
        .all(|&(_, y)| y > 10 - canvas.ascent() - 1 && y <= 10 + canvas.descent()));
}

#[test]
fn text_too_close_to_top_is_skipped() {
    let mut canvas = Canvas::with_size(64, 16);
    canvas.move_to(0, 2).text("A");
    assert!(lit(&canvas).is_empty());
    assert_eq!(canvas.cursor(), Point::new(0, 2));
}

#[test]
fn stamp_copies_whole_source() {
    let mut src = Canvas::with_size(2, 2);
    src.move_to(0, 0).set_color(Color::new(1, 2, 3)).fill_box(2, 2);
    let mut dst = Canvas::with_size(4, 4);
    dst.stamp(&src, Stamp::at(1, 1));
    assert_eq!(lit(&dst), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    assert_eq!(dst.pixel(2, 2), Some(0x010203));
}

#[test]
fn stamp_region_and_clipping() {
    let mut src = Canvas::with_size(4, 4);
    src.move_to(2, 2).fill_box(2, 2);
    let mut dst = Canvas::with_size(3, 3);
    dst.stamp(&src, Stamp::at(-1, 0).region(2, 2, 2, 2));
    assert_eq!(lit(&dst), vec![(0, 0), (0, 1)]);
}

#[test]
fn transparent_source_keys_out_black() {
    let mut src = Canvas::with_size(4, 4);
    src.move_to(0, 0)
        .set_color(Color::new(200, 10, 10))
        .fill_box(4, 4)
        .move_to(1, 1)
        .set_color(Color::BLACK)
        .fill_box(2, 2)
        .set_transparent(true);
    let mut dst = Canvas::with_size(4, 4);
    dst.move_to(0, 0).fill_box(4, 4);
    dst.stamp(&src, Stamp::at(0, 0));

    for y in 0..4 {
        for x in 0..4 {
            let expected = if src.pixel(x, y) == Some(0) {
                WHITE
            } else {
                src.pixel(x, y).unwrap()
            };
            assert_eq!(dst.pixel(x, y), Some(expected), "at ({}, {})", x, y);
        }
    }
}

#[test]
fn opaque_source_copies_black() {
    let src = Canvas::with_size(2, 2);
    let mut dst = Canvas::with_size(2, 2);
    dst.move_to(0, 0).fill_box(2, 2);
    dst.stamp(&src, Stamp::at(0, 0));
    assert!(lit(&dst).is_empty());
}

#[test]
fn stamp_within_scrolls_overlapping_region() {
    let mut canvas = Canvas::with_size(3, 3);
    canvas.move_to(0, 0).line_to(2, 0);
    canvas.stamp_within(Stamp::at(0, 1).region(0, 0, 3, 2));
    assert_eq!(canvas.pixel(1, 1), Some(WHITE));
    assert_eq!(canvas.pixel(1, 2), Some(0));
}

#[test]
fn copy_is_isolated_from_original() {
    let mut a = Canvas::with_size(5, 5);
    a.move_to(2, 2).set_color(Color::new(9, 9, 9)).dot();
    let mut b = a.clone();
    a.set_color(Color::new(255, 0, 0)).dot();
    assert_eq!(b.pixel(2, 2), Some(0x090909));
    assert_eq!(b.color(), Color::new(9, 9, 9));

    drop(a);
    b.move_to(0, 0).dot().text("x");
    assert_eq!(b.pixel(0, 0), Some(0x090909));
}

#[test]
fn failed_font_load_falls_back_to_bitmap() {
    let mut canvas = Canvas::with_size(8, 8);
    canvas.load_font(FontSpec::new("missing-font-for-canvas-test.ttf", 12));
    assert!(!canvas.has_font());
    assert_eq!(canvas.text_width("abc"), 3 * GLYPH_WIDTH);
}

#[test]
fn undersized_font_request_loads_at_minimum_size() {
    let Some(path) = crate::font::vector::tests::system_font() else {
        log::info!("no system font installed, skipping");
        return;
    };
    let name = path.to_string_lossy().into_owned();
    let mut tiny = Canvas::new();
    tiny.load_font(FontSpec {
        name: name.clone(),
        size: 4,
        antialias: true,
    });
    let mut floor = Canvas::new();
    floor.load_font(FontSpec::new(name, 16));

    assert!(tiny.has_font() && floor.has_font());
    assert_eq!(tiny.ascent(), floor.ascent());
    assert_eq!(tiny.text_width("Hello"), floor.text_width("Hello"));
}

#[test]
fn vector_text_sits_on_baseline() {
    let Some(path) = crate::font::vector::tests::system_font() else {
        log::info!("no system font installed, skipping");
        return;
    };
    let mut canvas = Canvas::with_size(200, 60);
    canvas.load_font(FontSpec::new(path.to_string_lossy(), 24).with_antialias(false));
    assert!(canvas.has_font());

    let width = canvas.text_width("Ay");
    canvas.move_to(10, 40).text("Ay");
    assert_eq!(canvas.cursor(), Point::new(10 + width, 40));

    let points = lit(&canvas);
    assert!(!points.is_empty());
    let top = 40 - canvas.ascent();
    let bottom = 40 + canvas.descent();
    assert!(points.iter().all(|&(x, y)| y >= top && y < bottom && x >= 10));

    // A copy keeps a working font after the original is gone.
    let mut copy = canvas.clone();
    drop(canvas);
    assert!(copy.has_font());
    assert_eq!(copy.text_width("Ay"), width);
    copy.set_antialias(true).move_to(10, 20).text("Ay");
}

#[test]
fn save_writes_decodable_bitmap() {
    let mut canvas = Canvas::with_size(6, 4);
    canvas.move_to(0, 0).set_color(Color::new(10, 20, 30)).line_to(5, 3);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("canvas.bmp");
    assert!(canvas.save(&path));

    let decoded = image::open(&path).unwrap().to_rgb8();
    for y in 0..4 {
        for x in 0..6 {
            let c = Color::from_packed(canvas.pixel(x, y).unwrap());
            assert_eq!(decoded.get_pixel(x as u32, y as u32).0, [c.r, c.g, c.b]);
        }
    }
    assert!(!canvas.save(dir.path().join("missing-dir").join("x.bmp")));
}
