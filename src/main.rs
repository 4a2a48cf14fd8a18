// src/main.rs

//! Demo for the `core-canvas` library.
//!
//! Without the `x11` feature it draws a sample scene with every primitive
//! and saves it as a BMP (path from the first argument). With `x11` it opens
//! a window instead: drag with the left button to draw, press a digit to
//! change the color, space to stamp the scene, Escape to quit.

use anyhow::Context;
use core_canvas::canvas::{Canvas, Stamp};
use core_canvas::color::{Color, NamedColor};
use core_canvas::config::CONFIG;
use core_canvas::font::FontSpec;
use log::info;

const DEMO_FONT: &str = "DejaVuSans.ttf";

/// Draws the sample scene onto `canvas`, which must be open.
fn draw_scene(canvas: &mut Canvas) {
    let (w, h) = (canvas.width(), canvas.height());

    canvas
        .move_to(0, 0)
        .set_color(Color::new(16, 24, 48))
        .fill_box(w, h);

    // Color bars.
    let bar = (w / 16).max(1);
    for i in 0..16u8 {
        if let Some(named) = NamedColor::from_index(i) {
            canvas
                .move_to(i as i32 * bar, h - 20)
                .set_color(named)
                .fill_box(bar, 20);
        }
    }

    // A fan of lines from the center.
    let (cx, cy) = (w / 2, h / 2);
    for i in 0..24 {
        let angle = i as f64 * std::f64::consts::TAU / 24.0;
        let r = (w.min(h) / 3) as f64;
        canvas
            .move_to(cx, cy)
            .set_color(Color::new(255, (i * 10) as u8, 64))
            .line_by((angle.cos() * r) as i32, (angle.sin() * r) as i32);
    }

    canvas
        .move_to(10, 20)
        .set_color(Color::WHITE)
        .text("core-canvas bitmap font");

    let mut label = Canvas::new();
    label.load_font(FontSpec::new(DEMO_FONT, 20));
    if label.has_font() {
        let text = "Vector text";
        let text_w = label.text_width(text);
        let ascent = label.ascent();
        let text_h = ascent + label.descent();
        if label.open(text_w + 8, text_h + 8) {
            label
                .set_color(Color::new(255, 220, 120))
                .move_to(4, 4 + ascent)
                .text(text)
                .set_transparent(true);
            canvas.stamp(&label, Stamp::at(10, 40));
        }
    }
}

#[cfg(not(feature = "x11"))]
fn run() -> anyhow::Result<()> {
    use core_canvas::display::{Display, HeadlessDisplayDriver};

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "core-canvas-demo.bmp".to_string());
    let window = &CONFIG.window;

    let mut display = Display::new(HeadlessDisplayDriver::new());
    if !display.open(window.width, window.height, &window.title, window.fullscreen) {
        anyhow::bail!("failed to open {}x{} display", window.width, window.height);
    }
    draw_scene(&mut display);
    display.present();

    if !display.save(&path) {
        anyhow::bail!("failed to save {}", path);
    }
    info!("Wrote demo scene to {}", path);
    Ok(())
}

#[cfg(feature = "x11")]
fn run() -> anyhow::Result<()> {
    use core_canvas::display::{Display, X11DisplayDriver};
    use core_canvas::input::drivers::X11InputDriver;
    use core_canvas::input::{EventKind, InputQueue};
    use core_canvas::keys::{KeySymbol, BTN_LEFT, KEY_ESCAPE, KEY_SPACE};
    use core_canvas::platform::x11::Connection;

    let conn = Connection::open().context("X11 is required for the interactive demo")?;
    let window = &CONFIG.window;
    let mut display = Display::new(X11DisplayDriver::new(conn.clone()));
    if !display.open(window.width, window.height, &window.title, window.fullscreen) {
        anyhow::bail!("failed to open {}x{} window", window.width, window.height);
    }
    draw_scene(&mut display);
    display.present();

    let mut input = InputQueue::new(X11InputDriver::new(conn));
    input.set_timer(1000);

    let mut drawing = false;
    let mut brush = Color::WHITE;
    let scene: Canvas = (*display).clone();
    while let Some(event) = input.next_event() {
        match event.kind {
            EventKind::Key if event.keycode == KEY_ESCAPE => break,
            EventKind::Key if event.keycode == KEY_SPACE => {
                let (x, y) = (display.cursor().x, display.cursor().y);
                display.stamp(&scene, Stamp::at(x, y).region(0, 0, 120, 80));
            }
            EventKind::Key if !event.is_release() => {
                if let Some(KeySymbol::Char(c)) = event.key_symbol() {
                    let digit = c.to_digit(10).and_then(|d| NamedColor::from_index(d as u8));
                    if let Some(named) = digit {
                        brush = named.into();
                    }
                }
            }
            EventKind::Mouse if event.button == BTN_LEFT => {
                drawing = true;
                display.move_to(event.x, event.y).set_color(brush).dot();
            }
            EventKind::Mouse if event.button == -BTN_LEFT => drawing = false,
            EventKind::Mouse if event.button == 0 && drawing => {
                display.set_color(brush).line_to(event.x, event.y);
            }
            EventKind::Mouse if event.button == 0 => {
                display.move_to(event.x, event.y);
            }
            EventKind::Timer => {
                let (x, y) = (display.cursor().x, display.cursor().y);
                let stamp = format!("{:>6} s", event.time / 1000);
                let text_w = display.text_width(&stamp);
                let left = display.width() - text_w - 4;
                let bottom = display.height() - 24;
                let (ascent, descent) = (display.ascent(), display.descent());
                display
                    .move_to(left, bottom - ascent)
                    .set_color(Color::BLACK)
                    .fill_box(text_w, ascent + descent)
                    .move_to(left, bottom)
                    .set_color(Color::WHITE)
                    .text(&stamp)
                    .move_to(x, y);
            }
            _ => {}
        }
        display.present();
    }
    info!("Interactive demo finished");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting core-canvas demo");
    run().context("demo failed")
}
