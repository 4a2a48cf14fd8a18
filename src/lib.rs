//! core-canvas library crate.
//!
//! A small stateful 2D drawing surface ("canvas") over an in-memory pixel
//! buffer, a window-bound display canvas, and a blocking input event queue
//! fed by a pluggable window/input backend.
//!
//! Drawing is cursor-relative and chainable:
//!
//! ```
//! use core_canvas::canvas::Canvas;
//! use core_canvas::color::Color;
//!
//! let mut canvas = Canvas::with_size(64, 32);
//! canvas
//!     .move_to(2, 2)
//!     .set_color(Color::new(255, 0, 0))
//!     .line_by(20, 10)
//!     .move_to(4, 20)
//!     .text("hi");
//! assert_eq!(canvas.pixel(2, 2), Some(0xFF0000));
//! ```

pub mod canvas;
pub mod color;
pub mod config;
pub mod display;
pub mod font;
pub mod input;
pub mod keys;
pub mod keysym_table;
#[cfg(feature = "x11")]
pub mod platform;
pub mod surface;
