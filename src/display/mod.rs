// src/display/mod.rs
//! The window-bound canvas.
//!
//! - [`Display`]: a [`Canvas`] whose buffer is shown in a native window
//! - [`DisplayDriver`]: platform-specific window primitives
//! - `drivers`: the headless driver and, with the `x11` feature, Xlib
//!
//! Drawing goes to the canvas buffer exactly as for an offscreen canvas and
//! stays invisible until [`Display::present`] copies the buffer to the
//! window.

pub mod driver;
pub mod drivers;


pub use driver::{DisplayDriver, WindowFlags, WindowSpec};
pub use drivers::HeadlessDisplayDriver;

#[cfg(feature = "x11")]
pub use drivers::X11DisplayDriver;

use crate::canvas::Canvas;
use log::{debug, info, warn};
use std::ops::{Deref, DerefMut};

/// A canvas bound 1:1 to a window.
///
/// Dereferences to [`Canvas`] for all drawing operations. The window and the
/// buffer are created by [`Display::open`] and released by
/// [`Display::close`] together; a buffer reopened through the `Canvas`
/// methods no longer matches the window and is not presented.
#[derive(Debug)]
pub struct Display<D: DisplayDriver> {
    canvas: Canvas,
    driver: D,
    window: Option<WindowSpec>,
}

impl<D: DisplayDriver> Display<D> {
    pub fn new(driver: D) -> Self {
        Self {
            canvas: Canvas::new(),
            driver,
            window: None,
        }
    }

    /// Creates the window and a matching buffer, with the cursor centered.
    /// Returns whether both succeeded; on failure the display has neither.
    pub fn open(&mut self, width: i32, height: i32, title: &str, fullscreen: bool) -> bool {
        self.open_with(&WindowSpec::new(width, height, title, fullscreen))
    }

    pub fn open_with(&mut self, spec: &WindowSpec) -> bool {
        self.window = None;
        if let Err(e) = self.driver.create_window(spec) {
            warn!("Failed to open window '{}': {:#}", spec.title, e);
            self.canvas.close();
            return false;
        }
        if !self.canvas.open(spec.width, spec.height) {
            self.driver.destroy_window();
            return false;
        }
        self.window = Some(spec.clone());
        info!(
            "Display '{}' opened at {}x{}",
            spec.title, spec.width, spec.height
        );
        true
    }

    /// Destroys the window and releases the buffer. Drawing state (cursor,
    /// color, font) is kept for a later [`Display::open`].
    pub fn close(&mut self) {
        if let Some(spec) = self.window.take() {
            info!("Display '{}' closed", spec.title);
        }
        self.driver.destroy_window();
        self.canvas.close();
    }

    pub fn is_window_open(&self) -> bool {
        self.window.is_some()
    }

    /// Shows everything drawn so far. Returns false (after logging) if there
    /// is no window, the buffer no longer matches it, or the window could not
    /// be updated.
    pub fn present(&mut self) -> bool {
        let Some(window) = self.window.as_ref() else {
            debug!("present skipped: no window");
            return false;
        };
        let Some(surface) = self.canvas.surface() else {
            warn!("present skipped: window '{}' has no buffer", window.title);
            return false;
        };
        if (surface.width(), surface.height()) != (window.width, window.height) {
            warn!(
                "present skipped: buffer is {}x{} but window '{}' is {}x{}",
                surface.width(),
                surface.height(),
                window.title,
                window.width,
                window.height
            );
            return false;
        }
        match self.driver.present(surface) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to present frame: {:#}", e);
                false
            }
        }
    }

    /// Shows or hides the OS mouse pointer.
    pub fn show_cursor(&mut self, visible: bool) -> &mut Self {
        self.driver.set_cursor_visible(visible);
        self
    }

    /// Moves the OS mouse pointer; the drawing cursor is unaffected.
    pub fn move_cursor(&mut self, x: i32, y: i32) -> &mut Self {
        self.driver.warp_cursor(x, y);
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D: DisplayDriver> Deref for Display<D> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        &self.canvas
    }
}

impl<D: DisplayDriver> DerefMut for Display<D> {
    fn deref_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}
